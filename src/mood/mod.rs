//! Emotional axes and user mood vectors.

mod axis;
mod vector;

pub use axis::{AxisArray, EmotionAxis, UnknownAxis, AXIS_COUNT};
pub use vector::{MoodError, RecommendationMode, UserMoodVector, MAX_INTENSITY, MIN_INTENSITY};
