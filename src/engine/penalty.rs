//! Opposite-axis damping.
//!
//! The opposite table is not symmetric: romantic opposes angry, angry
//! opposes peaceful, peaceful opposes excited. Changing it changes rankings.

use crate::catalog::CatalogVector;
use crate::mood::{EmotionAxis, UserMoodVector, MAX_INTENSITY};

/// Normalized opposite-axis value above which damping starts.
pub const PENALTY_ONSET: f64 = 0.5;

pub fn opposite_of(axis: EmotionAxis) -> Option<EmotionAxis> {
    match axis {
        EmotionAxis::Happy => Some(EmotionAxis::Sad),
        EmotionAxis::Sad => Some(EmotionAxis::Happy),
        EmotionAxis::Excited => Some(EmotionAxis::Peaceful),
        EmotionAxis::Peaceful => Some(EmotionAxis::Excited),
        EmotionAxis::Angry => Some(EmotionAxis::Peaceful),
        EmotionAxis::Romantic => Some(EmotionAxis::Angry),
        _ => None,
    }
}

/// Linear damping for a normalized opposite-axis value: 1 up to the onset,
/// falling to 0.5 at full intensity.
pub fn damping(opposite_value: f64) -> f64 {
    if opposite_value > PENALTY_ONSET {
        1.0 - (opposite_value - PENALTY_ONSET)
    } else {
        1.0
    }
}

/// Multiplier in (0, 1] applied to the raw similarity.
pub fn penalty(user: &UserMoodVector, movie: &CatalogVector) -> f64 {
    user.selected()
        .filter_map(|(axis, _)| opposite_of(axis))
        .map(|opposite| damping(movie.vector[opposite.index()] / MAX_INTENSITY))
        .product()
}
