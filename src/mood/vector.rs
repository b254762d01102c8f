use super::axis::{AxisArray, EmotionAxis, AXIS_COUNT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

pub const MIN_INTENSITY: f64 = 0.0;
pub const MAX_INTENSITY: f64 = 10.0;

#[derive(Debug, Error, PartialEq)]
pub enum MoodError {
    #[error("At least one mood must be selected")]
    Empty,

    #[error("Unknown mood: {0}")]
    UnknownAxis(String),

    #[error("Intensity for {axis} must be between 0 and 10, got {value}")]
    OutOfRange { axis: EmotionAxis, value: f64 },
}

/// How the user's mood should drive the ranking.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationMode {
    /// Find items that mirror the current mood.
    #[default]
    Match,
    /// Find items that push away from the current mood.
    Change,
}

impl RecommendationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RecommendationMode::Match => "match",
            RecommendationMode::Change => "change",
        }
    }
}

/// Sparse user-supplied intensities, stored axis-indexed.
///
/// An axis is "selected" exactly when it carries an intensity. A value
/// built through [`UserMoodVector::from_axes`] always has at least one
/// selected axis and every intensity lies in [0, 10].
#[derive(Debug, Clone, PartialEq)]
pub struct UserMoodVector {
    intensities: [Option<f64>; AXIS_COUNT],
}

impl UserMoodVector {
    pub fn from_axes<I>(pairs: I) -> Result<Self, MoodError>
    where
        I: IntoIterator<Item = (EmotionAxis, f64)>,
    {
        let mut intensities = [None; AXIS_COUNT];
        for (axis, value) in pairs {
            if !value.is_finite() || !(MIN_INTENSITY..=MAX_INTENSITY).contains(&value) {
                return Err(MoodError::OutOfRange { axis, value });
            }
            intensities[axis.index()] = Some(value);
        }
        if intensities.iter().all(Option::is_none) {
            return Err(MoodError::Empty);
        }
        Ok(Self { intensities })
    }

    /// Builds a vector from wire-level axis names.
    pub fn from_named<'a, I>(pairs: I) -> Result<Self, MoodError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let axes = pairs
            .into_iter()
            .map(|(name, value)| {
                name.parse::<EmotionAxis>()
                    .map(|axis| (axis, value))
                    .map_err(|_| MoodError::UnknownAxis(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_axes(axes)
    }

    pub fn intensity(&self, axis: EmotionAxis) -> Option<f64> {
        self.intensities[axis.index()]
    }

    pub fn is_selected(&self, axis: EmotionAxis) -> bool {
        self.intensities[axis.index()].is_some()
    }

    /// Selected axes with their intensities, in axis order.
    pub fn selected(&self) -> impl Iterator<Item = (EmotionAxis, f64)> + '_ {
        EmotionAxis::ALL
            .iter()
            .filter_map(|axis| self.intensity(*axis).map(|v| (*axis, v)))
    }

    pub fn selected_count(&self) -> usize {
        self.intensities.iter().filter(|v| v.is_some()).count()
    }

    /// Selection mask in axis order.
    pub fn mask(&self) -> [bool; AXIS_COUNT] {
        self.intensities.map(|v| v.is_some())
    }

    /// Dense representation scaled to [0, 1], unselected axes at zero.
    pub fn normalized(&self) -> AxisArray {
        self.intensities.map(|v| v.map_or(0.0, |v| v / MAX_INTENSITY))
    }

    /// The vector actually scored for `mode`: unchanged for match, each
    /// selected intensity mirrored to `10 - v` for change.
    pub fn effective(&self, mode: RecommendationMode) -> UserMoodVector {
        match mode {
            RecommendationMode::Match => self.clone(),
            RecommendationMode::Change => UserMoodVector {
                intensities: self.intensities.map(|v| v.map(|v| MAX_INTENSITY - v)),
            },
        }
    }

    pub fn to_map(&self) -> BTreeMap<EmotionAxis, f64> {
        self.selected().collect()
    }
}
