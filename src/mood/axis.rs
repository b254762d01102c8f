use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of emotional axes every dense vector carries.
pub const AXIS_COUNT: usize = 12;

/// Dense, axis-indexed values in [`EmotionAxis::ALL`] order.
pub type AxisArray = [f64; AXIS_COUNT];

/// One of the fixed emotional dimensions.
///
/// The declaration order is the index order of every dense vector in the
/// catalog, so variants must never be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionAxis {
    Happy,
    Sad,
    Excited,
    Romantic,
    Angry,
    Peaceful,
    Curious,
    Nostalgic,
    Adventurous,
    Hopeful,
    Thoughtful,
    Energetic,
}

impl EmotionAxis {
    pub const ALL: [EmotionAxis; AXIS_COUNT] = [
        EmotionAxis::Happy,
        EmotionAxis::Sad,
        EmotionAxis::Excited,
        EmotionAxis::Romantic,
        EmotionAxis::Angry,
        EmotionAxis::Peaceful,
        EmotionAxis::Curious,
        EmotionAxis::Nostalgic,
        EmotionAxis::Adventurous,
        EmotionAxis::Hopeful,
        EmotionAxis::Thoughtful,
        EmotionAxis::Energetic,
    ];

    /// Position of this axis in a dense vector.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<EmotionAxis> {
        Self::ALL.get(index).copied()
    }

    /// Identifier used on the wire and in the catalog files.
    pub fn id(self) -> &'static str {
        match self {
            EmotionAxis::Happy => "happy",
            EmotionAxis::Sad => "sad",
            EmotionAxis::Excited => "excited",
            EmotionAxis::Romantic => "romantic",
            EmotionAxis::Angry => "angry",
            EmotionAxis::Peaceful => "peaceful",
            EmotionAxis::Curious => "curious",
            EmotionAxis::Nostalgic => "nostalgic",
            EmotionAxis::Adventurous => "adventurous",
            EmotionAxis::Hopeful => "hopeful",
            EmotionAxis::Thoughtful => "thoughtful",
            EmotionAxis::Energetic => "energetic",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            EmotionAxis::Happy => "Happy",
            EmotionAxis::Sad => "Sad",
            EmotionAxis::Excited => "Excited",
            EmotionAxis::Romantic => "Romantic",
            EmotionAxis::Angry => "Angry",
            EmotionAxis::Peaceful => "Peaceful",
            EmotionAxis::Curious => "Curious",
            EmotionAxis::Nostalgic => "Nostalgic",
            EmotionAxis::Adventurous => "Adventurous",
            EmotionAxis::Hopeful => "Hopeful",
            EmotionAxis::Thoughtful => "Thoughtful",
            EmotionAxis::Energetic => "Energetic",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            EmotionAxis::Happy => "Feeling joyful and positive",
            EmotionAxis::Sad => "Feeling melancholic or down",
            EmotionAxis::Excited => "Feeling energetic and thrilled",
            EmotionAxis::Romantic => "Feeling loving and affectionate",
            EmotionAxis::Angry => "Feeling frustrated or mad",
            EmotionAxis::Peaceful => "Feeling calm and serene",
            EmotionAxis::Curious => "Feeling inquisitive and wondering",
            EmotionAxis::Nostalgic => "Feeling sentimental about the past",
            EmotionAxis::Adventurous => "Feeling ready for exploration",
            EmotionAxis::Hopeful => "Feeling optimistic about the future",
            EmotionAxis::Thoughtful => "Feeling contemplative and reflective",
            EmotionAxis::Energetic => "Feeling full of energy and vitality",
        }
    }
}

impl fmt::Display for EmotionAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAxis(pub String);

impl fmt::Display for UnknownAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown mood: {}", self.0)
    }
}

impl std::error::Error for UnknownAxis {}

impl FromStr for EmotionAxis {
    type Err = UnknownAxis;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|axis| axis.id().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownAxis(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_order_is_the_dense_vector_contract() {
        let ids: Vec<&str> = EmotionAxis::ALL.iter().map(|a| a.id()).collect();
        assert_eq!(
            ids,
            vec![
                "happy",
                "sad",
                "excited",
                "romantic",
                "angry",
                "peaceful",
                "curious",
                "nostalgic",
                "adventurous",
                "hopeful",
                "thoughtful",
                "energetic"
            ]
        );
        for (i, axis) in EmotionAxis::ALL.iter().enumerate() {
            assert_eq!(axis.index(), i);
            assert_eq!(EmotionAxis::from_index(i), Some(*axis));
        }
        assert_eq!(EmotionAxis::from_index(AXIS_COUNT), None);
    }

    #[test]
    fn parses_ids_case_insensitively() {
        assert_eq!("happy".parse::<EmotionAxis>(), Ok(EmotionAxis::Happy));
        assert_eq!(" Nostalgic ".parse::<EmotionAxis>(), Ok(EmotionAxis::Nostalgic));
        assert!("grumpy".parse::<EmotionAxis>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_ids() {
        let json = serde_json::to_string(&EmotionAxis::Adventurous).unwrap();
        assert_eq!(json, "\"adventurous\"");
        let axis: EmotionAxis = serde_json::from_str("\"peaceful\"").unwrap();
        assert_eq!(axis, EmotionAxis::Peaceful);
    }
}
