//! Human-readable justification for a recommendation.

use crate::mood::RecommendationMode;

pub const HIGHLY_RATED: f64 = 7.5;
pub const WELL_RATED: f64 = 6.5;

/// Bucket floors, checked in order with a strict `>`; anything at or below
/// the last one lands in the final bucket.
const BUCKET_FLOORS: [i64; 4] = [90, 80, 70, 60];

const MATCH_PHRASES: [&str; 5] = [
    "Perfect emotional match!",
    "Strong emotional resonance",
    "Matches your emotional state",
    "Similar emotional tone",
    "Emotionally aligned",
];

const CHANGE_PHRASES: [&str; 5] = [
    "Will transform your mood completely!",
    "Perfect for mood change",
    "Will shift your emotions",
    "Can change your perspective",
    "May alter your mood",
];

pub fn rating_suffix(rating: f64) -> &'static str {
    if rating >= HIGHLY_RATED {
        " (Highly Rated!)"
    } else if rating >= WELL_RATED {
        " (Well Rated)"
    } else {
        ""
    }
}

/// Index into the phrase tables for a similarity percentage.
pub fn bucket(percentage: i64) -> usize {
    BUCKET_FLOORS
        .iter()
        .position(|floor| percentage > *floor)
        .unwrap_or(BUCKET_FLOORS.len())
}

pub fn reason(effective_similarity: f64, mode: RecommendationMode, rating: f64) -> String {
    let percentage = (effective_similarity * 100.0).round() as i64;
    let phrases = match mode {
        RecommendationMode::Match => &MATCH_PHRASES,
        RecommendationMode::Change => &CHANGE_PHRASES,
    };
    format!("{}{}", phrases[bucket(percentage)], rating_suffix(rating))
}
