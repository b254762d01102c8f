//! Weighted, axis-masked cosine similarity between a user mood and a
//! catalog vector.

use crate::catalog::CatalogVector;
use crate::mood::{AxisArray, UserMoodVector, AXIS_COUNT, MAX_INTENSITY};

pub const SELECTED_AXIS_WEIGHT: f64 = 2.5;
pub const UNSELECTED_AXIS_WEIGHT: f64 = 0.3;

/// Normalized catalog value above which an unselected axis is damped.
pub const STRONG_UNSELECTED_THRESHOLD: f64 = 0.6;
pub const STRONG_UNSELECTED_DAMPING: f64 = 0.5;

/// Catalog vector scaled from 0-10 to 0-1.
pub fn normalize_catalog(vector: &AxisArray) -> AxisArray {
    vector.map(|v| v / MAX_INTENSITY)
}

pub fn axis_weight(selected: bool, movie_value: f64) -> f64 {
    if selected {
        SELECTED_AXIS_WEIGHT
    } else if movie_value > STRONG_UNSELECTED_THRESHOLD {
        UNSELECTED_AXIS_WEIGHT * STRONG_UNSELECTED_DAMPING
    } else {
        UNSELECTED_AXIS_WEIGHT
    }
}

pub fn axis_weights(mask: &[bool; AXIS_COUNT], movie: &AxisArray) -> AxisArray {
    std::array::from_fn(|i| axis_weight(mask[i], movie[i]))
}

/// Cosine similarity under per-axis weights. Degenerate (zero-magnitude)
/// inputs score 0.
pub fn weighted_cosine(user: &AxisArray, movie: &AxisArray, weights: &AxisArray) -> f64 {
    let (dot, user_sq, movie_sq) = (0..AXIS_COUNT).fold((0.0, 0.0, 0.0), |(d, u, m), i| {
        let w = weights[i];
        (
            d + w * user[i] * movie[i],
            u + w * user[i] * user[i],
            m + w * movie[i] * movie[i],
        )
    });

    if user_sq == 0.0 || movie_sq == 0.0 {
        return 0.0;
    }
    (dot / (user_sq * movie_sq).sqrt()).clamp(-1.0, 1.0)
}

/// Raw (pre-penalty) similarity of `movie` to `user`, in [-1, 1].
pub fn score(user: &UserMoodVector, movie: &CatalogVector) -> f64 {
    let movie = normalize_catalog(&movie.vector);
    let weights = axis_weights(&user.mask(), &movie);
    weighted_cosine(&user.normalized(), &movie, &weights)
}
