//! Bounded jitter so repeated identical requests do not always come back in
//! the same order.

use super::random::RandomSource;
use super::ranking::ScoredCandidate;

pub const JITTER_AMPLITUDE: f64 = 0.05;

/// Re-sorts by `effective_similarity + jitter`, descending, with one
/// independent jitter draw in `[-0.05, 0.05)` per candidate.
pub fn stabilize(
    candidates: Vec<ScoredCandidate>,
    rng: &mut dyn RandomSource,
) -> Vec<ScoredCandidate> {
    let mut keyed: Vec<(f64, ScoredCandidate)> = candidates
        .into_iter()
        .map(|c| {
            let jitter = rng.uniform(-JITTER_AMPLITUDE, JITTER_AMPLITUDE);
            (c.effective_similarity + jitter, c)
        })
        .collect();
    keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
    keyed.into_iter().map(|(_, c)| c).collect()
}
