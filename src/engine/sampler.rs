//! Tiered selection: the head of the ranking is kept as-is, the tail is
//! sampled by weight for variety.

use super::random::RandomSource;
use super::ranking::ScoredCandidate;

/// Share of the ranking (numerator over 10) kept unconditionally.
const GUARANTEED_TENTHS: usize = 3;

/// Upper bound on how many tail candidates are sampled.
pub const MAX_SAMPLED: usize = 70;

/// `floor(0.3 * n)`, in integer arithmetic.
pub fn guaranteed_tier_size(ranked: usize) -> usize {
    ranked * GUARANTEED_TENTHS / 10
}

/// Draw weight of a candidate; squaring sharpens the preference for high
/// scores.
pub fn sampling_weight(candidate: &ScoredCandidate) -> f64 {
    candidate.final_score * candidate.final_score
}

/// Keeps the guaranteed tier in order, then appends up to [`MAX_SAMPLED`]
/// candidates drawn from the rest.
pub fn sample(
    mut ranked: Vec<ScoredCandidate>,
    rng: &mut dyn RandomSource,
) -> Vec<ScoredCandidate> {
    let remaining = ranked.split_off(guaranteed_tier_size(ranked.len()));
    let count = MAX_SAMPLED.min(remaining.len());
    let sampled = weighted_sample(remaining, count, sampling_weight, rng);
    ranked.extend(sampled);
    ranked
}

/// Weighted sampling without replacement.
///
/// Each round draws `u * total` and walks the pool, in its current order,
/// until the cumulative weight reaches the draw. The pool keeps its
/// relative order as items are removed, so a fixed random source always
/// yields the same selection.
pub fn weighted_sample<T, W>(
    mut pool: Vec<T>,
    count: usize,
    weight: W,
    rng: &mut dyn RandomSource,
) -> Vec<T>
where
    W: Fn(&T) -> f64,
{
    let mut selected = Vec::with_capacity(count.min(pool.len()));
    while selected.len() < count && !pool.is_empty() {
        let total: f64 = pool.iter().map(&weight).sum();
        let draw = rng.next_unit() * total;

        let mut cumulative = 0.0;
        let chosen = pool
            .iter()
            .position(|item| {
                cumulative += weight(item);
                cumulative >= draw
            })
            .unwrap_or(pool.len() - 1);

        selected.push(pool.remove(chosen));
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogVector;
    use crate::engine::random::{ConstantRandom, RngSource};
    use crate::mood::AXIS_COUNT;

    fn ranked(n: usize) -> Vec<ScoredCandidate> {
        (0..n)
            .map(|i| {
                let score = 1.0 - i as f64 / (n as f64 * 2.0);
                ScoredCandidate {
                    entry: CatalogVector::new(format!("m{}", i), 2000, [0.0; AXIS_COUNT]),
                    raw_similarity: score,
                    effective_similarity: score,
                    final_score: score,
                }
            })
            .collect()
    }

    #[test]
    fn test_guaranteed_tier_size() {
        assert_eq!(guaranteed_tier_size(0), 0);
        assert_eq!(guaranteed_tier_size(3), 0);
        assert_eq!(guaranteed_tier_size(4), 1);
        assert_eq!(guaranteed_tier_size(10), 3);
        assert_eq!(guaranteed_tier_size(20), 6);
        assert_eq!(guaranteed_tier_size(1000), 300);
    }

    #[test]
    fn test_guaranteed_tier_is_the_ranked_prefix() {
        for n in [1, 5, 17, 40, 200, 333] {
            let input = ranked(n);
            let mut rng = RngSource::seeded(n as u64);
            let output = sample(input.clone(), &mut rng);

            let head = guaranteed_tier_size(n);
            assert_eq!(&output[..head], &input[..head], "n = {}", n);
            assert_eq!(output.len(), head + MAX_SAMPLED.min(n - head));
        }
    }

    #[test]
    fn test_sampling_never_duplicates() {
        let input = ranked(300);
        let output = sample(input, &mut RngSource::seeded(7));
        let mut titles: Vec<&str> = output.iter().map(|c| c.entry.title.as_str()).collect();
        let before = titles.len();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), before);
        assert_eq!(before, 90 + 70);
    }

    #[test]
    fn test_small_tail_is_taken_whole() {
        let input = ranked(10);
        let output = sample(input.clone(), &mut RngSource::seeded(1));
        let mut got: Vec<&str> = output.iter().map(|c| c.entry.title.as_str()).collect();
        let mut expected: Vec<&str> = input.iter().map(|c| c.entry.title.as_str()).collect();
        got.sort();
        expected.sort();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_zero_draw_takes_pool_in_order() {
        let mut rng = ConstantRandom(0.0);
        let picked = weighted_sample(vec![1.0, 2.0, 3.0], 2, |w: &f64| *w, &mut rng);
        assert_eq!(picked, vec![1.0, 2.0]);
    }

    #[test]
    fn test_draw_walks_cumulative_weight() {
        // total 10, draw 0.55 * 10 = 5.5: cumulative 1, 3, 6 -> third item.
        let mut rng = ConstantRandom(0.55);
        let picked = weighted_sample(vec![1.0, 2.0, 3.0, 4.0], 1, |w: &f64| *w, &mut rng);
        assert_eq!(picked, vec![3.0]);
    }

    #[test]
    fn test_total_weight_shrinks_after_each_pick() {
        // Round 1: total 10, draw 9.9 -> 4.0. Round 2: total 6, draw 5.94 -> 3.0.
        let mut rng = ConstantRandom(0.99);
        let picked = weighted_sample(vec![1.0, 2.0, 3.0, 4.0], 2, |w: &f64| *w, &mut rng);
        assert_eq!(picked, vec![4.0, 3.0]);
    }

    #[test]
    fn test_zero_weights_pick_first() {
        let picked = weighted_sample(vec!['a', 'b'], 1, |_| 0.0, &mut ConstantRandom(0.7));
        assert_eq!(picked, vec!['a']);
    }

    #[test]
    fn test_constant_source_is_deterministic() {
        let input = ranked(150);
        let a = sample(input.clone(), &mut ConstantRandom(0.42));
        let b = sample(input, &mut ConstantRandom(0.42));
        assert_eq!(a, b);
    }
}
