//! Threshold filtering, rating blend and the primary/secondary sort order.

use super::{penalty, scorer};
use crate::catalog::CatalogVector;
use crate::mood::{UserMoodVector, MAX_INTENSITY};
use serde::Serialize;
use std::cmp::Ordering;

pub const SIMILARITY_WEIGHT: f64 = 0.7;
pub const RATING_WEIGHT: f64 = 0.3;
pub const DEFAULT_RATING: f64 = 5.0;

/// Candidates must have an effective similarity strictly above this.
pub const SIMILARITY_THRESHOLD: f64 = 0.5;

/// Effective similarities this close are ordered by final score instead.
pub const TIE_TOLERANCE: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub entry: CatalogVector,
    pub raw_similarity: f64,
    pub effective_similarity: f64,
    pub final_score: f64,
}

pub fn final_score(effective_similarity: f64, rating: Option<f64>) -> f64 {
    let rating = rating.unwrap_or(DEFAULT_RATING);
    SIMILARITY_WEIGHT * effective_similarity + RATING_WEIGHT * (rating / MAX_INTENSITY)
}

pub fn score_candidate(user: &UserMoodVector, entry: &CatalogVector) -> ScoredCandidate {
    let raw_similarity = scorer::score(user, entry);
    let effective_similarity = raw_similarity * penalty::penalty(user, entry);
    ScoredCandidate {
        entry: entry.clone(),
        raw_similarity,
        effective_similarity,
        final_score: final_score(effective_similarity, entry.rating),
    }
}

pub fn passes_threshold(candidate: &ScoredCandidate) -> bool {
    candidate.effective_similarity > SIMILARITY_THRESHOLD
}

/// Similarity descending, unless the two are within [`TIE_TOLERANCE`], in
/// which case final score descending.
pub fn compare_candidates(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    if (a.effective_similarity - b.effective_similarity).abs() > TIE_TOLERANCE {
        b.effective_similarity.total_cmp(&a.effective_similarity)
    } else {
        b.final_score.total_cmp(&a.final_score)
    }
}

/// Scores the whole catalog, keeps the candidates above the threshold and
/// sorts them.
pub fn rank(user: &UserMoodVector, catalog: &[CatalogVector]) -> Vec<ScoredCandidate> {
    let passing: Vec<ScoredCandidate> = catalog
        .iter()
        .map(|entry| score_candidate(user, entry))
        .filter(passes_threshold)
        .collect();
    merge_sort_by(passing, &compare_candidates)
}

/// Stable top-down merge sort.
///
/// [`compare_candidates`] is not transitive, which the standard library
/// sorts are allowed to panic on. This only ever asks the comparator about
/// the two heads being merged.
pub(crate) fn merge_sort_by<T, F>(mut items: Vec<T>, compare: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort_by(items, compare);
    let right = merge_sort_by(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(r, l) == Ordering::Less,
            _ => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged.extend(left);
    merged.extend(right);
    merged
}
