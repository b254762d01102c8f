//! The recommendation pipeline.
//!
//! One request runs: catalog load, scoring with opposite-axis penalty,
//! threshold filter and sort ([`ranking`]), tiered sampling ([`sampler`]),
//! jitter ([`stabilizer`]), page slicing ([`pagination`]), and finally the
//! concurrent detail lookup for the titles on the page.

pub mod pagination;
pub mod penalty;
pub mod random;
pub mod ranking;
pub mod reason;
pub mod sampler;
pub mod scorer;
pub mod stabilizer;

use crate::catalog::{CatalogError, CatalogProvider};
use crate::enrichment::{DetailEnricher, EnrichmentError, MovieDetails};
use crate::mood::{EmotionAxis, RecommendationMode, UserMoodVector};
use futures::future::join_all;
use pagination::{paginate, PageRequest};
use random::RandomSource;
use ranking::ScoredCandidate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(#[from] CatalogError),
}

/// A validated recommendation request.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationQuery {
    pub mood: UserMoodVector,
    pub mode: RecommendationMode,
    pub page: PageRequest,
}

/// The page slice, before enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPage {
    pub candidates: Vec<ScoredCandidate>,
    pub has_more: bool,
    /// Length of the full stabilized sequence.
    pub total: usize,
    pub catalog_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecommendation {
    pub movie: MovieDetails,
    pub score: f64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub movies: Vec<MovieRecommendation>,
    pub mode: RecommendationMode,
    pub moods: BTreeMap<EmotionAxis, f64>,
    pub has_more: bool,
}

/// How each lookup on a page resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentStats {
    pub hits: usize,
    pub misses: usize,
    pub failures: usize,
    pub timeouts: usize,
}

impl EnrichmentStats {
    pub fn dropped(&self) -> usize {
        self.misses + self.failures + self.timeouts
    }
}

#[derive(Debug)]
enum LookupOutcome {
    Hit(MovieDetails),
    Miss,
    Failed(EnrichmentError),
    TimedOut,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub response: RecommendationResponse,
    pub enrichment: EnrichmentStats,
    pub catalog_size: usize,
}

pub struct Recommender {
    catalog: Arc<dyn CatalogProvider>,
    enricher: Arc<dyn DetailEnricher>,
    enrichment_timeout: Duration,
}

impl Recommender {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        enricher: Arc<dyn DetailEnricher>,
        enrichment_timeout: Duration,
    ) -> Self {
        Self {
            catalog,
            enricher,
            enrichment_timeout,
        }
    }

    pub fn catalog(&self) -> &Arc<dyn CatalogProvider> {
        &self.catalog
    }

    /// Everything up to and including page slicing. Deterministic for a
    /// given catalog and random source.
    pub fn rank_page(
        &self,
        query: &RecommendationQuery,
        rng: &mut dyn RandomSource,
    ) -> Result<RankedPage, EngineError> {
        let catalog = self.catalog.load()?;
        let effective = query.mood.effective(query.mode);

        let ranked = ranking::rank(&effective, &catalog);
        debug!(
            catalog = catalog.len(),
            passing = ranked.len(),
            mode = query.mode.as_str(),
            "Ranked catalog"
        );

        let sampled = sampler::sample(ranked, rng);
        let stabilized = stabilizer::stabilize(sampled, rng);
        let page = paginate(stabilized, query.page);
        debug!(
            page = query.page.number(),
            total = page.total,
            on_page = page.items.len(),
            has_more = page.has_more,
            "Sliced page"
        );

        Ok(RankedPage {
            candidates: page.items,
            has_more: page.has_more,
            total: page.total,
            catalog_size: catalog.len(),
        })
    }

    /// Looks up every candidate concurrently and keeps the ones that
    /// resolved, in page order.
    pub async fn enrich_page(
        &self,
        candidates: &[ScoredCandidate],
        mode: RecommendationMode,
    ) -> (Vec<MovieRecommendation>, EnrichmentStats) {
        let lookups = candidates.iter().map(|candidate| async move {
            let lookup = self.enricher.lookup(&candidate.entry);
            match tokio::time::timeout(self.enrichment_timeout, lookup).await {
                Ok(Ok(Some(details))) => LookupOutcome::Hit(details),
                Ok(Ok(None)) => LookupOutcome::Miss,
                Ok(Err(e)) => LookupOutcome::Failed(e),
                Err(_) => LookupOutcome::TimedOut,
            }
        });
        let outcomes = join_all(lookups).await;

        let mut stats = EnrichmentStats::default();
        let resolved: Vec<Option<MovieRecommendation>> = candidates
            .iter()
            .zip(outcomes)
            .map(|(candidate, outcome)| match outcome {
                LookupOutcome::Hit(details) => {
                    stats.hits += 1;
                    Some(recommendation_for(candidate, details, mode))
                }
                LookupOutcome::Miss => {
                    stats.misses += 1;
                    debug!(title = %candidate.entry.title, "No details found, dropping");
                    None
                }
                LookupOutcome::Failed(e) => {
                    stats.failures += 1;
                    warn!(title = %candidate.entry.title, "Detail lookup failed: {}", e);
                    None
                }
                LookupOutcome::TimedOut => {
                    stats.timeouts += 1;
                    warn!(title = %candidate.entry.title, "Detail lookup timed out");
                    None
                }
            })
            .collect();

        (resolved.into_iter().flatten().collect(), stats)
    }

    pub async fn recommend(
        &self,
        query: RecommendationQuery,
        rng: &mut dyn RandomSource,
    ) -> Result<Recommendation, EngineError> {
        let page = self.rank_page(&query, rng)?;
        let (movies, enrichment) = self.enrich_page(&page.candidates, query.mode).await;
        if enrichment.dropped() > 0 {
            debug!(
                dropped = enrichment.dropped(),
                returned = movies.len(),
                enricher = self.enricher.name(),
                "Page shrunk by enrichment"
            );
        }

        Ok(Recommendation {
            response: RecommendationResponse {
                movies,
                mode: query.mode,
                moods: query.mood.to_map(),
                has_more: page.has_more,
            },
            enrichment,
            catalog_size: page.catalog_size,
        })
    }
}

/// The reason is judged on the looked-up rating, while the score keeps the
/// catalog rating it was ranked with.
fn recommendation_for(
    candidate: &ScoredCandidate,
    details: MovieDetails,
    mode: RecommendationMode,
) -> MovieRecommendation {
    let reason = reason::reason(candidate.effective_similarity, mode, details.vote_average);
    MovieRecommendation {
        movie: details,
        score: candidate.final_score,
        reason,
    }
}
