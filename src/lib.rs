//! Moodreel server library
//!
//! Mood-driven movie recommendations: a catalog of 12-axis emotional
//! profiles is scored against the user's mood, sampled for variety and
//! paginated, and the page is enriched with details from a movie database.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod enrichment;
pub mod mood;
pub mod server;

// Re-export commonly used types for convenience
pub use catalog::{CatalogProvider, CatalogVector, CsvCatalogProvider, InMemoryCatalogProvider};
pub use engine::{RecommendationQuery, RecommendationResponse, Recommender};
pub use enrichment::{CatalogOnlyEnricher, DetailEnricher, MovieDetails, TmdbEnricher};
pub use mood::{EmotionAxis, RecommendationMode, UserMoodVector};
pub use server::{run_server, RequestsLoggingLevel};
