//! Per-title metadata lookup against an external movie database.
//!
//! Enrichment runs only for the titles on the requested page. A lookup that
//! misses or fails drops the title from the response; it never fails the
//! whole request.

mod catalog_only;
mod tmdb;

pub use catalog_only::CatalogOnlyEnricher;
pub use tmdb::{TmdbEnricher, DEFAULT_TMDB_BASE_URL};

use crate::catalog::CatalogVector;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rich metadata for one title, in the shape the frontend renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub release_date: String,
    pub vote_average: f64,
    pub genres: Vec<String>,
}

/// Errors that can occur while looking up a title.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timeout")]
    Timeout,
}

impl From<reqwest::Error> for EnrichmentError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            EnrichmentError::Timeout
        } else if e.is_decode() {
            EnrichmentError::InvalidResponse(e.to_string())
        } else {
            EnrichmentError::Connection(e.to_string())
        }
    }
}

/// Looks up metadata for a catalog title.
///
/// `Ok(None)` means the provider has no match for the title, which the
/// engine treats like a failure: the title is left out of the page.
#[async_trait]
pub trait DetailEnricher: Send + Sync {
    fn name(&self) -> &str;

    async fn lookup(&self, entry: &CatalogVector) -> Result<Option<MovieDetails>, EnrichmentError>;
}
