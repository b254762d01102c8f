use super::{DetailEnricher, EnrichmentError, MovieDetails};
use crate::catalog::CatalogVector;
use crate::engine::ranking::DEFAULT_RATING;
use async_trait::async_trait;

/// Builds details from the catalog entry alone, for running without a
/// movie database API key.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogOnlyEnricher;

impl CatalogOnlyEnricher {
    pub fn details_for(entry: &CatalogVector) -> MovieDetails {
        MovieDetails {
            id: 0,
            title: entry.title.clone(),
            overview: String::new(),
            poster_path: None,
            release_date: entry.release_year.to_string(),
            vote_average: entry.rating.unwrap_or(DEFAULT_RATING),
            genres: Vec::new(),
        }
    }
}

#[async_trait]
impl DetailEnricher for CatalogOnlyEnricher {
    fn name(&self) -> &str {
        "catalog"
    }

    async fn lookup(&self, entry: &CatalogVector) -> Result<Option<MovieDetails>, EnrichmentError> {
        Ok(Some(Self::details_for(entry)))
    }
}
