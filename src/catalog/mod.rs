//! The catalog of emotionally-profiled titles the engine ranks.
//!
//! Catalog entries reach the engine already validated: every vector has
//! exactly [`AXIS_COUNT`](crate::mood::AXIS_COUNT) components.

mod csv_provider;

pub use csv_provider::CsvCatalogProvider;

use crate::mood::AxisArray;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// A catalog title with its dense emotional profile on a 0-10 scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogVector {
    pub title: String,
    pub release_year: i32,
    pub vector: AxisArray,
    pub rating: Option<f64>,
}

impl CatalogVector {
    pub fn new(title: impl Into<String>, release_year: i32, vector: AxisArray) -> Self {
        Self {
            title: title.into(),
            release_year,
            vector,
            rating: None,
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog file not found at path: {0:?}")]
    NotFound(PathBuf),

    #[error("Failed to read catalog: {0}")]
    Csv(#[from] csv::Error),

    #[error("Catalog is missing required column: {0}")]
    MissingColumn(String),
}

/// Supplies the full, ordered catalog for one request.
pub trait CatalogProvider: Send + Sync {
    fn load(&self) -> Result<Arc<Vec<CatalogVector>>, CatalogError>;
}

/// A fixed catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogProvider {
    entries: Arc<Vec<CatalogVector>>,
}

impl InMemoryCatalogProvider {
    pub fn new(entries: Vec<CatalogVector>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }
}

impl CatalogProvider for InMemoryCatalogProvider {
    fn load(&self) -> Result<Arc<Vec<CatalogVector>>, CatalogError> {
        Ok(self.entries.clone())
    }
}
