//! Catalog loading from the emotion-vector CSV export.

use super::{CatalogError, CatalogProvider, CatalogVector};
use crate::mood::{AxisArray, AXIS_COUNT};
use chrono::Datelike;
use csv::StringRecord;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

const TITLE_COLUMN: &str = "title";
const YEAR_COLUMN: &str = "release_year";
const VECTOR_COLUMN: &str = "emotion_vector";
const RATING_COLUMN: &str = "vote_average";

const MIN_RELEASE_YEAR: i32 = 1900;
const MAX_YEARS_AHEAD: i32 = 5;

/// Reads the catalog from a CSV file with `title`, `release_year`,
/// `emotion_vector` and an optional `vote_average` column.
///
/// With caching enabled the first successful read is reused for every later
/// request. Failed reads are never cached.
pub struct CsvCatalogProvider {
    path: PathBuf,
    cache_enabled: bool,
    cached: Mutex<Option<Arc<Vec<CatalogVector>>>>,
}

struct ColumnIndices {
    title: usize,
    year: usize,
    vector: usize,
    rating: Option<usize>,
}

impl CsvCatalogProvider {
    pub fn new<P: AsRef<Path>>(path: P, cache_enabled: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache_enabled,
            cached: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<CatalogVector>, CatalogError> {
        if !self.path.is_file() {
            return Err(CatalogError::NotFound(self.path.clone()));
        }
        info!("Reading catalog from {:?}", self.path);

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)?;
        let columns = find_columns(reader.headers()?)?;
        let max_year = chrono::Utc::now().year() + MAX_YEARS_AHEAD;

        let mut entries = Vec::new();
        let mut skipped = 0usize;
        for (line, record) in reader.records().enumerate() {
            let record = record?;
            match parse_record(&record, &columns, line + 2, max_year) {
                Some(entry) => entries.push(entry),
                None => skipped += 1,
            }
        }

        info!(
            "Catalog read complete, {} valid vectors ({} rows skipped)",
            entries.len(),
            skipped
        );
        Ok(entries)
    }
}

impl CatalogProvider for CsvCatalogProvider {
    fn load(&self) -> Result<Arc<Vec<CatalogVector>>, CatalogError> {
        if !self.cache_enabled {
            return self.read_all().map(Arc::new);
        }

        let mut cached = self.cached.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(entries) = cached.as_ref() {
            return Ok(entries.clone());
        }
        let entries = Arc::new(self.read_all()?);
        *cached = Some(entries.clone());
        Ok(entries)
    }
}

fn find_columns(headers: &StringRecord) -> Result<ColumnIndices, CatalogError> {
    let position = |name: &str| headers.iter().position(|h| h == name);
    let required =
        |name: &str| position(name).ok_or_else(|| CatalogError::MissingColumn(name.to_string()));

    Ok(ColumnIndices {
        title: required(TITLE_COLUMN)?,
        year: required(YEAR_COLUMN)?,
        vector: required(VECTOR_COLUMN)?,
        rating: position(RATING_COLUMN),
    })
}

fn parse_record(
    record: &StringRecord,
    columns: &ColumnIndices,
    line: usize,
    max_year: i32,
) -> Option<CatalogVector> {
    let title = record.get(columns.title)?.to_string();

    let vector = match parse_emotion_vector(record.get(columns.vector)?) {
        Some(vector) => vector,
        None => {
            debug!("Skipping line {}: emotion vector must have {} values", line, AXIS_COUNT);
            return None;
        }
    };

    let raw_year = record.get(columns.year).unwrap_or_default();
    let release_year = match parse_release_year(raw_year, max_year) {
        Some(year) => year,
        None => {
            warn!("Invalid release year at line {}: {:?}", line, raw_year);
            return None;
        }
    };

    let rating = columns
        .rating
        .and_then(|i| record.get(i))
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|r| r.is_finite());

    Some(CatalogVector {
        title,
        release_year,
        vector,
        rating,
    })
}

/// Parses `"[1.0, 2, x]"`-style lists. Entries that are not numbers count
/// as zero; a list of the wrong length is rejected.
pub(crate) fn parse_emotion_vector(raw: &str) -> Option<AxisArray> {
    let values: Vec<f64> = raw
        .replace(['[', ']'], "")
        .split(',')
        .map(|n| n.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0))
        .collect();
    values.try_into().ok()
}

/// Accepts integral years written as `1999` or `1999.0`.
pub(crate) fn parse_release_year(raw: &str, max_year: i32) -> Option<i32> {
    let whole = raw.trim().split('.').next()?;
    let year = whole.parse::<i32>().ok()?;
    (MIN_RELEASE_YEAR..=max_year).contains(&year).then_some(year)
}
