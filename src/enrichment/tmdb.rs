//! TMDB (The Movie Database) detail lookup.

use super::{DetailEnricher, EnrichmentError, MovieDetails};
use crate::catalog::CatalogVector;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Two-step lookup: search by title and release year, then fetch the full
/// record of the first hit.
pub struct TmdbEnricher {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct TmdbMovie {
    id: u64,
    title: String,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    vote_average: f64,
    #[serde(default)]
    genres: Vec<TmdbGenre>,
}

#[derive(Debug, Deserialize)]
struct TmdbGenre {
    name: String,
}

impl From<TmdbMovie> for MovieDetails {
    fn from(movie: TmdbMovie) -> Self {
        MovieDetails {
            id: movie.id,
            title: movie.title,
            overview: movie.overview.unwrap_or_default(),
            poster_path: movie.poster_path,
            release_date: movie.release_date.unwrap_or_default(),
            vote_average: movie.vote_average,
            genres: movie.genres.into_iter().map(|g| g.name).collect(),
        }
    }
}

impl TmdbEnricher {
    /// # Arguments
    /// * `api_key` - TMDB v3 API key.
    /// * `base_url` - API root, without trailing slash (e.g. [`DEFAULT_TMDB_BASE_URL`]).
    /// * `timeout` - Per HTTP call.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, EnrichmentError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn search_url(&self, title: &str, year: i32) -> String {
        format!(
            "{}/search/movie?api_key={}&query={}&year={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(title),
            year
        )
    }

    fn details_url(&self, id: u64) -> String {
        format!(
            "{}/movie/{}?api_key={}",
            self.base_url,
            id,
            urlencoding::encode(&self.api_key)
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, EnrichmentError> {
        let response = self.client.get(url).send().await?;
        let response = check_status(response).await?;
        response.json().await.map_err(|e| {
            EnrichmentError::InvalidResponse(format!("Failed to parse TMDB response: {}", e))
        })
    }
}

async fn check_status(response: Response) -> Result<Response, EnrichmentError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(EnrichmentError::Api {
        status: status.as_u16(),
        message: body,
    })
}

#[async_trait]
impl DetailEnricher for TmdbEnricher {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn lookup(&self, entry: &CatalogVector) -> Result<Option<MovieDetails>, EnrichmentError> {
        debug!(title = %entry.title, year = entry.release_year, "Searching TMDB");

        let search: SearchResponse = self
            .get_json(&self.search_url(&entry.title, entry.release_year))
            .await?;
        debug!(
            title = %entry.title,
            results = search.results.len(),
            "TMDB search complete"
        );

        let Some(first) = search.results.into_iter().next() else {
            return Ok(None);
        };

        let movie: TmdbMovie = self.get_json(&self.details_url(first.id)).await.map_err(|e| {
            warn!(title = %entry.title, id = first.id, "TMDB details failed: {}", e);
            e
        })?;
        Ok(Some(movie.into()))
    }
}
