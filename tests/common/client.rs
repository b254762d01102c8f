//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per server endpoint.
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    // ========================================================================
    // Endpoints
    // ========================================================================

    pub async fn get_home(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Home request failed")
    }

    pub async fn get_moods(&self) -> Response {
        self.client
            .get(format!("{}/api/moods", self.base_url))
            .send()
            .await
            .expect("Moods request failed")
    }

    /// Posts a raw JSON body to the recommendations endpoint.
    pub async fn post_recommendations(&self, body: Value) -> Response {
        self.client
            .post(format!("{}/api/recommendations", self.base_url))
            .json(&body)
            .send()
            .await
            .expect("Recommendations request failed")
    }

    /// Requests a page for the given moods and mode, returning the parsed body.
    ///
    /// # Panics
    ///
    /// Panics if the server does not answer 200.
    pub async fn recommend(&self, moods: Value, mode: &str, page: u32) -> Value {
        let response = self
            .post_recommendations(json!({ "moods": moods, "mode": mode, "page": page }))
            .await;
        assert_eq!(
            response.status(),
            reqwest::StatusCode::OK,
            "Recommendation failed"
        );
        response.json().await.expect("Invalid recommendations JSON")
    }
}

/// Titles of the movies in a recommendations body, in order.
pub fn titles(body: &Value) -> Vec<String> {
    body["movies"]
        .as_array()
        .map(|movies| {
            movies
                .iter()
                .filter_map(|m| m["movie"]["title"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
