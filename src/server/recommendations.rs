//! `POST /api/recommendations`: request validation and error mapping
//! around the engine.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, error, info};

use super::metrics;
use super::state::GuardedRecommender;
use crate::engine::pagination::PageRequest;
use crate::engine::random::RngSource;
use crate::engine::RecommendationQuery;
use crate::mood::{MoodError, RecommendationMode, UserMoodVector};

const INVALID_REQUEST: &str = "Invalid request data";

#[derive(Deserialize, Debug)]
pub struct RecommendationRequest {
    pub moods: HashMap<String, f64>,
    #[serde(default, alias = "recommendationType")]
    pub mode: RecommendationMode,
    #[serde(default = "first_page")]
    pub page: i64,
}

fn first_page() -> i64 {
    1
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error(transparent)]
    Mood(#[from] MoodError),

    #[error("Page must be a positive integer, got {0}")]
    InvalidPage(i64),
}

impl RecommendationRequest {
    pub fn validate(&self) -> Result<RecommendationQuery, ValidationError> {
        let mood = UserMoodVector::from_named(self.moods.iter().map(|(k, v)| (k.as_str(), *v)))?;
        let page = u32::try_from(self.page)
            .ok()
            .and_then(PageRequest::new)
            .ok_or(ValidationError::InvalidPage(self.page))?;
        Ok(RecommendationQuery {
            mood,
            mode: self.mode,
            page,
        })
    }
}

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

fn error_response(status: StatusCode, error: impl Into<String>, details: Option<String>) -> Response {
    let body = ErrorBody {
        success: false,
        error: error.into(),
        details,
    };
    (status, Json(body)).into_response()
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        match self {
            ValidationError::Mood(MoodError::Empty) => {
                error_response(StatusCode::BAD_REQUEST, MoodError::Empty.to_string(), None)
            }
            other => error_response(StatusCode::BAD_REQUEST, INVALID_REQUEST, Some(other.to_string())),
        }
    }
}

pub async fn post_recommendations(
    State(recommender): State<GuardedRecommender>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!("Rejected recommendation body: {}", rejection.body_text());
            return error_response(
                StatusCode::BAD_REQUEST,
                INVALID_REQUEST,
                Some(rejection.body_text()),
            );
        }
    };

    let query = match request.validate() {
        Ok(query) => query,
        Err(e) => {
            debug!("Invalid recommendation request: {}", e);
            metrics::record_recommendation(request.mode, "invalid");
            return e.into_response();
        }
    };

    let mode = query.mode;
    let page = query.page.number();
    let mut rng = RngSource::from_entropy();
    match recommender.recommend(query, &mut rng).await {
        Ok(recommendation) => {
            metrics::record_recommendation(mode, "ok");
            metrics::record_enrichment(&recommendation.enrichment);
            metrics::set_catalog_size(recommendation.catalog_size);
            info!(
                mode = mode.as_str(),
                page,
                returned = recommendation.response.movies.len(),
                has_more = recommendation.response.has_more,
                "Served recommendations"
            );
            Json(recommendation.response).into_response()
        }
        Err(e) => {
            error!("Recommendation failed: {}", e);
            metrics::record_recommendation(mode, "error");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), None)
        }
    }
}
