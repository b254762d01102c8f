use axum::{http::StatusCode, response::IntoResponse};
use lazy_static::lazy_static;
use prometheus::{
    CounterVec, Encoder, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};
use std::time::Duration;

use crate::engine::EnrichmentStats;
use crate::mood::RecommendationMode;

/// Metric name prefix for all moodreel metrics
const PREFIX: &str = "moodreel";

lazy_static! {
    // Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Request Metrics
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_http_requests_total"), "Total number of HTTP requests"),
        &["method", "path", "status"]
    ).expect("Failed to create http_requests_total metric");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_http_request_duration_seconds"),
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
        &["method", "path"]
    ).expect("Failed to create http_request_duration_seconds metric");

    // Recommendation Metrics
    pub static ref RECOMMENDATIONS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_recommendations_total"), "Recommendation requests by mode and outcome"),
        &["mode", "outcome"]
    ).expect("Failed to create recommendations_total metric");

    pub static ref ENRICHMENT_LOOKUPS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_enrichment_lookups_total"), "Detail lookups by outcome"),
        &["outcome"]
    ).expect("Failed to create enrichment_lookups_total metric");

    // Catalog Metrics
    pub static ref CATALOG_ITEMS_TOTAL: Gauge = Gauge::new(
        format!("{PREFIX}_catalog_items_total"),
        "Valid vectors in the last loaded catalog"
    ).expect("Failed to create catalog_items_total metric");
}

/// Initialize all metrics and register them with the Prometheus registry
pub fn init_metrics() {
    // Register all metrics - ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(RECOMMENDATIONS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(ENRICHMENT_LOOKUPS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(CATALOG_ITEMS_TOTAL.clone()));

    tracing::info!("Metrics system initialized successfully");
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration.as_secs_f64());
}

/// Record a finished recommendation request. `outcome` is one of
/// "ok", "invalid" or "error".
pub fn record_recommendation(mode: RecommendationMode, outcome: &str) {
    RECOMMENDATIONS_TOTAL
        .with_label_values(&[mode.as_str(), outcome])
        .inc();
}

pub fn record_enrichment(stats: &EnrichmentStats) {
    let outcomes = [
        ("hit", stats.hits),
        ("miss", stats.misses),
        ("failure", stats.failures),
        ("timeout", stats.timeouts),
    ];
    for (outcome, count) in outcomes {
        if count > 0 {
            ENRICHMENT_LOOKUPS_TOTAL
                .with_label_values(&[outcome])
                .inc_by(count as f64);
        }
    }
}

pub fn set_catalog_size(size: usize) {
    CATALOG_ITEMS_TOTAL.set(size as f64);
}

/// Collapses concrete paths into a bounded set of labels.
pub fn categorize_endpoint(path: &str) -> &'static str {
    match path {
        "/" => "home",
        "/api/recommendations" => "recommendations",
        "/api/moods" => "moods",
        p if p.starts_with("/api/") => "api_other",
        _ => "static",
    }
}

pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => {
            let response = String::from_utf8(buffer).unwrap_or_else(|_| String::from(""));
            (StatusCode::OK, response)
        }
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_endpoint() {
        assert_eq!(categorize_endpoint("/"), "home");
        assert_eq!(categorize_endpoint("/api/recommendations"), "recommendations");
        assert_eq!(categorize_endpoint("/api/moods"), "moods");
        assert_eq!(categorize_endpoint("/api/whatever"), "api_other");
        assert_eq!(categorize_endpoint("/assets/index.js"), "static");
    }

    #[test]
    fn test_record_enrichment_counts_outcomes() {
        init_metrics();
        let before_hits = ENRICHMENT_LOOKUPS_TOTAL.with_label_values(&["hit"]).get();
        let before_timeouts = ENRICHMENT_LOOKUPS_TOTAL.with_label_values(&["timeout"]).get();

        record_enrichment(&EnrichmentStats {
            hits: 3,
            misses: 0,
            failures: 1,
            timeouts: 2,
        });

        let hits = ENRICHMENT_LOOKUPS_TOTAL.with_label_values(&["hit"]).get();
        let timeouts = ENRICHMENT_LOOKUPS_TOTAL.with_label_values(&["timeout"]).get();
        assert!(hits - before_hits >= 3.0);
        assert!(timeouts - before_timeouts >= 2.0);
    }

    #[tokio::test]
    async fn test_metrics_handler_exposes_prefix() {
        init_metrics();
        record_recommendation(RecommendationMode::Change, "ok");
        let response = metrics_handler().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("moodreel_recommendations_total"));
    }
}
