//! Request logging middleware
#![allow(dead_code)] // Used as middleware

use super::super::state::ServerState;
use crate::server::metrics::{categorize_endpoint, record_http_request};
use axum::extract::State;
use axum::{
    body::Body,
    http::{header::HeaderMap, Request, Response, StatusCode},
    middleware::Next,
    response::IntoResponse,
};
use std::time::Instant;
use tracing::{error, info};

#[derive(PartialEq, PartialOrd, Clone, Debug, Default, clap::ValueEnum)]
pub enum RequestsLoggingLevel {
    None,
    #[default]
    Path,
    Headers,
    Body,
}

impl std::fmt::Display for RequestsLoggingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

const MAX_LOGGABLE_BODY_LENGTH: usize = 1024;

enum ContentLengthParseResult {
    Ok(usize),
    No(&'static str),
}

fn parse_content_length(headers: &HeaderMap) -> ContentLengthParseResult {
    let value = match headers.get("content-length") {
        Some(x) => x,
        None => return ContentLengthParseResult::No("Content-length not set."),
    };

    let str_value = match value.to_str() {
        Ok(x) => x,
        Err(_) => {
            return ContentLengthParseResult::No("Could not get Content-length string value.")
        }
    };

    match str_value.parse::<usize>() {
        Ok(x) => ContentLengthParseResult::Ok(x),
        Err(_) => ContentLengthParseResult::No("Could not parse Content-length numeric value."),
    }
}

fn log_headers(label: &str, headers: &HeaderMap) {
    info!("  {} Headers:", label);
    for (name, value) in headers.iter() {
        info!("    {:?}: {:?}", name, value);
    }
}

/// Reads a small body fully so it can be logged, returning the bytes to be
/// put back. `None` when reading failed.
async fn buffer_body(label: &str, size: usize, body: Body) -> Option<axum::body::Bytes> {
    match axum::body::to_bytes(body, size).await {
        Ok(bytes) => {
            info!("  {} Body:\n{}", label, String::from_utf8_lossy(&bytes));
            Some(bytes)
        }
        Err(err) => {
            error!("Failed to read {} body: {:?}", label.to_lowercase(), err);
            None
        }
    }
}

pub async fn log_requests(
    State(state): State<ServerState>,
    mut request: Request<Body>,
    next: Next,
) -> Response<Body> {
    let level = state.config.requests_logging_level.clone();
    let start = Instant::now();

    let method = request.method().to_string();
    let uri = request.uri().to_string();
    let path = request.uri().path().to_string();

    if level > RequestsLoggingLevel::None {
        info!(">>> {} {}", method, uri);
    }

    if level >= RequestsLoggingLevel::Headers {
        log_headers("Req", request.headers());
    }

    if level >= RequestsLoggingLevel::Body {
        match parse_content_length(request.headers()) {
            ContentLengthParseResult::No(reason) => info!("  Req Body: {}", reason),
            ContentLengthParseResult::Ok(size) if size < MAX_LOGGABLE_BODY_LENGTH => {
                let (parts, body) = request.into_parts();
                let Some(bytes) = buffer_body("Req", size, body).await else {
                    return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                };
                request = Request::from_parts(parts, Body::from(bytes));
            }
            ContentLengthParseResult::Ok(size) => info!(
                "  Req Body: Too big to log ({:#})",
                byte_unit::Byte::from(size)
            ),
        }
    }

    let mut response = next.run(request).await;

    if level >= RequestsLoggingLevel::Headers {
        log_headers("Resp", response.headers());
    }

    if level >= RequestsLoggingLevel::Body {
        match parse_content_length(response.headers()) {
            ContentLengthParseResult::No(reason) => info!("  Resp Body: {}", reason),
            ContentLengthParseResult::Ok(size) if size < MAX_LOGGABLE_BODY_LENGTH => {
                let (parts, body) = response.into_parts();
                let Some(bytes) = buffer_body("Resp", size, body).await else {
                    return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                };
                response = Response::from_parts(parts, Body::from(bytes));
            }
            ContentLengthParseResult::Ok(size) => info!(
                "  Resp Body: Too big to log ({:#})",
                byte_unit::Byte::from(size)
            ),
        }
    }

    let status = response.status().as_u16();
    let duration = start.elapsed();

    if level > RequestsLoggingLevel::None {
        info!("<<< {} ({}ms)", status, duration.as_millis());
    }

    record_http_request(&method, categorize_endpoint(&path), status, duration);

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn level_ordering() {
        let none = RequestsLoggingLevel::None;

        assert!(none < RequestsLoggingLevel::Headers);
        assert!(RequestsLoggingLevel::Body > RequestsLoggingLevel::None);
        assert_eq!(RequestsLoggingLevel::default(), RequestsLoggingLevel::Path);
    }

    #[test]
    fn content_length_parsing() {
        let mut headers = HeaderMap::new();
        assert!(matches!(
            parse_content_length(&headers),
            ContentLengthParseResult::No(_)
        ));

        headers.insert("content-length", HeaderValue::from_static("512"));
        assert!(matches!(
            parse_content_length(&headers),
            ContentLengthParseResult::Ok(512)
        ));

        headers.insert("content-length", HeaderValue::from_static("lots"));
        assert!(matches!(
            parse_content_length(&headers),
            ContentLengthParseResult::No(_)
        ));
    }
}
