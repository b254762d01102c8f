use anyhow::{Context, Result};
use std::time::Duration;

use tower_http::services::ServeDir;
use tracing::{info, warn};

use axum::{
    extract::State,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use super::recommendations::post_recommendations;
use super::{log_requests, metrics::metrics_handler, state::*, ServerConfig};
#[cfg(feature = "slowdown")]
use super::slowdown_request;
use crate::mood::EmotionAxis;

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_size: Option<usize>,
}

#[derive(Serialize)]
struct MoodInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let catalog_size = match state.recommender.catalog().load() {
        Ok(entries) => Some(entries.len()),
        Err(e) => {
            warn!("Catalog not loadable for stats: {}", e);
            None
        }
    };
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        catalog_size,
    };
    Json(stats)
}

async fn get_moods() -> impl IntoResponse {
    let moods: Vec<MoodInfo> = EmotionAxis::ALL
        .iter()
        .map(|axis| MoodInfo {
            id: axis.id(),
            name: axis.display_name(),
            description: axis.description(),
        })
        .collect();
    Json(moods)
}

pub fn make_app(config: ServerConfig, recommender: GuardedRecommender) -> Router {
    let state = ServerState::new(config.clone(), recommender);

    let api_routes: Router = Router::new()
        .route("/recommendations", post(post_recommendations))
        .route("/moods", get(get_moods))
        .with_state(state.clone());

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    let mut app: Router = home_router.nest("/api", api_routes);

    #[cfg(feature = "slowdown")]
    {
        app = app.layer(middleware::from_fn(slowdown_request));
    }
    app = app.layer(middleware::from_fn_with_state(state, log_requests));

    app
}

fn make_metrics_app() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, initiating graceful shutdown");
}

pub async fn run_server(config: ServerConfig, recommender: GuardedRecommender) -> Result<()> {
    let port = config.port;
    let metrics_port = config.metrics_port;
    let app = make_app(config, recommender);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    let metrics_listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", metrics_port))
        .await
        .with_context(|| format!("Failed to bind metrics port {}", metrics_port))?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(metrics_listener, make_metrics_app()).await {
            warn!("Metrics server stopped: {}", e);
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
