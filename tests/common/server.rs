//! Test server lifecycle management
//!
//! This module manages spawning and shutting down test HTTP servers.
//! Each test gets an isolated server with its own catalog file.

use super::constants::*;
use super::fixtures::create_test_catalog;
use moodreel_server::catalog::CsvCatalogProvider;
use moodreel_server::engine::Recommender;
use moodreel_server::enrichment::{CatalogOnlyEnricher, DetailEnricher};
use moodreel_server::server::{server::make_app, RequestsLoggingLevel, ServerConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// How to assemble the server under test.
pub struct SpawnOptions {
    pub enricher: Arc<dyn DetailEnricher>,
    pub catalog_cache: bool,
    pub enrichment_timeout: Duration,
}

impl Default for SpawnOptions {
    fn default() -> Self {
        Self {
            enricher: Arc::new(CatalogOnlyEnricher),
            catalog_cache: true,
            enrichment_timeout: Duration::from_secs(2),
        }
    }
}

/// Test server instance with an isolated catalog
///
/// When dropped, the server gracefully shuts down and temp resources are cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    /// The CSV file backing the catalog
    pub catalog_path: PathBuf,

    // Private fields - keep resources alive until drop
    _temp_catalog_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port with default options
    pub async fn spawn() -> Self {
        Self::spawn_with(SpawnOptions::default()).await
    }

    /// Spawns a new test server on a random port
    ///
    /// # Panics
    ///
    /// Panics if the fixture cannot be written, the port cannot be bound,
    /// or the server doesn't become ready within timeout.
    pub async fn spawn_with(options: SpawnOptions) -> Self {
        let (temp_catalog_dir, catalog_path) =
            create_test_catalog().expect("Failed to create test catalog");

        let recommender = Recommender::new(
            Arc::new(CsvCatalogProvider::new(&catalog_path, options.catalog_cache)),
            options.enricher,
            options.enrichment_timeout,
        );

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        // Create shutdown channel
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            ..Default::default()
        };
        let app = make_app(config, Arc::new(recommender));

        // Spawn server in background task with graceful shutdown
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            catalog_path,
            _temp_catalog_dir: temp_catalog_dir,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the home endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
