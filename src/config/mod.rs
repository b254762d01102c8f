mod file_config;

pub use file_config::{EnrichmentConfig, FileConfig};

use crate::enrichment::DEFAULT_TMDB_BASE_URL;
use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;
use std::time::Duration;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub catalog_path: Option<PathBuf>,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub no_catalog_cache: bool,
    pub tmdb_api_key: Option<String>,
    pub tmdb_base_url: String,
    pub enrichment_timeout_sec: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            port: 3001,
            metrics_port: 9091,
            logging_level: RequestsLoggingLevel::default(),
            frontend_dir_path: None,
            no_catalog_cache: false,
            tmdb_api_key: None,
            tmdb_base_url: DEFAULT_TMDB_BASE_URL.to_string(),
            enrichment_timeout_sec: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog_path: PathBuf,
    pub catalog_cache: bool,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub enrichment: EnrichmentSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentSettings {
    /// Without a key the catalog-only enricher is used.
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let catalog_path = file
            .catalog_path
            .map(PathBuf::from)
            .or_else(|| cli.catalog_path.clone())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "catalog_path must be specified via --catalog-path or in config file"
                )
            })?;

        if !catalog_path.exists() {
            bail!("Catalog file does not exist: {:?}", catalog_path);
        }
        if !catalog_path.is_file() {
            bail!("catalog_path is not a file: {:?}", catalog_path);
        }

        let catalog_cache = file.catalog_cache.unwrap_or(!cli.no_catalog_cache);
        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        let enrichment_file = file.enrichment.unwrap_or_default();
        let timeout_sec = enrichment_file
            .timeout_sec
            .unwrap_or(cli.enrichment_timeout_sec);
        if timeout_sec == 0 {
            bail!("Enrichment timeout must be at least 1 second");
        }
        let enrichment = EnrichmentSettings {
            api_key: enrichment_file
                .api_key
                .or_else(|| cli.tmdb_api_key.clone())
                .filter(|key| !key.trim().is_empty()),
            base_url: enrichment_file
                .base_url
                .unwrap_or_else(|| cli.tmdb_base_url.clone()),
            timeout: Duration::from_secs(timeout_sec),
        };

        Ok(Self {
            catalog_path,
            catalog_cache,
            port,
            metrics_port,
            logging_level,
            frontend_dir_path,
            enrichment,
        })
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
