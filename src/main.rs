use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use moodreel_server::catalog::{CatalogProvider, CsvCatalogProvider};
use moodreel_server::config;
use moodreel_server::engine::Recommender;
use moodreel_server::enrichment::{
    CatalogOnlyEnricher, DetailEnricher, TmdbEnricher, DEFAULT_TMDB_BASE_URL,
};
use moodreel_server::server::{metrics, run_server, RequestsLoggingLevel, ServerConfig};

fn parse_path(s: &str) -> Result<PathBuf, String> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(format!("Error resolving path '{}': {}", s, msg));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir().map_err(|e| e.to_string())?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to a TOML config file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Path to the emotion vectors CSV catalog.
    /// Can also be specified in config file.
    #[clap(long, value_parser = parse_path)]
    pub catalog_path: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, default_value_t = 9091)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Re-read the catalog file on every request instead of keeping it in memory.
    #[clap(long)]
    pub no_catalog_cache: bool,

    /// TMDB API key. Without one, details come from the catalog only.
    #[clap(long, env = "TMDB_API_KEY")]
    pub tmdb_api_key: Option<String>,

    /// TMDB API root.
    #[clap(long, default_value = DEFAULT_TMDB_BASE_URL)]
    pub tmdb_base_url: String,

    /// Timeout in seconds for each detail lookup.
    #[clap(long, default_value_t = 10)]
    pub enrichment_timeout_sec: u64,
}

/// Convert CLI args to CliConfig for config resolution
impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            catalog_path: args.catalog_path.clone(),
            port: args.port,
            metrics_port: args.metrics_port,
            logging_level: args.logging_level.clone(),
            frontend_dir_path: args.frontend_dir_path.clone(),
            no_catalog_cache: args.no_catalog_cache,
            tmdb_api_key: args.tmdb_api_key.clone(),
            tmdb_base_url: args.tmdb_base_url.clone(),
            enrichment_timeout_sec: args.enrichment_timeout_sec,
        }
    }
}

fn make_enricher(settings: &config::EnrichmentSettings) -> Result<Arc<dyn DetailEnricher>> {
    match &settings.api_key {
        Some(api_key) => {
            info!("Enriching details from TMDB at {}", settings.base_url);
            let enricher = TmdbEnricher::new(api_key, &settings.base_url, settings.timeout)?;
            Ok(Arc::new(enricher))
        }
        None => {
            warn!("No TMDB API key configured, serving catalog data only");
            Ok(Arc::new(CatalogOnlyEnricher))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    // Load TOML config if provided
    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };

    // Resolve final configuration (TOML overrides CLI)
    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = config::AppConfig::resolve(&cli_config, file_config)?;

    info!("Configuration loaded:");
    info!("  catalog_path: {:?}", app_config.catalog_path);
    info!("  catalog_cache: {}", app_config.catalog_cache);
    info!("  port: {}", app_config.port);

    info!("Initializing metrics...");
    metrics::init_metrics();

    let catalog = Arc::new(CsvCatalogProvider::new(
        &app_config.catalog_path,
        app_config.catalog_cache,
    ));
    // Fail fast on a broken catalog rather than on the first request.
    let entries = catalog.load()?;
    metrics::set_catalog_size(entries.len());
    info!("Catalog ready with {} titles", entries.len());

    let enricher = make_enricher(&app_config.enrichment)?;
    let recommender = Recommender::new(catalog, enricher, app_config.enrichment.timeout);

    let server_config = ServerConfig {
        requests_logging_level: app_config.logging_level.clone(),
        port: app_config.port,
        metrics_port: app_config.metrics_port,
        frontend_dir_path: app_config.frontend_dir_path.clone(),
    };

    info!("Ready to serve at port {}!", app_config.port);
    info!("Metrics available at port {}!", app_config.metrics_port);
    let result = run_server(server_config, Arc::new(recommender)).await;
    info!("HTTP server stopped: {:?}", result);
    result
}
