use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use moodreel_server::engine::pagination::PageRequest;
use moodreel_server::engine::random::RngSource;
use moodreel_server::engine::ranking::DEFAULT_RATING;
use moodreel_server::engine::{reason, RecommendationQuery, Recommender};
use moodreel_server::mood::{EmotionAxis, RecommendationMode, UserMoodVector};
use moodreel_server::{CatalogOnlyEnricher, CsvCatalogProvider};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

/// Parses `axis=value`, e.g. `happy=7.5`.
fn parse_mood(s: &str) -> Result<(EmotionAxis, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected axis=value, got '{}'", s))?;
    let axis = name.parse::<EmotionAxis>().map_err(|e| e.to_string())?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid intensity '{}': {}", value, e))?;
    Ok((axis, value))
}

/// Ranks a local catalog against a mood and prints one page, without
/// looking anything up online.
#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the emotion vectors CSV catalog.
    #[clap(value_parser = parse_path)]
    pub catalog_path: PathBuf,

    /// A mood intensity as axis=value (0-10). Repeat for several axes.
    #[clap(short, long = "mood", value_parser = parse_mood, required = true)]
    pub moods: Vec<(EmotionAxis, f64)>,

    #[clap(long, value_enum, default_value_t = RecommendationMode::Match)]
    pub mode: RecommendationMode,

    #[clap(long, default_value_t = 1)]
    pub page: u32,

    /// Seed for a reproducible ordering.
    #[clap(long)]
    pub seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let mood = UserMoodVector::from_axes(cli_args.moods.iter().copied())?;
    let page = PageRequest::new(cli_args.page).context("Page must be at least 1")?;
    let query = RecommendationQuery {
        mood,
        mode: cli_args.mode,
        page,
    };

    let recommender = Recommender::new(
        Arc::new(CsvCatalogProvider::new(&cli_args.catalog_path, false)),
        Arc::new(CatalogOnlyEnricher),
        Duration::from_secs(1),
    );
    let mut rng: RngSource<_> = match cli_args.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };

    let ranked = recommender.rank_page(&query, &mut rng)?;
    println!(
        "{} candidates, page {} ({} shown){}",
        ranked.total,
        page.number(),
        ranked.candidates.len(),
        if ranked.has_more { ", more available" } else { "" }
    );
    for (position, candidate) in ranked.candidates.iter().enumerate() {
        let rating = candidate.entry.rating.unwrap_or(DEFAULT_RATING);
        println!(
            "{:>3}. {} ({})  sim {:.3}  score {:.3}  {}",
            position + 1,
            candidate.entry.title,
            candidate.entry.release_year,
            candidate.effective_similarity,
            candidate.final_score,
            reason::reason(candidate.effective_similarity, cli_args.mode, rating)
        );
    }
    Ok(())
}
