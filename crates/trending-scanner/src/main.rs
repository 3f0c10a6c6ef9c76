//! trending-scanner: score trending long and short candidates from
//! per-source signal files.
//!
//! Usage:
//!   trending-scanner
//!   trending-scanner --signals data/2026-01-02 --themes data/themes.json
//!   trending-scanner --output snapshot.json --top 25 --quiet

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use score_aggregator::ScoringEngine;
use trend_core::{ThemeMembership, ThemePerformance};

mod config;
mod report;
mod sources;

use config::ScannerConfig;
use sources::{file_sources, load_signals};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    let mut config = ScannerConfig::from_env()?;

    let args: Vec<String> = std::env::args().collect();
    let quiet = args.iter().any(|a| a == "--quiet");
    if let Some(dir) = flag_value(&args, "--signals")? {
        config.signals_dir = PathBuf::from(dir);
    }
    if let Some(path) = flag_value(&args, "--themes")? {
        config.themes_file = Some(PathBuf::from(path));
    }
    if let Some(path) = flag_value(&args, "--output")? {
        config.output_path = PathBuf::from(path);
    }
    if let Some(n) = flag_value(&args, "--top")? {
        config.report_top_n = n.parse().context("--top must be a whole number")?;
    }

    let engine = ScoringEngine::new(config.scoring_config()?)?;
    tracing::info!("Configuration loaded and validated");
    tracing::info!("  Signals: {}", config.signals_dir.display());
    tracing::info!(
        "  Short floor: {}, squeeze above {}% short float",
        engine.config().short.min_score,
        engine.config().short.squeeze_threshold
    );

    if !config.signals_dir.is_dir() {
        bail!("signals directory {} does not exist", config.signals_dir.display());
    }

    let themes = match &config.themes_file {
        Some(path) => load_themes(path).await?,
        None => ThemeMembership::new(),
    };

    let loaded = load_signals(file_sources(&config.signals_dir)).await;
    if !loaded.failed_sources.is_empty() {
        tracing::warn!(
            "{} sources failed and contribute nothing this run",
            loaded.failed_sources.len()
        );
    }
    let mut ingest = loaded.long.report().clone();
    ingest.absorb(loaded.short.report());
    tracing::info!(
        "Ingested {} signals ({} duplicates replaced, {} without a reading)",
        ingest.accepted,
        ingest.duplicates_replaced,
        ingest.not_applicable
    );
    for (source, skipped) in &ingest.skipped_by_source {
        tracing::warn!("{}: skipped {} malformed records", source, skipped);
    }

    let snapshot = tokio::task::spawn_blocking(move || {
        engine.run(&loaded.long, &loaded.short, &themes)
    })
    .await
    .context("scoring task failed")?;

    let json = serde_json::to_string_pretty(&snapshot)?;
    tokio::fs::write(&config.output_path, json)
        .await
        .with_context(|| format!("failed to write {}", config.output_path.display()))?;
    tracing::info!("Snapshot written to {}", config.output_path.display());

    if !quiet {
        println!("{}", report::render(&snapshot, config.report_top_n));
    }

    Ok(())
}

/// Value following `flag`, if the flag is present
fn flag_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>> {
    match args.iter().position(|a| a == flag) {
        Some(i) => match args.get(i + 1) {
            Some(value) if !value.starts_with("--") => Ok(Some(value.as_str())),
            _ => bail!("{} needs a value", flag),
        },
        None => Ok(None),
    }
}

async fn load_themes(path: &Path) -> Result<ThemeMembership> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read themes file {}", path.display()))?;
    let performances: Vec<ThemePerformance> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse themes file {}", path.display()))?;

    let themes = ThemeMembership::from_performances(&performances);
    tracing::info!(
        "{} of {} themes hot ({} member tickers)",
        themes.hot_themes().len(),
        performances.len(),
        themes.len()
    );
    Ok(themes)
}
