use anyhow::{Context, Result};
use score_aggregator::{LongConfig, ScoringConfig, ShortConfig, SourceWeightTable};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ScannerConfig {
    // Long pipeline
    pub long_weights: SourceWeightTable,  // defaults merged with LONG_WEIGHTS
    pub theme_bonus: f64,                 // 5
    pub multi_source_bonus: f64,          // 3 per extra source

    // Short pipeline
    pub short_weights: SourceWeightTable, // defaults merged with SHORT_WEIGHTS
    pub short_multi_source_bonus: f64,    // 4 per extra source
    pub squeeze_threshold: f64,           // 20% short float
    pub squeeze_penalty: f64,             // 15
    pub squeeze_penalty_enabled: bool,
    pub short_min_score: f64,             // 40, inclusive

    // Files
    pub signals_dir: PathBuf,
    pub themes_file: Option<PathBuf>,
    pub output_path: PathBuf,

    // Report
    pub report_top_n: usize,
}

impl ScannerConfig {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            long_weights: SourceWeightTable::default_long().merged_with(
                &SourceWeightTable::parse(&env::var("LONG_WEIGHTS").unwrap_or_default())
                    .context("LONG_WEIGHTS is invalid")?,
            ),
            theme_bonus: env::var("THEME_BONUS")
                .unwrap_or_else(|_| "5.0".to_string())
                .parse()
                .context("THEME_BONUS must be a number")?,
            multi_source_bonus: env::var("MULTI_SOURCE_BONUS")
                .unwrap_or_else(|_| "3.0".to_string())
                .parse()
                .context("MULTI_SOURCE_BONUS must be a number")?,

            short_weights: SourceWeightTable::default_short().merged_with(
                &SourceWeightTable::parse(&env::var("SHORT_WEIGHTS").unwrap_or_default())
                    .context("SHORT_WEIGHTS is invalid")?,
            ),
            short_multi_source_bonus: env::var("SHORT_MULTI_SOURCE_BONUS")
                .unwrap_or_else(|_| "4.0".to_string())
                .parse()
                .context("SHORT_MULTI_SOURCE_BONUS must be a number")?,
            squeeze_threshold: env::var("SQUEEZE_THRESHOLD")
                .unwrap_or_else(|_| "20.0".to_string())
                .parse()
                .context("SQUEEZE_THRESHOLD must be a number")?,
            squeeze_penalty: env::var("SQUEEZE_PENALTY")
                .unwrap_or_else(|_| "15.0".to_string())
                .parse()
                .context("SQUEEZE_PENALTY must be a number")?,
            squeeze_penalty_enabled: env::var("SQUEEZE_PENALTY_ENABLED")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .context("SQUEEZE_PENALTY_ENABLED must be true or false")?,
            short_min_score: env::var("SHORT_MIN_SCORE")
                .unwrap_or_else(|_| "40.0".to_string())
                .parse()
                .context("SHORT_MIN_SCORE must be a number")?,

            signals_dir: env::var("SIGNALS_DIR")
                .unwrap_or_else(|_| "signals".to_string())
                .into(),
            themes_file: env::var("THEMES_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            output_path: env::var("OUTPUT_PATH")
                .unwrap_or_else(|_| "trending_snapshot.json".to_string())
                .into(),

            report_top_n: env::var("REPORT_TOP_N")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .context("REPORT_TOP_N must be a whole number")?,
        };

        Ok(config)
    }

    /// Validated scoring settings for both pipelines
    pub fn scoring_config(&self) -> Result<ScoringConfig> {
        let long = LongConfig::new(
            self.long_weights.clone(),
            self.theme_bonus,
            self.multi_source_bonus,
        )?;

        let mut short = ShortConfig::new(
            self.short_weights.clone(),
            self.short_multi_source_bonus,
            self.squeeze_threshold,
            self.squeeze_penalty,
            self.short_min_score,
        )?;
        if !self.squeeze_penalty_enabled {
            short = short.without_squeeze_penalty();
        }

        Ok(ScoringConfig::new(long, short)?)
    }
}
