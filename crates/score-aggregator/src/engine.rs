//! Scoring engine: one run of both pipelines into a snapshot

use chrono::{DateTime, Utc};
use tracing::info;
use trend_core::{ScoringError, ThemeMembership};

use crate::batch::SignalBatch;
use crate::config::ScoringConfig;
use crate::long::LongAggregator;
use crate::short::{ShortAggregator, ShortInterestIndex};
use crate::snapshot::{DiscoverySummary, ScoreSnapshot};

/// Runs both pipelines over materialized signal batches.
///
/// Pure and synchronous: the batches are only read, and the two pipelines
/// share nothing mutable.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringError> {
        config.long.validate()?;
        config.short.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn run(
        &self,
        long_batch: &SignalBatch,
        short_batch: &SignalBatch,
        themes: &ThemeMembership,
    ) -> ScoreSnapshot {
        self.run_at(long_batch, short_batch, themes, Utc::now())
    }

    /// Same as [`run`](Self::run) with a fixed timestamp
    pub fn run_at(
        &self,
        long_batch: &SignalBatch,
        short_batch: &SignalBatch,
        themes: &ThemeMembership,
        generated_at: DateTime<Utc>,
    ) -> ScoreSnapshot {
        let long_scores = LongAggregator::new(&self.config.long, themes).aggregate(long_batch);

        let short_interest = ShortInterestIndex::from_batch(long_batch);
        let short_scores =
            ShortAggregator::new(&self.config.short, &short_interest).aggregate(short_batch);

        let mut source_coverage = long_batch.coverage();
        source_coverage.extend(short_batch.coverage());

        let mut all_tickers = long_batch.tickers();
        all_tickers.extend(short_batch.tickers());

        let summary = DiscoverySummary {
            total_tickers: all_tickers.len(),
            long_candidates: long_scores.len(),
            short_candidates: short_scores.len(),
            multi_source_longs: long_scores.iter().filter(|s| s.num_sources >= 2).count(),
            hot_theme_longs: long_scores.iter().filter(|s| s.in_hot_theme).count(),
            squeeze_warnings: short_scores.iter().filter(|s| s.squeeze_warning).count(),
            hot_themes: themes.hot_themes().to_vec(),
            source_coverage,
            skipped_signals: long_batch.report().skipped_malformed
                + short_batch.report().skipped_malformed,
        };

        info!(
            "Scored {} tickers: {} longs ({} multi-source), {} shorts, {} signals skipped",
            summary.total_tickers,
            summary.long_candidates,
            summary.multi_source_longs,
            summary.short_candidates,
            summary.skipped_signals
        );

        ScoreSnapshot {
            generated_at,
            long_scores,
            short_scores,
            summary,
        }
    }
}
