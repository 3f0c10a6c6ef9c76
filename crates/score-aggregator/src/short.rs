//! Short Aggregator
//!
//! Mirrors the long side over the bearish source set. A crowded short
//! (short float above the threshold) loses a flat penalty before clamping,
//! and only tickers at or above the floor make the candidate list.

use std::collections::{BTreeMap, BTreeSet};

use trend_core::{AggregateScore, ScoreAdjustments, Source, SourceSignal, Ticker};

use crate::batch::SignalBatch;
use crate::composite::Composite;
use crate::config::ShortConfig;
use crate::highlights::short_highlights;
use crate::ranker::rank_scores;

/// Short float (percent) per ticker, taken from the long side's
/// short-interest signals
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShortInterestIndex {
    short_floats: BTreeMap<Ticker, f64>,
}

impl ShortInterestIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_batch(batch: &SignalBatch) -> Self {
        let short_floats = batch
            .iter()
            .filter(|s| s.source == Source::ShortInterest)
            .filter_map(|s| {
                let short_float = s.attr_f64("short_float").filter(|f| f.is_finite())?;
                Some((s.ticker.clone(), short_float))
            })
            .collect();
        Self { short_floats }
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (Ticker, f64)>) -> Self {
        Self {
            short_floats: entries.into_iter().collect(),
        }
    }

    pub fn short_float(&self, ticker: &Ticker) -> Option<f64> {
        self.short_floats.get(ticker).copied()
    }

    pub fn len(&self) -> usize {
        self.short_floats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.short_floats.is_empty()
    }
}

pub struct ShortAggregator<'a> {
    config: &'a ShortConfig,
    short_interest: &'a ShortInterestIndex,
}

impl<'a> ShortAggregator<'a> {
    pub fn new(config: &'a ShortConfig, short_interest: &'a ShortInterestIndex) -> Self {
        Self {
            config,
            short_interest,
        }
    }

    /// Score one ticker without applying the floor; `None` without any signal
    pub fn score_ticker(&self, ticker: &Ticker, signals: &[&SourceSignal]) -> Option<AggregateScore> {
        let composite = Composite::from_signals(signals, &self.config.weights)?;

        let crowded_float = self
            .short_interest
            .short_float(ticker)
            .filter(|f| *f > self.config.squeeze_threshold);
        let squeeze_warning = crowded_float.is_some();

        let adjustments = ScoreAdjustments {
            theme_bonus: 0.0,
            multi_source_bonus: composite.multi_source_bonus(self.config.multi_source_bonus),
            auxiliary_bonus: composite.auxiliary_bonus,
            squeeze_penalty: if squeeze_warning && self.config.squeeze_penalty_enabled {
                self.config.squeeze_penalty
            } else {
                0.0
            },
        };
        // Penalty is part of `net`, so it lands before the clamp
        let combined_score = (composite.base_score + adjustments.net()).clamp(0.0, 100.0);

        Some(AggregateScore {
            ticker: ticker.clone(),
            combined_score,
            num_sources: composite.num_sources(),
            contributing_sources: composite.contributing,
            score_breakdown: composite.breakdown,
            base_score: composite.base_score,
            adjustments,
            in_hot_theme: false,
            squeeze_warning,
            highlights: short_highlights(signals, crowded_float),
        })
    }

    fn passes_floor(&self, score: &AggregateScore) -> bool {
        score.combined_score >= self.config.min_score
    }

    /// Candidates at or above the floor, ranked
    pub fn aggregate(&self, batch: &SignalBatch) -> Vec<AggregateScore> {
        self.collect_candidates(batch, |_| true)
    }

    pub fn aggregate_universe(
        &self,
        universe: &BTreeSet<Ticker>,
        batch: &SignalBatch,
    ) -> Vec<AggregateScore> {
        self.collect_candidates(batch, |ticker| universe.contains(ticker))
    }

    fn collect_candidates(
        &self,
        batch: &SignalBatch,
        include: impl Fn(&Ticker) -> bool,
    ) -> Vec<AggregateScore> {
        let mut below_floor = 0usize;
        let mut scores = Vec::new();

        for (ticker, signals) in batch.by_ticker() {
            if !include(ticker) {
                continue;
            }
            let Some(score) = self.score_ticker(ticker, &signals) else {
                continue;
            };
            if self.passes_floor(&score) {
                scores.push(score);
            } else {
                below_floor += 1;
            }
        }

        rank_scores(&mut scores);
        tracing::debug!(
            "Short aggregation: {} candidates at or above {}, {} below",
            scores.len(),
            self.config.min_score,
            below_floor
        );
        scores
    }
}

/// Short candidates for `tickers`, ranked, floor applied
pub fn aggregate_short(
    tickers: &BTreeSet<Ticker>,
    signals: &SignalBatch,
    config: &ShortConfig,
    short_interest: &ShortInterestIndex,
) -> Vec<AggregateScore> {
    ShortAggregator::new(config, short_interest).aggregate_universe(tickers, signals)
}
