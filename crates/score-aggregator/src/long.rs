//! Long Aggregator
//!
//! Per ticker: weighted mean over the sources that saw it, then a flat
//! hot-theme bonus, a per-extra-source confirmation bonus and any auxiliary
//! bonus carried on the signals. The sum is clamped to 0-100.

use std::collections::BTreeSet;

use trend_core::{AggregateScore, ScoreAdjustments, SourceSignal, ThemeMembership, Ticker};

use crate::batch::SignalBatch;
use crate::composite::Composite;
use crate::config::LongConfig;
use crate::highlights::long_highlights;
use crate::ranker::rank_scores;

pub struct LongAggregator<'a> {
    config: &'a LongConfig,
    themes: &'a ThemeMembership,
}

impl<'a> LongAggregator<'a> {
    pub fn new(config: &'a LongConfig, themes: &'a ThemeMembership) -> Self {
        Self { config, themes }
    }

    /// Score one ticker; `None` without any signal
    pub fn score_ticker(&self, ticker: &Ticker, signals: &[&SourceSignal]) -> Option<AggregateScore> {
        let composite = Composite::from_signals(signals, &self.config.weights)?;
        let in_hot_theme = self.themes.contains(ticker);

        let adjustments = ScoreAdjustments {
            theme_bonus: if in_hot_theme {
                self.config.theme_bonus
            } else {
                0.0
            },
            multi_source_bonus: composite.multi_source_bonus(self.config.multi_source_bonus),
            auxiliary_bonus: composite.auxiliary_bonus,
            squeeze_penalty: 0.0,
        };
        let combined_score = (composite.base_score + adjustments.net()).clamp(0.0, 100.0);

        Some(AggregateScore {
            ticker: ticker.clone(),
            combined_score,
            num_sources: composite.num_sources(),
            contributing_sources: composite.contributing,
            score_breakdown: composite.breakdown,
            base_score: composite.base_score,
            adjustments,
            in_hot_theme,
            squeeze_warning: false,
            highlights: long_highlights(signals, in_hot_theme),
        })
    }

    /// Score every ticker in the batch, ranked
    pub fn aggregate(&self, batch: &SignalBatch) -> Vec<AggregateScore> {
        let mut scores: Vec<AggregateScore> = batch
            .by_ticker()
            .into_iter()
            .filter_map(|(ticker, signals)| self.score_ticker(ticker, &signals))
            .collect();
        rank_scores(&mut scores);
        scores
    }

    /// Score only the tickers in `universe`; tickers without signals are absent
    pub fn aggregate_universe(
        &self,
        universe: &BTreeSet<Ticker>,
        batch: &SignalBatch,
    ) -> Vec<AggregateScore> {
        let mut scores: Vec<AggregateScore> = batch
            .by_ticker()
            .into_iter()
            .filter(|(ticker, _)| universe.contains(*ticker))
            .filter_map(|(ticker, signals)| self.score_ticker(ticker, &signals))
            .collect();
        rank_scores(&mut scores);
        scores
    }
}

/// Long scores for `tickers`, ranked by score, then source count, then ticker
pub fn aggregate_long(
    tickers: &BTreeSet<Ticker>,
    signals: &SignalBatch,
    config: &LongConfig,
    themes: &ThemeMembership,
) -> Vec<AggregateScore> {
    let scores = LongAggregator::new(config, themes).aggregate_universe(tickers, signals);
    tracing::debug!("Long aggregation: {} of {} tickers scored", scores.len(), tickers.len());
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use trend_core::Source;

    fn ticker(s: &str) -> Ticker {
        Ticker::parse(s).unwrap()
    }

    #[test]
    fn test_breakdown_matches_contributing_sources() {
        let batch = SignalBatch::from_signals(vec![
            SourceSignal::new(Source::Momentum, ticker("AMD"), 70.0),
            SourceSignal::new(Source::News, ticker("AMD"), 50.0),
            SourceSignal::new(Source::Finviz, ticker("AMD"), 65.0),
        ]);
        let config = LongConfig::default();
        let themes = ThemeMembership::new();

        let scores = LongAggregator::new(&config, &themes).aggregate(&batch);
        assert_eq!(scores.len(), 1);
        let amd = &scores[0];
        assert!(amd.is_consistent());
        assert_eq!(amd.num_sources, 3);
        assert_eq!(amd.score_breakdown[&Source::News], 50.0);
        assert_relative_eq!(amd.adjustments.multi_source_bonus, 6.0);
        // (70*.2 + 50*.1 + 65*.12) / .42
        assert_relative_eq!(amd.base_score, 26.8 / 0.42, epsilon = 1e-9);
    }

    #[test]
    fn test_hot_theme_bonus() {
        let batch =
            SignalBatch::from_signals(vec![SourceSignal::new(Source::Reddit, ticker("CCJ"), 50.0)]);
        let config = LongConfig::default();
        let themes = ThemeMembership::from_tickers([ticker("CCJ")]);

        let scores = LongAggregator::new(&config, &themes).aggregate(&batch);
        assert_relative_eq!(scores[0].combined_score, 55.0);
        assert!(scores[0].in_hot_theme);
        assert_eq!(scores[0].highlights, vec!["hot theme"]);
    }

    #[test]
    fn test_auxiliary_bonus_is_added() {
        let batch = SignalBatch::from_signals(vec![
            SourceSignal::new(Source::Momentum, ticker("NVDA"), 60.0),
            SourceSignal::new(Source::EtfFlows, ticker("NVDA"), 80.0)
                .with_attribute("auxiliary_bonus", 4.0),
        ]);
        let config = LongConfig::default();
        let themes = ThemeMembership::new();

        let nvda = &LongAggregator::new(&config, &themes).aggregate(&batch)[0];
        // base 60 (etf_flows weighs 0), +3 second source, +4 auxiliary
        assert_relative_eq!(nvda.combined_score, 67.0);
        assert_eq!(nvda.num_sources, 2);
    }

    #[test]
    fn test_universe_restricts_output() {
        let batch = SignalBatch::from_signals(vec![
            SourceSignal::new(Source::Momentum, ticker("AAPL"), 60.0),
            SourceSignal::new(Source::Momentum, ticker("MSFT"), 70.0),
        ]);
        let universe = BTreeSet::from([ticker("AAPL"), ticker("TSLA")]);

        let scores = aggregate_long(
            &universe,
            &batch,
            &LongConfig::default(),
            &ThemeMembership::new(),
        );
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].ticker.as_str(), "AAPL");
    }
}
