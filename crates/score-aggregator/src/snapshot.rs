//! The read-only result of one scoring run, handed to reporting.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use trend_core::{AggregateScore, ScoringError, Source, Ticker};

use crate::ranker::{is_ranked, top_n};

/// Discovery counts for the report header
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoverySummary {
    /// Distinct tickers with at least one signal on either side
    pub total_tickers: usize,
    pub long_candidates: usize,
    pub short_candidates: usize,
    /// Long candidates confirmed by two or more sources
    pub multi_source_longs: usize,
    pub hot_theme_longs: usize,
    pub squeeze_warnings: usize,
    pub hot_themes: Vec<String>,
    /// Tickers observed per source
    pub source_coverage: BTreeMap<Source, usize>,
    pub skipped_signals: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub generated_at: DateTime<Utc>,
    /// Every scored ticker, ranked
    pub long_scores: Vec<AggregateScore>,
    /// Candidates at or above the short floor, ranked
    pub short_scores: Vec<AggregateScore>,
    pub summary: DiscoverySummary,
}

impl ScoreSnapshot {
    pub fn top_longs(&self, n: usize) -> &[AggregateScore] {
        top_n(&self.long_scores, n)
    }

    pub fn top_shorts(&self, n: usize) -> &[AggregateScore] {
        top_n(&self.short_scores, n)
    }

    pub fn long_score(&self, ticker: &Ticker) -> Option<&AggregateScore> {
        self.long_scores.iter().find(|s| &s.ticker == ticker)
    }

    pub fn short_score(&self, ticker: &Ticker) -> Option<&AggregateScore> {
        self.short_scores.iter().find(|s| &s.ticker == ticker)
    }

    /// Tickers on both lists: bullish on some signals, bearish on others
    pub fn contested(&self) -> BTreeSet<&Ticker> {
        let shorts: BTreeSet<&Ticker> = self.short_scores.iter().map(|s| &s.ticker).collect();
        self.long_scores
            .iter()
            .map(|s| &s.ticker)
            .filter(|t| shorts.contains(t))
            .collect()
    }

    /// Every entry agrees with its own breakdown, each list is ranked and
    /// holds a ticker at most once, and the summary counts match the lists.
    pub fn check_consistency(&self) -> Result<(), ScoringError> {
        for (side, scores) in [("long", &self.long_scores), ("short", &self.short_scores)] {
            let mut seen = BTreeSet::new();
            for score in scores {
                if !score.is_consistent() {
                    return Err(inconsistent(
                        &score.ticker,
                        format!("{} breakdown disagrees with its contributing sources", side),
                    ));
                }
                if !seen.insert(&score.ticker) {
                    return Err(inconsistent(
                        &score.ticker,
                        format!("listed twice on the {} side", side),
                    ));
                }
            }
            if !is_ranked(scores) {
                return Err(ScoringError::InconsistentSnapshot(format!(
                    "{} scores are not ranked",
                    side
                )));
            }
        }

        if self.summary.long_candidates != self.long_scores.len()
            || self.summary.short_candidates != self.short_scores.len()
        {
            return Err(ScoringError::InconsistentSnapshot(
                "summary counts disagree with the score lists".to_string(),
            ));
        }
        Ok(())
    }
}

fn inconsistent(ticker: &Ticker, reason: String) -> ScoringError {
    ScoringError::InconsistentScore {
        ticker: ticker.to_string(),
        reason,
    }
}
