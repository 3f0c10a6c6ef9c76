//! Score Ranking Module
//!
//! Presentation order and list filters for aggregate scores. Ranking never
//! drops entries; truncation is left to the caller.

use std::cmp::Ordering;

use trend_core::{AggregateScore, ScoreBand};

/// Score descending, then source count descending, then ticker ascending
pub fn compare_scores(a: &AggregateScore, b: &AggregateScore) -> Ordering {
    b.combined_score
        .partial_cmp(&a.combined_score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.num_sources.cmp(&a.num_sources))
        .then_with(|| a.ticker.cmp(&b.ticker))
}

pub fn rank_scores(scores: &mut [AggregateScore]) {
    scores.sort_by(compare_scores);
}

pub fn is_ranked(scores: &[AggregateScore]) -> bool {
    scores
        .windows(2)
        .all(|pair| compare_scores(&pair[0], &pair[1]) != Ordering::Greater)
}

/// Entries at or above `min_score`, order preserved
pub fn filter_by_score(scores: &[AggregateScore], min_score: f64) -> Vec<AggregateScore> {
    scores
        .iter()
        .filter(|s| s.combined_score >= min_score)
        .cloned()
        .collect()
}

/// Entries confirmed by at least `min_sources` sources, order preserved
pub fn filter_by_sources(scores: &[AggregateScore], min_sources: usize) -> Vec<AggregateScore> {
    scores
        .iter()
        .filter(|s| s.num_sources >= min_sources)
        .cloned()
        .collect()
}

/// First `n` entries as a view
pub fn top_n(scores: &[AggregateScore], n: usize) -> &[AggregateScore] {
    &scores[..n.min(scores.len())]
}

/// Entries per display band, strongest band first
pub fn group_by_band(scores: &[AggregateScore]) -> Vec<(ScoreBand, Vec<&AggregateScore>)> {
    let bands = [
        ScoreBand::VeryStrong,
        ScoreBand::Strong,
        ScoreBand::Positive,
        ScoreBand::Weak,
        ScoreBand::VeryWeak,
    ];
    bands
        .into_iter()
        .map(|band| (band, scores.iter().filter(|s| s.band() == band).collect::<Vec<_>>()))
        .filter(|(_, members)| !members.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};
    use trend_core::{ScoreAdjustments, Ticker};

    fn create_test_score(ticker: &str, score: f64, num_sources: usize) -> AggregateScore {
        AggregateScore {
            ticker: Ticker::parse(ticker).unwrap(),
            combined_score: score,
            num_sources,
            contributing_sources: BTreeSet::new(),
            score_breakdown: BTreeMap::new(),
            base_score: score,
            adjustments: ScoreAdjustments::default(),
            in_hot_theme: false,
            squeeze_warning: false,
            highlights: vec![],
        }
    }

    fn tickers(scores: &[AggregateScore]) -> Vec<&str> {
        scores.iter().map(|s| s.ticker.as_str()).collect()
    }

    #[test]
    fn test_tie_break_order() {
        let mut scores = vec![
            create_test_score("MSFT", 70.0, 2),
            create_test_score("AAPL", 70.0, 2),
            create_test_score("TSLA", 70.0, 3),
            create_test_score("NVDA", 90.0, 1),
        ];
        rank_scores(&mut scores);

        assert_eq!(tickers(&scores), vec!["NVDA", "TSLA", "AAPL", "MSFT"]);
        assert!(is_ranked(&scores));
    }

    #[test]
    fn test_filters_keep_order() {
        let scores = vec![
            create_test_score("NVDA", 90.0, 1),
            create_test_score("TSLA", 60.0, 3),
            create_test_score("AAPL", 45.0, 2),
        ];

        assert_eq!(tickers(&filter_by_score(&scores, 60.0)), vec!["NVDA", "TSLA"]);
        assert_eq!(tickers(&filter_by_sources(&scores, 2)), vec!["TSLA", "AAPL"]);
    }

    #[test]
    fn test_top_n_is_a_view() {
        let scores = vec![
            create_test_score("NVDA", 90.0, 1),
            create_test_score("TSLA", 60.0, 3),
        ];
        assert_eq!(top_n(&scores, 1).len(), 1);
        assert_eq!(top_n(&scores, 10).len(), 2);
        assert_eq!(scores.len(), 2);
    }

    #[test]
    fn test_group_by_band() {
        let scores = vec![
            create_test_score("NVDA", 85.0, 1),
            create_test_score("TSLA", 82.0, 3),
            create_test_score("AAPL", 40.0, 2),
        ];
        let groups = group_by_band(&scores);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, ScoreBand::VeryStrong);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, ScoreBand::Weak);
    }
}
