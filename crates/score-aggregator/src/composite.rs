use std::collections::{BTreeMap, BTreeSet};

use trend_core::{Source, SourceSignal};

use crate::config::SourceWeightTable;

/// Weighted mean over the sources that observed a ticker
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Composite {
    pub base_score: f64,
    pub breakdown: BTreeMap<Source, f64>,
    pub contributing: BTreeSet<Source>,
    /// Sum of `auxiliary_bonus` attributes
    pub auxiliary_bonus: f64,
}

impl Composite {
    /// Weights are renormalized over the contributing sources only, so a
    /// ticker is not penalized for sources that never saw it. When every
    /// contributing weight is 0 the base score is 0.
    pub fn from_signals(signals: &[&SourceSignal], weights: &SourceWeightTable) -> Option<Self> {
        if signals.is_empty() {
            return None;
        }

        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;
        let mut breakdown = BTreeMap::new();
        let mut auxiliary_bonus = 0.0;

        for signal in signals {
            let weight = weights.weight(&signal.source);
            weighted_sum += signal.normalized_score * weight;
            total_weight += weight;
            breakdown.insert(signal.source.clone(), signal.normalized_score);

            if let Some(bonus) = signal.attr_f64("auxiliary_bonus").filter(|b| b.is_finite()) {
                auxiliary_bonus += bonus;
            }
        }

        let base_score = if total_weight > 0.0 {
            weighted_sum / total_weight
        } else {
            0.0
        };

        Some(Self {
            base_score,
            contributing: breakdown.keys().cloned().collect(),
            breakdown,
            auxiliary_bonus,
        })
    }

    pub fn num_sources(&self) -> usize {
        self.contributing.len()
    }

    /// `per_source` points for each source beyond the first
    pub fn multi_source_bonus(&self, per_source: f64) -> f64 {
        per_source * self.num_sources().saturating_sub(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use trend_core::Ticker;

    #[test]
    fn test_renormalizes_over_contributing_sources() {
        let ticker = Ticker::parse("AAPL").unwrap();
        let a = SourceSignal::new(Source::Momentum, ticker.clone(), 80.0);
        let b = SourceSignal::new(Source::Reddit, ticker, 40.0);
        // News has weight but no signal; it must not dilute the mean
        let weights = SourceWeightTable::new([
            (Source::Momentum, 0.6),
            (Source::Reddit, 0.4),
            (Source::News, 5.0),
        ])
        .unwrap();

        let composite = Composite::from_signals(&[&a, &b], &weights).unwrap();
        assert_relative_eq!(composite.base_score, 64.0, epsilon = 1e-9);
        assert_eq!(composite.num_sources(), 2);
        assert_relative_eq!(composite.multi_source_bonus(3.0), 3.0);
    }

    #[test]
    fn test_zero_weight_only() {
        let signal = SourceSignal::new(Source::EtfFlows, Ticker::parse("XOM").unwrap(), 90.0)
            .with_attribute("auxiliary_bonus", 4.5);
        let composite =
            Composite::from_signals(&[&signal], &SourceWeightTable::default_long()).unwrap();

        assert_eq!(composite.base_score, 0.0);
        assert_eq!(composite.breakdown[&Source::EtfFlows], 90.0);
        assert_relative_eq!(composite.auxiliary_bonus, 4.5);
        assert_eq!(composite.multi_source_bonus(3.0), 0.0);
    }

    #[test]
    fn test_empty_is_none() {
        assert!(Composite::from_signals(&[], &SourceWeightTable::default_long()).is_none());
    }
}
