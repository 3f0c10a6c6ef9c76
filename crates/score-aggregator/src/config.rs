//! Scoring configuration
//!
//! Weight tables and thresholds are validated when they are built; the
//! aggregators trust them afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use trend_core::{ScoringError, Source};

/// Non-negative weight per source. Sources without an entry weigh 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<Source, f64>", into = "BTreeMap<Source, f64>")]
pub struct SourceWeightTable {
    weights: BTreeMap<Source, f64>,
}

impl SourceWeightTable {
    pub fn new(entries: impl IntoIterator<Item = (Source, f64)>) -> Result<Self, ScoringError> {
        let mut weights = BTreeMap::new();
        for (source, weight) in entries {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ScoringError::InvalidWeight {
                    origin: source,
                    weight,
                });
            }
            weights.insert(source, weight);
        }
        Ok(Self { weights })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Long-side defaults
    pub fn default_long() -> Self {
        Self::from_static(&[
            (Source::Momentum, 0.20),
            (Source::Finviz, 0.12),
            (Source::Reddit, 0.10),
            (Source::News, 0.10),
            (Source::GoogleTrends, 0.06),
            (Source::ShortInterest, 0.06),
            (Source::OptionsActivity, 0.08),
            (Source::Perplexity, 0.06),
            (Source::InsiderTrading, 0.05),
            (Source::AnalystRatings, 0.06),
            (Source::CongressTrading, 0.05),
            (Source::Institutional, 0.06),
        ])
    }

    /// Short-side defaults
    pub fn default_short() -> Self {
        Self::from_static(&[
            (Source::BearishMomentum, 0.25),
            (Source::Fundamentals, 0.15),
            (Source::AnalystDowngrades, 0.12),
            (Source::BearishOptions, 0.12),
            (Source::InsiderSelling, 0.10),
            (Source::InstitutionalDist, 0.08),
            (Source::FinvizBearish, 0.08),
            (Source::CongressSelling, 0.05),
            (Source::NegativeNews, 0.05),
        ])
    }

    fn from_static(entries: &[(Source, f64)]) -> Self {
        Self {
            weights: entries.iter().cloned().collect(),
        }
    }

    /// Parse `source=weight` pairs separated by commas, e.g.
    /// `momentum=0.3,reddit=0.1`. Empty input gives an empty table.
    pub fn parse(input: &str) -> Result<Self, ScoringError> {
        let mut entries = Vec::new();
        for pair in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, value) = pair.split_once('=').ok_or_else(|| {
                ScoringError::InvalidConfig(format!("expected source=weight, got {:?}", pair))
            })?;
            let weight: f64 = value.trim().parse().map_err(|_| {
                ScoringError::InvalidConfig(format!(
                    "weight for {} is not a number: {:?}",
                    name.trim(),
                    value
                ))
            })?;
            entries.push((Source::from_name(name), weight));
        }
        Self::new(entries)
    }

    /// Copy of this table with `overrides` replacing or adding entries
    pub fn merged_with(&self, overrides: &SourceWeightTable) -> Self {
        let mut weights = self.weights.clone();
        weights.extend(overrides.weights.iter().map(|(s, w)| (s.clone(), *w)));
        Self { weights }
    }

    pub fn weight(&self, source: &Source) -> f64 {
        self.weights.get(source).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, source: &Source) -> bool {
        self.weights.contains_key(source)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Source, f64)> {
        self.weights.iter().map(|(s, w)| (s, *w))
    }

    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl TryFrom<BTreeMap<Source, f64>> for SourceWeightTable {
    type Error = ScoringError;

    fn try_from(weights: BTreeMap<Source, f64>) -> Result<Self, Self::Error> {
        Self::new(weights)
    }
}

impl From<SourceWeightTable> for BTreeMap<Source, f64> {
    fn from(table: SourceWeightTable) -> Self {
        table.weights
    }
}

fn check_points(name: &'static str, value: f64) -> Result<(), ScoringError> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(ScoringError::InvalidThreshold { name, value });
    }
    Ok(())
}

/// Long pipeline settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongConfig {
    pub weights: SourceWeightTable,
    /// Flat points for members of a hot theme
    pub theme_bonus: f64,
    /// Points per contributing source beyond the first
    pub multi_source_bonus: f64,
}

impl Default for LongConfig {
    fn default() -> Self {
        Self {
            weights: SourceWeightTable::default_long(),
            theme_bonus: 5.0,
            multi_source_bonus: 3.0,
        }
    }
}

impl LongConfig {
    pub fn new(
        weights: SourceWeightTable,
        theme_bonus: f64,
        multi_source_bonus: f64,
    ) -> Result<Self, ScoringError> {
        let config = Self {
            weights,
            theme_bonus,
            multi_source_bonus,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        check_points("theme_bonus", self.theme_bonus)?;
        check_points("multi_source_bonus", self.multi_source_bonus)?;
        Ok(())
    }
}

/// Short pipeline settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortConfig {
    pub weights: SourceWeightTable,
    pub multi_source_bonus: f64,
    /// Short float (percent) above which the squeeze penalty applies
    pub squeeze_threshold: f64,
    pub squeeze_penalty: f64,
    pub squeeze_penalty_enabled: bool,
    /// Inclusive floor for the short candidate list
    pub min_score: f64,
}

impl Default for ShortConfig {
    fn default() -> Self {
        Self {
            weights: SourceWeightTable::default_short(),
            multi_source_bonus: 4.0,
            squeeze_threshold: 20.0,
            squeeze_penalty: 15.0,
            squeeze_penalty_enabled: true,
            min_score: 40.0,
        }
    }
}

impl ShortConfig {
    pub fn new(
        weights: SourceWeightTable,
        multi_source_bonus: f64,
        squeeze_threshold: f64,
        squeeze_penalty: f64,
        min_score: f64,
    ) -> Result<Self, ScoringError> {
        let config = Self {
            weights,
            multi_source_bonus,
            squeeze_threshold,
            squeeze_penalty,
            squeeze_penalty_enabled: true,
            min_score,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn without_squeeze_penalty(mut self) -> Self {
        self.squeeze_penalty_enabled = false;
        self
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        check_points("short_multi_source_bonus", self.multi_source_bonus)?;
        check_points("squeeze_threshold", self.squeeze_threshold)?;
        check_points("squeeze_penalty", self.squeeze_penalty)?;
        check_points("min_score", self.min_score)?;
        Ok(())
    }
}

/// Both pipelines, validated together
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub long: LongConfig,
    pub short: ShortConfig,
}

impl ScoringConfig {
    pub fn new(long: LongConfig, short: ShortConfig) -> Result<Self, ScoringError> {
        long.validate()?;
        short.validate()?;
        Ok(Self { long, short })
    }
}
