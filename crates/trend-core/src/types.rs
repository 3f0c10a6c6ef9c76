use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ScoringError, Source};

/// Maximum accepted symbol length
pub const MAX_TICKER_LEN: usize = 5;

/// Canonical (uppercase) stock/ETF symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Parse and canonicalize a symbol: 1-5 ASCII alphanumerics, case-insensitive.
    pub fn parse(raw: &str) -> Result<Self, ScoringError> {
        let trimmed = raw.trim().trim_start_matches('$');
        if trimmed.is_empty()
            || trimmed.len() > MAX_TICKER_LEN
            || !trimmed.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(ScoringError::InvalidTicker(raw.to_string()));
        }
        Ok(Ticker(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Ticker {
    type Error = ScoringError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ticker::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

/// Free-form per-signal attributes, ordered for deterministic output
pub type Attributes = BTreeMap<String, Value>;

/// One adapter's observation about one ticker for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSignal {
    pub source: Source,
    pub ticker: Ticker,
    /// Score on the common 0-100 scale
    pub normalized_score: f64,
    #[serde(default)]
    pub attributes: Attributes,
}

impl SourceSignal {
    pub fn new(source: Source, ticker: Ticker, normalized_score: f64) -> Self {
        Self {
            source,
            ticker,
            normalized_score,
            attributes: Attributes::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    pub fn attr_f64(&self, key: &str) -> Option<f64> {
        self.attributes.get(key).and_then(Value::as_f64)
    }

    pub fn attr_bool(&self, key: &str) -> Option<bool> {
        self.attributes.get(key).and_then(Value::as_bool)
    }

    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    pub fn attr_str_list(&self, key: &str) -> Vec<&str> {
        self.attributes
            .get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// A record as delivered by an adapter, before validation.
///
/// Either `score` (already on the 0-100 scale) or `raw` (a source-specific
/// payload the normalizer understands) should be present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub score: Option<Value>,
    #[serde(default)]
    pub raw: Option<Value>,
    #[serde(default)]
    pub attributes: Attributes,
}

/// Points added or removed on top of the weighted base score
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreAdjustments {
    pub theme_bonus: f64,
    pub multi_source_bonus: f64,
    pub auxiliary_bonus: f64,
    pub squeeze_penalty: f64,
}

impl ScoreAdjustments {
    pub fn net(&self) -> f64 {
        self.theme_bonus + self.multi_source_bonus + self.auxiliary_bonus - self.squeeze_penalty
    }
}

/// Fused ranking value for one ticker in one pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateScore {
    pub ticker: Ticker,
    /// Final score, clamped to 0-100
    pub combined_score: f64,
    pub num_sources: usize,
    pub contributing_sources: BTreeSet<Source>,
    pub score_breakdown: BTreeMap<Source, f64>,
    /// Weighted mean over contributing sources, before adjustments
    pub base_score: f64,
    pub adjustments: ScoreAdjustments,
    #[serde(default)]
    pub in_hot_theme: bool,
    #[serde(default)]
    pub squeeze_warning: bool,
    #[serde(default)]
    pub highlights: Vec<String>,
}

impl AggregateScore {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.combined_score)
    }

    /// Breakdown keys, contributing sources and the source count all agree
    pub fn is_consistent(&self) -> bool {
        self.num_sources == self.contributing_sources.len()
            && self.score_breakdown.len() == self.contributing_sources.len()
            && self
                .score_breakdown
                .keys()
                .all(|s| self.contributing_sources.contains(s))
            && (0.0..=100.0).contains(&self.combined_score)
    }
}

/// Coarse display band for a 0-100 score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    VeryStrong,
    Strong,
    Positive,
    Weak,
    VeryWeak,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 80.0 => ScoreBand::VeryStrong,
            s if s >= 65.0 => ScoreBand::Strong,
            s if s >= 50.0 => ScoreBand::Positive,
            s if s >= 35.0 => ScoreBand::Weak,
            _ => ScoreBand::VeryWeak,
        }
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            ScoreBand::VeryStrong => "+++",
            ScoreBand::Strong => "++",
            ScoreBand::Positive => "+",
            ScoreBand::Weak => "-",
            ScoreBand::VeryWeak => "--",
        }
    }
}
