use thiserror::Error;

use crate::Source;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("Invalid ticker: {0:?}")]
    InvalidTicker(String),

    #[error("Malformed signal from {origin}: {reason}")]
    MalformedSignal { origin: Source, reason: String },

    #[error("Invalid weight for {origin}: {weight}")]
    InvalidWeight { origin: Source, weight: f64 },

    #[error("Invalid threshold {name}: {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Inconsistent score for {ticker}: {reason}")]
    InconsistentScore { ticker: String, reason: String },

    #[error("Inconsistent snapshot: {0}")]
    InconsistentSnapshot(String),

    #[error("Source error: {0}")]
    SourceError(String),
}
