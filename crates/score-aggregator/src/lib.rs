//! Score Aggregator
//!
//! Fuses per-source signals into ranked long and short composite scores.
//! Ingestion validates and deduplicates signals, the two aggregators score
//! every ticker that has at least one signal, and the engine packages both
//! lists into a read-only snapshot for reporting.

pub mod batch;
mod composite;
pub mod config;
pub mod engine;
pub mod highlights;
pub mod long;
pub mod ranker;
pub mod short;
pub mod snapshot;
#[cfg(test)]
mod tests;

pub use batch::{IngestReport, SignalBatch};
pub use config::{LongConfig, ScoringConfig, ShortConfig, SourceWeightTable};
pub use engine::ScoringEngine;
pub use long::{aggregate_long, LongAggregator};
pub use ranker::{compare_scores, filter_by_score, filter_by_sources, rank_scores, top_n};
pub use short::{aggregate_short, ShortAggregator, ShortInterestIndex};
pub use snapshot::{DiscoverySummary, ScoreSnapshot};
