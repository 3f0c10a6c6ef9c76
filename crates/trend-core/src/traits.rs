use async_trait::async_trait;

use crate::{ScoringError, SignalRecord, Source};

/// A data adapter (Reddit, news, screener, ...) that yields raw records for one source.
///
/// Adapters own all I/O; the scoring core only ever sees the materialized records.
#[async_trait]
pub trait SignalSource: Send + Sync {
    fn source(&self) -> Source;

    async fn collect(&self) -> Result<Vec<SignalRecord>, ScoringError>;
}
