//! Signal ingestion
//!
//! Turns adapter records into validated [`SourceSignal`]s, keeping at most
//! one signal per (ticker, source). A later signal for the same pair replaces
//! the earlier one, so input order decides and the result is deterministic.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use signal_normalizer::{normalize_for, RawSignal};
use tracing::{debug, warn};
use trend_core::{Attributes, ScoringError, SignalRecord, Source, SourceSignal, Ticker};

/// Counts gathered while building a batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestReport {
    pub accepted: usize,
    /// Missing ticker, non-numeric score, unparseable payload
    pub skipped_malformed: usize,
    /// Well-formed payloads with nothing to say for their source
    pub not_applicable: usize,
    pub duplicates_replaced: usize,
    pub skipped_by_source: BTreeMap<Source, usize>,
}

impl IngestReport {
    fn skip(&mut self, source: &Source) {
        self.skipped_malformed += 1;
        *self.skipped_by_source.entry(source.clone()).or_default() += 1;
    }

    /// Fold another report into this one
    pub fn absorb(&mut self, other: &IngestReport) {
        self.accepted += other.accepted;
        self.skipped_malformed += other.skipped_malformed;
        self.not_applicable += other.not_applicable;
        self.duplicates_replaced += other.duplicates_replaced;
        for (source, count) in &other.skipped_by_source {
            *self.skipped_by_source.entry(source.clone()).or_default() += count;
        }
    }
}

/// Immutable-once-built set of signals for one pipeline run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalBatch {
    signals: BTreeMap<(Ticker, Source), SourceSignal>,
    report: IngestReport,
}

impl SignalBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_signals(signals: impl IntoIterator<Item = SourceSignal>) -> Self {
        let mut batch = Self::new();
        for signal in signals {
            batch.push(signal);
        }
        batch
    }

    /// Add an already-normalized signal. Non-finite scores are rejected;
    /// finite scores outside 0-100 are clamped.
    pub fn push(&mut self, mut signal: SourceSignal) -> bool {
        if !signal.normalized_score.is_finite() {
            warn!(
                "Skipping {} signal for {}: score {} is not finite",
                signal.source, signal.ticker, signal.normalized_score
            );
            self.report.skip(&signal.source);
            return false;
        }
        if !(0.0..=100.0).contains(&signal.normalized_score) {
            debug!(
                "Clamping {} score {} for {}",
                signal.source, signal.normalized_score, signal.ticker
            );
            signal.normalized_score = signal.normalized_score.clamp(0.0, 100.0);
        }

        let key = (signal.ticker.clone(), signal.source.clone());
        if self.signals.insert(key, signal).is_some() {
            self.report.duplicates_replaced += 1;
        } else {
            self.report.accepted += 1;
        }
        true
    }

    /// Validate and normalize one adapter's records.
    ///
    /// Bad records are counted and skipped; the rest of the batch is unaffected.
    pub fn ingest_records(
        &mut self,
        source: &Source,
        records: impl IntoIterator<Item = SignalRecord>,
    ) {
        for record in records {
            match record_to_signal(source, record) {
                Ok(Some(signal)) => {
                    self.push(signal);
                }
                Ok(None) => self.report.not_applicable += 1,
                Err(e) => {
                    debug!("Skipping record: {}", e);
                    self.report.skip(source);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Signals ordered by ticker, then source
    pub fn iter(&self) -> impl Iterator<Item = &SourceSignal> {
        self.signals.values()
    }

    pub fn get(&self, ticker: &Ticker, source: &Source) -> Option<&SourceSignal> {
        self.signals.get(&(ticker.clone(), source.clone()))
    }

    pub fn tickers(&self) -> BTreeSet<Ticker> {
        self.signals.keys().map(|(t, _)| t.clone()).collect()
    }

    /// Signals grouped per ticker, tickers in lexical order
    pub fn by_ticker(&self) -> BTreeMap<&Ticker, Vec<&SourceSignal>> {
        let mut groups: BTreeMap<&Ticker, Vec<&SourceSignal>> = BTreeMap::new();
        for ((ticker, _), signal) in &self.signals {
            groups.entry(ticker).or_default().push(signal);
        }
        groups
    }

    /// Number of tickers each source reported on
    pub fn coverage(&self) -> BTreeMap<Source, usize> {
        let mut coverage: BTreeMap<Source, usize> = BTreeMap::new();
        for (_, source) in self.signals.keys() {
            *coverage.entry(source.clone()).or_default() += 1;
        }
        coverage
    }

    pub fn report(&self) -> &IngestReport {
        &self.report
    }
}

fn record_to_signal(
    source: &Source,
    record: SignalRecord,
) -> Result<Option<SourceSignal>, ScoringError> {
    let malformed = |reason: String| ScoringError::MalformedSignal {
        origin: source.clone(),
        reason,
    };

    let raw_ticker = record
        .ticker
        .ok_or_else(|| malformed("missing ticker".to_string()))?;
    let ticker = Ticker::parse(&raw_ticker)
        .map_err(|_| malformed(format!("invalid ticker {:?}", raw_ticker)))?;

    let (score, mut attributes) = match (record.score, record.raw) {
        (Some(score), _) => {
            let score = score
                .as_f64()
                .filter(|s| s.is_finite())
                .ok_or_else(|| malformed(format!("non-numeric score {} for {}", score, ticker)))?;
            (score, Attributes::new())
        }
        (None, Some(raw)) => {
            let raw = RawSignal::from_value(source, raw)?;
            match normalize_for(source, &raw)? {
                Some(normalized) => (normalized.score, normalized.attributes),
                None => return Ok(None),
            }
        }
        (None, None) => return Err(malformed(format!("no score or payload for {}", ticker))),
    };

    attributes.extend(record.attributes);
    Ok(Some(SourceSignal {
        source: source.clone(),
        ticker,
        normalized_score: score,
        attributes,
    }))
}
