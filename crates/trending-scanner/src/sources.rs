//! File-backed signal adapters
//!
//! Each source reads `<dir>/<source>.json`, a JSON array of signal records.
//! Reddit and news may also drop raw post titles or headlines into
//! `<dir>/<source>_posts.json` (an array of strings); tickers are pulled out
//! of that text and counted as mentions.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use score_aggregator::SignalBatch;
use serde_json::json;
use ticker_filter::TickerFilter;
use tokio::task::JoinSet;
use trend_core::{Pipeline, ScoringError, SignalRecord, SignalSource, Source, Ticker};

/// Headlines kept per ticker when counting mentions
const MAX_HEADLINES: usize = 3;

pub struct JsonFileSource {
    source: Source,
    dir: PathBuf,
}

impl JsonFileSource {
    pub fn new(source: Source, dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            dir: dir.into(),
        }
    }

    fn records_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.source))
    }

    fn posts_path(&self) -> Option<PathBuf> {
        matches!(self.source, Source::Reddit | Source::News)
            .then(|| self.dir.join(format!("{}_posts.json", self.source)))
    }
}

#[async_trait]
impl SignalSource for JsonFileSource {
    fn source(&self) -> Source {
        self.source.clone()
    }

    async fn collect(&self) -> Result<Vec<SignalRecord>, ScoringError> {
        let mut records: Vec<SignalRecord> = read_json(&self.records_path())
            .await?
            .unwrap_or_default();

        if let Some(posts_path) = self.posts_path() {
            if let Some(texts) = read_json::<Vec<String>>(&posts_path).await? {
                let mentions = mention_records(&texts, &TickerFilter::new());
                tracing::debug!(
                    "{}: {} tickers mentioned across {} posts",
                    self.source,
                    mentions.len(),
                    texts.len()
                );
                records.extend(mentions);
            }
        }

        Ok(records)
    }
}

/// `None` when the file does not exist; the source simply found nothing
async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>, ScoringError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ScoringError::SourceError(format!(
                "failed to read {}: {}",
                path.display(),
                e
            )))
        }
    };

    serde_json::from_str(&content).map(Some).map_err(|e| {
        ScoringError::SourceError(format!("failed to parse {}: {}", path.display(), e))
    })
}

/// One mention-count record per ticker found in `texts`. A text counts once
/// per ticker no matter how often it repeats the symbol.
pub fn mention_records(texts: &[String], filter: &TickerFilter) -> Vec<SignalRecord> {
    let mut mentions: BTreeMap<Ticker, (u32, Vec<&str>)> = BTreeMap::new();

    for text in texts {
        for ticker in filter.extract(text) {
            let entry = mentions.entry(ticker).or_default();
            entry.0 += 1;
            if entry.1.len() < MAX_HEADLINES {
                entry.1.push(text.as_str());
            }
        }
    }

    mentions
        .into_iter()
        .map(|(ticker, (count, headlines))| SignalRecord {
            ticker: Some(ticker.to_string()),
            raw: Some(json!({ "mentions": count, "headlines": headlines })),
            ..Default::default()
        })
        .collect()
}

/// One adapter per known source, all reading from `dir`
pub fn file_sources(dir: &Path) -> Vec<Box<dyn SignalSource>> {
    Source::long_sources()
        .into_iter()
        .chain(Source::short_sources())
        .map(|source| Box::new(JsonFileSource::new(source, dir)) as Box<dyn SignalSource>)
        .collect()
}

/// Materialized input for one run
#[derive(Debug, Default)]
pub struct LoadedSignals {
    pub long: SignalBatch,
    pub short: SignalBatch,
    pub failed_sources: Vec<Source>,
}

/// Collect every adapter concurrently and sort records into the long or
/// short batch by the source's pipeline. Raw payloads from long sources with
/// a bearish counterpart are also read bearishly into the short batch. A
/// failing adapter is logged and contributes nothing.
pub async fn load_signals(sources: Vec<Box<dyn SignalSource>>) -> LoadedSignals {
    let mut tasks = JoinSet::new();

    for adapter in sources {
        tasks.spawn(async move {
            let result = adapter.collect().await;
            (adapter.source(), result)
        });
    }

    // Join order is nondeterministic; order by source before ingesting
    let mut collected = BTreeMap::new();
    let mut loaded = LoadedSignals::default();

    while let Some(result) = tasks.join_next().await {
        match result {
            Ok((source, Ok(records))) => {
                collected.insert(source, records);
            }
            Ok((source, Err(e))) => {
                tracing::warn!("Source {} failed: {}", source, e);
                loaded.failed_sources.push(source);
            }
            Err(e) => {
                tracing::error!("Task error: {}", e);
            }
        }
    }

    // Derived readings first, so a short source's own file wins on conflict
    for (source, records) in &collected {
        let Some(counterpart) = source.bearish_counterpart() else {
            continue;
        };
        let derived = bearish_records(records);
        if !derived.is_empty() {
            tracing::debug!("{}: {} records read as {}", source, derived.len(), counterpart);
            loaded.short.ingest_records(&counterpart, derived);
        }
    }

    for (source, records) in collected {
        let count = records.len();
        match source.pipeline() {
            Some(Pipeline::Short) => loaded.short.ingest_records(&source, records),
            _ => loaded.long.ingest_records(&source, records),
        }
        if count > 0 {
            tracing::info!("  {}: {} records", source, count);
        }
    }

    loaded.failed_sources.sort();
    loaded
}

/// Records carrying a raw payload, with any pre-computed long score dropped
/// so the payload is read again for the short side
fn bearish_records(records: &[SignalRecord]) -> Vec<SignalRecord> {
    records
        .iter()
        .filter(|r| r.raw.is_some())
        .map(|r| SignalRecord {
            score: None,
            ..r.clone()
        })
        .collect()
}
