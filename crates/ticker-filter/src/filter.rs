use std::collections::{BTreeSet, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use trend_core::Ticker;

use crate::blacklist::{ALLOW_SHORT_TICKERS, COMMON_WORD_TICKERS, TICKER_BLACKLIST};

/// Bare mentions this short need to be allow-listed
const SHORT_BARE_LEN: usize = 2;

/// How a candidate was found in the text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MentionContext {
    /// Text contained `$XYZ` rather than a bare `XYZ`
    pub explicit_dollar_prefix: bool,
}

impl MentionContext {
    pub fn dollar() -> Self {
        Self {
            explicit_dollar_prefix: true,
        }
    }

    pub fn bare() -> Self {
        Self {
            explicit_dollar_prefix: false,
        }
    }
}

/// Two-tier ticker classifier
pub struct TickerFilter {
    blacklist: HashSet<String>,
    common_words: HashSet<String>,
    allow_short: HashSet<String>,
    /// `$TICKER`, case-insensitive
    dollar_regex: Regex,
    /// Standalone all-uppercase word
    bare_regex: Regex,
}

impl Default for TickerFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl TickerFilter {
    /// Filter with the built-in word lists
    pub fn new() -> Self {
        Self::with_lists(
            TICKER_BLACKLIST.iter().copied(),
            COMMON_WORD_TICKERS.iter().copied(),
            ALLOW_SHORT_TICKERS.iter().copied(),
        )
    }

    /// Filter with custom word lists (entries are matched case-insensitively)
    pub fn with_lists<'a>(
        blacklist: impl IntoIterator<Item = &'a str>,
        common_words: impl IntoIterator<Item = &'a str>,
        allow_short: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            blacklist: upper_set(blacklist),
            common_words: upper_set(common_words),
            allow_short: upper_set(allow_short),
            dollar_regex: Regex::new(r"\$([A-Za-z][A-Za-z0-9]{0,5})\b")
                .expect("dollar ticker pattern is valid"),
            bare_regex: Regex::new(r"\b([A-Z][A-Z0-9]{0,5})\b")
                .expect("bare ticker pattern is valid"),
        }
    }

    /// Decide whether `candidate` is a tradeable ticker rather than noise.
    ///
    /// Candidates arrive as 1-6 ASCII letters/digits. Pure numbers and
    /// six-character words (longer than any listed symbol) are rejected outright.
    pub fn is_valid(&self, candidate: &str, context: MentionContext) -> bool {
        let len = candidate.len();
        if len == 0
            || len > trend_core::MAX_TICKER_LEN
            || !candidate.chars().all(|c| c.is_ascii_alphanumeric())
            || !candidate.chars().any(|c| c.is_ascii_alphabetic())
        {
            return false;
        }

        let upper = candidate.to_ascii_uppercase();
        if self.blacklist.contains(&upper) {
            return false;
        }
        if context.explicit_dollar_prefix {
            return true;
        }

        // Bare mention: strict tier
        if self.common_words.contains(&upper) {
            return false;
        }
        if len <= SHORT_BARE_LEN {
            return self.allow_short.contains(&upper);
        }
        true
    }

    /// Extract plausible tickers from free text.
    ///
    /// Pass 1 takes `$TICKER` mentions (lenient); pass 2 takes standalone
    /// all-uppercase words (strict).
    pub fn extract(&self, text: &str) -> BTreeSet<Ticker> {
        let mut tickers = BTreeSet::new();

        for cap in self.dollar_regex.captures_iter(text) {
            let candidate = &cap[1];
            if self.is_valid(candidate, MentionContext::dollar()) {
                if let Ok(ticker) = Ticker::parse(candidate) {
                    tickers.insert(ticker);
                }
            }
        }

        for cap in self.bare_regex.captures_iter(text) {
            let candidate = &cap[1];
            if self.is_valid(candidate, MentionContext::bare()) {
                if let Ok(ticker) = Ticker::parse(candidate) {
                    tickers.insert(ticker);
                }
            }
        }

        tracing::trace!("Extracted {} tickers from {} chars", tickers.len(), text.len());
        tickers
    }
}

fn upper_set<'a>(words: impl IntoIterator<Item = &'a str>) -> HashSet<String> {
    words
        .into_iter()
        .map(|w| w.trim().to_ascii_uppercase())
        .collect()
}

fn default_filter() -> &'static TickerFilter {
    static FILTER: OnceLock<TickerFilter> = OnceLock::new();
    FILTER.get_or_init(TickerFilter::new)
}

/// Classify a candidate with the built-in word lists
pub fn is_valid_ticker(candidate: &str, context: MentionContext) -> bool {
    default_filter().is_valid(candidate, context)
}

/// Extract tickers from text with the built-in word lists
pub fn extract_tickers(text: &str) -> BTreeSet<Ticker> {
    default_filter().extract(text)
}
