//! Ticker Filter
//!
//! Separates real ticker symbols from noise in free text (Reddit posts, news
//! headlines, AI summaries). A `$`-prefixed mention is a high-confidence signal
//! and is only checked against the blacklist; a bare uppercase word must also
//! be at least three characters unless it is a well-known short ticker.

pub mod blacklist;
pub mod filter;

pub use blacklist::{ALLOW_SHORT_TICKERS, COMMON_WORD_TICKERS, TICKER_BLACKLIST};
pub use filter::{extract_tickers, is_valid_ticker, MentionContext, TickerFilter};
