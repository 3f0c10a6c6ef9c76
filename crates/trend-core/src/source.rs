use std::fmt;

use serde::{Deserialize, Serialize};

/// Which side of the report a source feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pipeline {
    Long,
    Short,
}

/// An independent data adapter producing per-ticker signals.
///
/// Unknown names survive as `Other` so a signal is never silently lost; they
/// simply carry no weight in either pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Source {
    // Long side
    Momentum,
    Finviz,
    Reddit,
    News,
    GoogleTrends,
    ShortInterest,
    OptionsActivity,
    Perplexity,
    InsiderTrading,
    AnalystRatings,
    CongressTrading,
    Institutional,
    /// Sector ETF inflows; contributes an auxiliary bonus rather than a weighted score
    EtfFlows,
    // Short side
    BearishMomentum,
    Fundamentals,
    AnalystDowngrades,
    BearishOptions,
    InsiderSelling,
    InstitutionalDist,
    FinvizBearish,
    CongressSelling,
    NegativeNews,
    Other(String),
}

impl Source {
    pub fn as_str(&self) -> &str {
        match self {
            Source::Momentum => "momentum",
            Source::Finviz => "finviz",
            Source::Reddit => "reddit",
            Source::News => "news",
            Source::GoogleTrends => "google_trends",
            Source::ShortInterest => "short_interest",
            Source::OptionsActivity => "options_activity",
            Source::Perplexity => "perplexity",
            Source::InsiderTrading => "insider_trading",
            Source::AnalystRatings => "analyst_ratings",
            Source::CongressTrading => "congress_trading",
            Source::Institutional => "institutional",
            Source::EtfFlows => "etf_flows",
            Source::BearishMomentum => "bearish_momentum",
            Source::Fundamentals => "fundamentals",
            Source::AnalystDowngrades => "analyst_downgrades",
            Source::BearishOptions => "bearish_options",
            Source::InsiderSelling => "insider_selling",
            Source::InstitutionalDist => "institutional_dist",
            Source::FinvizBearish => "finviz_bearish",
            Source::CongressSelling => "congress_selling",
            Source::NegativeNews => "negative_news",
            Source::Other(name) => name,
        }
    }

    /// Resolve a source name. Matching is case-insensitive and accepts the
    /// short aliases used in older report files.
    pub fn from_name(name: &str) -> Self {
        let normalized = name.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "momentum" => Source::Momentum,
            "finviz" => Source::Finviz,
            "reddit" => Source::Reddit,
            "news" => Source::News,
            "google_trends" | "trends" => Source::GoogleTrends,
            "short_interest" => Source::ShortInterest,
            "options_activity" | "options" => Source::OptionsActivity,
            "perplexity" => Source::Perplexity,
            "insider_trading" | "insider" => Source::InsiderTrading,
            "analyst_ratings" | "analyst" => Source::AnalystRatings,
            "congress_trading" | "congress" => Source::CongressTrading,
            "institutional" => Source::Institutional,
            "etf_flows" => Source::EtfFlows,
            "bearish_momentum" => Source::BearishMomentum,
            "fundamentals" => Source::Fundamentals,
            "analyst_downgrades" => Source::AnalystDowngrades,
            "bearish_options" => Source::BearishOptions,
            "insider_selling" => Source::InsiderSelling,
            "institutional_dist" => Source::InstitutionalDist,
            "finviz_bearish" => Source::FinvizBearish,
            "congress_selling" => Source::CongressSelling,
            "negative_news" => Source::NegativeNews,
            _ => Source::Other(normalized),
        }
    }

    /// The pipeline this source belongs to, `None` for unknown sources
    pub fn pipeline(&self) -> Option<Pipeline> {
        match self {
            Source::Momentum
            | Source::Finviz
            | Source::Reddit
            | Source::News
            | Source::GoogleTrends
            | Source::ShortInterest
            | Source::OptionsActivity
            | Source::Perplexity
            | Source::InsiderTrading
            | Source::AnalystRatings
            | Source::CongressTrading
            | Source::Institutional
            | Source::EtfFlows => Some(Pipeline::Long),
            Source::BearishMomentum
            | Source::Fundamentals
            | Source::AnalystDowngrades
            | Source::BearishOptions
            | Source::InsiderSelling
            | Source::InstitutionalDist
            | Source::FinvizBearish
            | Source::CongressSelling
            | Source::NegativeNews => Some(Pipeline::Short),
            Source::Other(_) => None,
        }
    }

    /// Short-side source that reads this long source's records bearishly
    pub fn bearish_counterpart(&self) -> Option<Source> {
        let counterpart = match self {
            Source::Momentum => Source::BearishMomentum,
            Source::Finviz => Source::FinvizBearish,
            Source::News => Source::NegativeNews,
            Source::OptionsActivity => Source::BearishOptions,
            Source::InsiderTrading => Source::InsiderSelling,
            Source::AnalystRatings => Source::AnalystDowngrades,
            Source::CongressTrading => Source::CongressSelling,
            Source::Institutional => Source::InstitutionalDist,
            _ => return None,
        };
        Some(counterpart)
    }

    /// Every known long-side source, in report order
    pub fn long_sources() -> Vec<Source> {
        vec![
            Source::Momentum,
            Source::Finviz,
            Source::Reddit,
            Source::News,
            Source::GoogleTrends,
            Source::ShortInterest,
            Source::OptionsActivity,
            Source::Perplexity,
            Source::InsiderTrading,
            Source::AnalystRatings,
            Source::CongressTrading,
            Source::Institutional,
            Source::EtfFlows,
        ]
    }

    /// Every known short-side source, in report order
    pub fn short_sources() -> Vec<Source> {
        vec![
            Source::BearishMomentum,
            Source::Fundamentals,
            Source::AnalystDowngrades,
            Source::BearishOptions,
            Source::InsiderSelling,
            Source::InstitutionalDist,
            Source::FinvizBearish,
            Source::CongressSelling,
            Source::NegativeNews,
        ]
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Source {
    fn from(name: String) -> Self {
        Source::from_name(&name)
    }
}

impl From<&str> for Source {
    fn from(name: &str) -> Self {
        Source::from_name(name)
    }
}

impl From<Source> for String {
    fn from(source: Source) -> Self {
        source.as_str().to_string()
    }
}
