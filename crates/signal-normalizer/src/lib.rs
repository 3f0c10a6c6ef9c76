//! Signal Normalizer
//!
//! Maps heterogeneous per-source payloads onto the common 0-100 scale. Each
//! payload is a [`RawSignal`] variant and every rule is a pure, total function
//! of that variant: missing optional inputs fall back to documented defaults and
//! an empty payload scores 0.
//!
//! Short-side sources reuse long-side payloads and read them bearishly (see
//! [`bearish`]); a payload without a bearish reading yields no signal.

pub mod activity;
pub mod bearish;
pub mod categorical;
pub mod continuous;
pub mod count;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use trend_core::{Attributes, Pipeline, ScoringError, Source};

pub use activity::{
    congress_score, insider_score, institutional_score, CongressInput, CongressSignal,
    InsiderInput, InstitutionalInput, InstitutionalSignal,
};
pub use bearish::{bearish_momentum, fundamentals_stress, BearishReading, FundamentalsInput};
pub use categorical::{
    analyst_score, finviz_bearish_score, screener_score, AnalystAction, AnalystInput,
    CategoryTable, ScreenerInput, ScreenerTag,
};
pub use continuous::{
    hot_holding_score, momentum_score, options_flow, options_score, sector_flow_score,
    short_interest_score, squeeze_risk, HoldingFlowInput, MomentumInput, OptionsFlow,
    OptionsInput, SectorFlowInput, ShortInterestInput, SqueezeRisk, ETF_FLOW_BONUS_RATE,
};
pub use count::{
    discovery_score, search_trend_score, DiscoveryInput, DiscoveryTone, MentionInput,
    MentionRule, SearchTrendInput, Sentiment, NEWS_RULE, REDDIT_RULE,
};

/// Clamp to the common scale; NaN maps to 0
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}

/// Source-specific payload, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawSignal {
    Momentum(MomentumInput),
    Screener(ScreenerInput),
    ShortInterest(ShortInterestInput),
    Reddit(MentionInput),
    News(MentionInput),
    SearchTrend(SearchTrendInput),
    Options(OptionsInput),
    Discovery(DiscoveryInput),
    Insider(InsiderInput),
    Analyst(AnalystInput),
    Congress(CongressInput),
    Institutional(InstitutionalInput),
    HoldingFlow(HoldingFlowInput),
    Fundamentals(FundamentalsInput),
}

/// A normalized score with the attributes the aggregators and reports read
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub score: f64,
    pub attributes: Attributes,
}

/// Payload kind a known source delivers, `None` for unknown sources
pub fn payload_kind(source: &Source) -> Option<&'static str> {
    let kind = match source {
        Source::Momentum | Source::BearishMomentum => "momentum",
        Source::Finviz | Source::FinvizBearish => "screener",
        Source::Reddit => "reddit",
        Source::News | Source::NegativeNews => "news",
        Source::GoogleTrends => "search_trend",
        Source::ShortInterest => "short_interest",
        Source::OptionsActivity | Source::BearishOptions => "options",
        Source::Perplexity => "discovery",
        Source::InsiderTrading | Source::InsiderSelling => "insider",
        Source::AnalystRatings | Source::AnalystDowngrades => "analyst",
        Source::CongressTrading | Source::CongressSelling => "congress",
        Source::Institutional | Source::InstitutionalDist => "institutional",
        Source::EtfFlows => "holding_flow",
        Source::Fundamentals => "fundamentals",
        Source::Other(_) => return None,
    };
    Some(kind)
}

impl RawSignal {
    /// Parse a payload for `source`. The `kind` tag may be omitted for known
    /// sources; unknown sources must carry it.
    pub fn from_value(source: &Source, mut value: Value) -> Result<Self, ScoringError> {
        if let Value::Object(map) = &mut value {
            if !map.contains_key("kind") {
                if let Some(kind) = payload_kind(source) {
                    map.insert("kind".to_string(), Value::from(kind));
                }
            }
        }
        serde_json::from_value(value).map_err(|e| ScoringError::MalformedSignal {
            origin: source.clone(),
            reason: e.to_string(),
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RawSignal::Momentum(_) => "momentum",
            RawSignal::Screener(_) => "screener",
            RawSignal::ShortInterest(_) => "short_interest",
            RawSignal::Reddit(_) => "reddit",
            RawSignal::News(_) => "news",
            RawSignal::SearchTrend(_) => "search_trend",
            RawSignal::Options(_) => "options",
            RawSignal::Discovery(_) => "discovery",
            RawSignal::Insider(_) => "insider",
            RawSignal::Analyst(_) => "analyst",
            RawSignal::Congress(_) => "congress",
            RawSignal::Institutional(_) => "institutional",
            RawSignal::HoldingFlow(_) => "holding_flow",
            RawSignal::Fundamentals(_) => "fundamentals",
        }
    }

    /// Long-side reading of the payload
    pub fn normalize(&self) -> Normalized {
        let mut attributes = self.base_attributes();
        let score = match self {
            RawSignal::Momentum(input) => momentum_score(input),
            RawSignal::Screener(input) => {
                let tags: Vec<&str> = input.tags.iter().map(ScreenerTag::as_str).collect();
                attributes.insert("signals".to_string(), Value::from(tags));
                screener_score(input)
            }
            RawSignal::ShortInterest(input) => {
                attributes.insert("squeeze_risk".to_string(), squeeze_risk(input).as_str().into());
                short_interest_score(input)
            }
            RawSignal::Reddit(input) | RawSignal::News(input) => {
                attributes.insert("sentiment".to_string(), input.sentiment().as_str().into());
                attributes.insert("sentiment_score".to_string(), input.sentiment_score().into());
                if matches!(self, RawSignal::Reddit(_)) {
                    REDDIT_RULE.score(input)
                } else {
                    NEWS_RULE.score(input)
                }
            }
            RawSignal::SearchTrend(input) => search_trend_score(input),
            RawSignal::Options(input) => {
                attributes.insert("signal".to_string(), options_flow(input).as_str().into());
                options_score(input)
            }
            RawSignal::Discovery(input) => discovery_score(input),
            RawSignal::Insider(input) => insider_score(input),
            RawSignal::Analyst(input) => analyst_score(input),
            RawSignal::Congress(input) => {
                attributes.insert("signal".to_string(), input.signal().as_str().into());
                congress_score(input)
            }
            RawSignal::Institutional(input) => {
                attributes.insert("signal".to_string(), input.signal().as_str().into());
                institutional_score(input)
            }
            RawSignal::HoldingFlow(input) => {
                let score = hot_holding_score(input);
                attributes.insert(
                    "auxiliary_bonus".to_string(),
                    (score * ETF_FLOW_BONUS_RATE).into(),
                );
                score
            }
            RawSignal::Fundamentals(input) => match fundamentals_stress(input) {
                Some(reading) => {
                    attributes.insert("signals".to_string(), Value::from(reading.labels));
                    reading.score
                }
                None => 0.0,
            },
        };

        Normalized {
            score: clamp_score(score),
            attributes,
        }
    }

    /// Short-side reading. `None` when the payload carries nothing bearish.
    pub fn normalize_bearish(&self) -> Option<Normalized> {
        let (score, labels): (f64, Vec<&str>) = match self {
            RawSignal::Momentum(input) => {
                let reading = bearish_momentum(input)?;
                (reading.score, reading.labels)
            }
            RawSignal::Fundamentals(input) => {
                let reading = fundamentals_stress(input)?;
                (reading.score, reading.labels)
            }
            RawSignal::Screener(input) => finviz_bearish_score(input)?,
            RawSignal::Analyst(input) => (
                bearish::analyst_downgrade_score(input)?,
                vec![input.action.as_str()],
            ),
            RawSignal::Options(input) => {
                let score = bearish::bearish_options_score(input)?;
                let label = match options_flow(input) {
                    OptionsFlow::BearishSweep => "bearish_sweep",
                    _ => "heavy_puts",
                };
                (score, vec![label])
            }
            RawSignal::Insider(input) => {
                (bearish::insider_selling_score(input)?, vec!["insider_selling"])
            }
            RawSignal::Institutional(input) => (
                bearish::institutional_distribution_score(input)?,
                vec!["distribution"],
            ),
            RawSignal::Congress(input) => {
                (bearish::congress_selling_score(input)?, vec!["congress_selling"])
            }
            RawSignal::News(input) => (bearish::negative_news_score(input)?, vec!["negative_news"]),
            RawSignal::ShortInterest(_)
            | RawSignal::Reddit(_)
            | RawSignal::SearchTrend(_)
            | RawSignal::Discovery(_)
            | RawSignal::HoldingFlow(_) => return None,
        };

        let mut attributes = self.base_attributes();
        attributes.insert("signals".to_string(), Value::from(labels));
        Some(Normalized {
            score: clamp_score(score),
            attributes,
        })
    }

    /// Payload fields as attributes, without the tag or unset fields
    fn base_attributes(&self) -> Attributes {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map
                .into_iter()
                .filter(|(k, v)| k != "kind" && !v.is_null())
                .collect(),
            _ => Attributes::new(),
        }
    }
}

/// Score a payload on the common scale
pub fn normalize(raw: &RawSignal) -> f64 {
    raw.normalize().score
}

/// Normalize a payload on behalf of `source`, reading it bearishly for
/// short-side sources.
///
/// Fails when a known source receives a payload of the wrong kind.
pub fn normalize_for(source: &Source, raw: &RawSignal) -> Result<Option<Normalized>, ScoringError> {
    if let Some(expected) = payload_kind(source) {
        if expected != raw.kind() {
            return Err(ScoringError::MalformedSignal {
                origin: source.clone(),
                reason: format!("expected {} payload, got {}", expected, raw.kind()),
            });
        }
    }

    match source.pipeline() {
        Some(Pipeline::Short) => {
            let normalized = raw.normalize_bearish();
            if normalized.is_none() {
                tracing::debug!("No bearish reading in {} payload for {}", raw.kind(), source);
            }
            Ok(normalized)
        }
        Some(Pipeline::Long) | None => Ok(Some(raw.normalize())),
    }
}
