//! Categorical sources: screener tags and analyst actions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::clamp_score;

/// Screener category attached to a ticker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenerTag {
    TopGainer,
    TopLoser,
    NewHigh,
    UnusualVolume,
    Oversold,
    Overbought,
    #[serde(other)]
    Unknown,
}

impl ScreenerTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenerTag::TopGainer => "top_gainer",
            ScreenerTag::TopLoser => "top_loser",
            ScreenerTag::NewHigh => "new_high",
            ScreenerTag::UnusualVolume => "unusual_volume",
            ScreenerTag::Oversold => "oversold",
            ScreenerTag::Overbought => "overbought",
            ScreenerTag::Unknown => "unknown",
        }
    }
}

/// Screener observation for one ticker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenerInput {
    #[serde(default)]
    pub tags: Vec<ScreenerTag>,
    /// Daily change in percent
    #[serde(default)]
    pub change: Option<f64>,
    #[serde(default)]
    pub sector: Option<String>,
}

/// Base score per category, with a capped bonus for stacking categories
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTable {
    pub base_scores: BTreeMap<ScreenerTag, f64>,
    /// Added per matched category beyond the first
    pub extra_category_bonus: f64,
    pub ceiling: f64,
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self {
            base_scores: BTreeMap::from([
                (ScreenerTag::TopGainer, 70.0),
                (ScreenerTag::NewHigh, 65.0),
                (ScreenerTag::UnusualVolume, 60.0),
                (ScreenerTag::Oversold, 45.0),
            ]),
            extra_category_bonus: 5.0,
            ceiling: 90.0,
        }
    }
}

impl CategoryTable {
    /// Highest base score among the matched categories, plus the stacking
    /// bonus, capped at the ceiling. Duplicated or unlisted tags add nothing.
    pub fn score(&self, tags: &[ScreenerTag]) -> f64 {
        let mut matched: Vec<f64> = Vec::new();
        let mut seen: Vec<ScreenerTag> = Vec::new();
        for tag in tags {
            if seen.contains(tag) {
                continue;
            }
            seen.push(*tag);
            if let Some(&base) = self.base_scores.get(tag) {
                matched.push(base);
            }
        }

        let Some(best) = matched.iter().copied().reduce(f64::max) else {
            return 0.0;
        };
        let bonus = self.extra_category_bonus * (matched.len() - 1) as f64;
        clamp_score((best + bonus).min(self.ceiling))
    }
}

/// Long-side screener score with the default table
pub fn screener_score(input: &ScreenerInput) -> f64 {
    CategoryTable::default().score(&input.tags)
}

/// Points a top loser earns per percent of decline
const LOSER_POINTS_PER_PCT: f64 = 5.0;
const LOSER_CAP: f64 = 80.0;
const OVERBOUGHT_BASE: f64 = 60.0;
const OVERBOUGHT_STACK_BONUS: f64 = 20.0;

/// Bearish reading of the screener: top losers and overbought names.
///
/// Returns `None` when neither tag is present.
pub fn finviz_bearish_score(input: &ScreenerInput) -> Option<(f64, Vec<&'static str>)> {
    let is_loser = input.tags.contains(&ScreenerTag::TopLoser);
    let is_overbought = input.tags.contains(&ScreenerTag::Overbought);

    let mut labels = Vec::new();
    let mut score = None;

    if is_loser {
        let change = input.change.unwrap_or(0.0).abs();
        score = Some((change * LOSER_POINTS_PER_PCT).min(LOSER_CAP));
        labels.push("top_loser");
    }
    if is_overbought {
        score = Some(match score {
            Some(s) => (s + OVERBOUGHT_STACK_BONUS).min(100.0),
            None => OVERBOUGHT_BASE,
        });
        labels.push("overbought");
    }

    score.map(|s| (clamp_score(s), labels))
}

/// Analyst action parsed from a headline or screener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalystAction {
    Upgrade,
    Downgrade,
    Initiation,
    PtRaise,
    PtLower,
    BuyRating,
    #[serde(other)]
    RatingChange,
}

impl AnalystAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalystAction::Upgrade => "upgrade",
            AnalystAction::Downgrade => "downgrade",
            AnalystAction::Initiation => "initiation",
            AnalystAction::PtRaise => "pt_raise",
            AnalystAction::PtLower => "pt_lower",
            AnalystAction::BuyRating => "buy_rating",
            AnalystAction::RatingChange => "rating_change",
        }
    }

    pub fn is_bearish(&self) -> bool {
        matches!(self, AnalystAction::Downgrade | AnalystAction::PtLower)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalystInput {
    pub action: AnalystAction,
    /// New rating or headline sentiment ("bullish", "buy", "underweight", ...)
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub analyst_firm: Option<String>,
    #[serde(default)]
    pub price_target: Option<f64>,
}

const BULLISH_RATINGS: &[&str] = &["bullish", "buy", "overweight", "outperform"];
const BEARISH_RATINGS: &[&str] = &["bearish", "sell", "underweight", "underperform"];

/// Analyst rating score: 50 base, shifted by the action and the rating tone
pub fn analyst_score(input: &AnalystInput) -> f64 {
    let rating = input
        .rating
        .as_deref()
        .map(|r| r.trim().to_ascii_lowercase())
        .unwrap_or_default();

    let mut score = 50.0;
    score += match input.action {
        AnalystAction::Upgrade => 25.0,
        AnalystAction::Initiation if BULLISH_RATINGS.contains(&rating.as_str()) => 20.0,
        AnalystAction::Initiation if BEARISH_RATINGS.contains(&rating.as_str()) => -15.0,
        AnalystAction::Initiation => 0.0,
        AnalystAction::PtRaise => 15.0,
        AnalystAction::Downgrade => -15.0,
        AnalystAction::PtLower => -10.0,
        AnalystAction::BuyRating => 15.0,
        AnalystAction::RatingChange => 0.0,
    };

    if rating == "bullish" {
        score += 5.0;
    } else if rating == "bearish" {
        score -= 5.0;
    }

    clamp_score(score)
}
