//! Count and velocity sources: social mentions, news coverage, search
//! interest and AI-assisted discovery.

use serde::{Deserialize, Serialize};

use crate::clamp_score;

/// Mention tally for one ticker, with sentiment votes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MentionInput {
    #[serde(default)]
    pub mentions: u32,
    #[serde(default)]
    pub bullish: u32,
    #[serde(default)]
    pub bearish: u32,
    #[serde(default)]
    pub neutral: u32,
    #[serde(default)]
    pub headlines: Vec<String>,
}

impl MentionInput {
    /// Net sentiment in [-1, 1]; 0 without any votes
    pub fn sentiment_score(&self) -> f64 {
        let total = self.bullish as f64 + self.bearish as f64 + self.neutral as f64;
        if total == 0.0 {
            return 0.0;
        }
        (self.bullish as f64 - self.bearish as f64) / total
    }

    pub fn sentiment(&self) -> Sentiment {
        Sentiment::from_score(self.sentiment_score())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Bullish,
    Neutral,
    Bearish,
}

impl Sentiment {
    /// Labels kick in beyond +/-0.2
    pub fn from_score(score: f64) -> Self {
        if score > 0.2 {
            Sentiment::Bullish
        } else if score < -0.2 {
            Sentiment::Bearish
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Bullish => "bullish",
            Sentiment::Neutral => "neutral",
            Sentiment::Bearish => "bearish",
        }
    }
}

/// Capped-linear count transform with a sentiment adjustment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MentionRule {
    pub points_per_mention: f64,
    pub sentiment_weight: f64,
}

pub const REDDIT_RULE: MentionRule = MentionRule {
    points_per_mention: 10.0,
    sentiment_weight: 20.0,
};

pub const NEWS_RULE: MentionRule = MentionRule {
    points_per_mention: 15.0,
    sentiment_weight: 20.0,
};

impl MentionRule {
    pub fn score(&self, input: &MentionInput) -> f64 {
        if input.mentions == 0 {
            return 0.0;
        }
        let base = input.mentions as f64 * self.points_per_mention;
        clamp_score(base + input.sentiment_score() * self.sentiment_weight)
    }
}

/// Weekly search-interest series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchTrendInput {
    #[serde(default)]
    pub values: Vec<f64>,
    #[serde(default)]
    pub is_breakout: bool,
}

impl SearchTrendInput {
    pub fn max_interest(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    pub fn avg_interest(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }
}

/// Midpoint of peak and mean interest, with breakout and persistence bonuses.
/// An empty series scores 0.
pub fn search_trend_score(input: &SearchTrendInput) -> f64 {
    if input.values.is_empty() {
        return 0.0;
    }
    let mut score = (input.max_interest() + input.avg_interest()) / 2.0;
    if input.is_breakout {
        score += 20.0;
    }
    score += (5.0 * (input.values.len() - 1) as f64).min(15.0);
    clamp_score(score)
}

/// Tone reported by an AI search assistant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryTone {
    VeryBullish,
    Bullish,
    Bearish,
    VeryBearish,
    #[default]
    #[serde(other)]
    Neutral,
}

impl DiscoveryTone {
    fn adjustment(&self) -> f64 {
        match self {
            DiscoveryTone::VeryBullish => 15.0,
            DiscoveryTone::Bullish => 10.0,
            DiscoveryTone::Neutral => 0.0,
            DiscoveryTone::Bearish => -5.0,
            DiscoveryTone::VeryBearish => -10.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryInput {
    #[serde(default)]
    pub mentions: u32,
    #[serde(default)]
    pub tone: DiscoveryTone,
    #[serde(default)]
    pub has_catalyst: bool,
    #[serde(default)]
    pub catalyst: Option<String>,
}

pub fn discovery_score(input: &DiscoveryInput) -> f64 {
    if input.mentions == 0 {
        return 0.0;
    }
    let mut score = 50.0 + (5.0 * input.mentions as f64).min(20.0);
    score += input.tone.adjustment();
    if input.has_catalyst {
        score += 15.0;
    }
    clamp_score(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn mentions(count: u32, bull: u32, bear: u32, neutral: u32) -> MentionInput {
        MentionInput {
            mentions: count,
            bullish: bull,
            bearish: bear,
            neutral,
            headlines: vec![],
        }
    }

    #[test]
    fn test_reddit_and_news_rules() {
        let input = mentions(4, 3, 1, 0);
        // sentiment 0.5 -> +10
        assert_relative_eq!(REDDIT_RULE.score(&input), 50.0);
        assert_relative_eq!(NEWS_RULE.score(&input), 70.0);
        assert_eq!(input.sentiment(), Sentiment::Bullish);
    }

    #[test]
    fn test_mentions_cap_and_zero() {
        assert_eq!(REDDIT_RULE.score(&mentions(25, 0, 0, 0)), 100.0);
        assert_eq!(REDDIT_RULE.score(&mentions(0, 5, 0, 0)), 0.0);
        assert_eq!(mentions(3, 0, 0, 0).sentiment_score(), 0.0);
    }

    #[test]
    fn test_bearish_mentions_reduce_score() {
        let input = mentions(2, 0, 2, 0);
        assert_eq!(input.sentiment(), Sentiment::Bearish);
        assert_relative_eq!(REDDIT_RULE.score(&input), 0.0);
        assert_relative_eq!(NEWS_RULE.score(&input), 10.0);
    }

    #[test]
    fn test_huge_vote_counts_do_not_overflow() {
        let input = mentions(5, 4_000_000_000, 300_000_000, u32::MAX);
        assert_relative_eq!(
            input.sentiment_score(),
            3_700_000_000.0 / (4_300_000_000.0 + u32::MAX as f64)
        );
        assert_eq!(input.sentiment(), Sentiment::Bullish);
        assert!(REDDIT_RULE.score(&input).is_finite());
    }

    #[test]
    fn test_search_trend_score() {
        let input = SearchTrendInput {
            values: vec![40.0, 60.0, 80.0],
            is_breakout: true,
        };
        // (80 + 60) / 2 + 20 + 10
        assert_relative_eq!(search_trend_score(&input), 100.0);

        let flat = SearchTrendInput {
            values: vec![30.0],
            is_breakout: false,
        };
        assert_relative_eq!(search_trend_score(&flat), 30.0);
        assert_eq!(search_trend_score(&SearchTrendInput::default()), 0.0);
    }

    #[test]
    fn test_discovery_score() {
        let input = DiscoveryInput {
            mentions: 2,
            tone: DiscoveryTone::Bullish,
            has_catalyst: true,
            catalyst: Some("FDA approval".to_string()),
        };
        assert_relative_eq!(discovery_score(&input), 85.0);

        let cold = DiscoveryInput {
            mentions: 1,
            tone: DiscoveryTone::VeryBearish,
            ..Default::default()
        };
        assert_relative_eq!(discovery_score(&cold), 45.0);
        assert_eq!(discovery_score(&DiscoveryInput::default()), 0.0);
    }

    #[test]
    fn test_unknown_tone_is_neutral() {
        let input: DiscoveryInput =
            serde_json::from_str(r#"{"mentions": 1, "tone": "mixed"}"#).unwrap();
        assert_eq!(input.tone, DiscoveryTone::Neutral);
    }
}
