//! Short-side readings.
//!
//! Scores here measure how attractive a ticker is as a short: a breaking-down
//! chart or a stretched balance sheet scores high. Readings derived from a
//! long-side record return `None` when the record carries no bearish signal.

use serde::{Deserialize, Serialize};

use crate::activity::{
    congress_score, insider_score, institutional_score, CongressInput, CongressSignal,
    InsiderInput, InstitutionalInput, InstitutionalSignal,
};
use crate::categorical::{analyst_score, AnalystInput};
use crate::clamp_score;
use crate::continuous::{options_flow, options_score, MomentumInput, OptionsFlow, OptionsInput};
use crate::count::{MentionInput, Sentiment, NEWS_RULE};

/// Candidates below this are not worth reporting as shorts
pub const MIN_BEARISH_SCORE: f64 = 10.0;

/// Score plus the labels that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct BearishReading {
    pub score: f64,
    pub labels: Vec<&'static str>,
}

impl BearishReading {
    fn new() -> Self {
        Self {
            score: 0.0,
            labels: Vec::new(),
        }
    }

    fn add(&mut self, points: f64, label: &'static str) {
        self.score += points;
        self.labels.push(label);
    }

    fn finish(mut self) -> Option<Self> {
        self.score = clamp_score(self.score);
        (self.score >= MIN_BEARISH_SCORE).then_some(self)
    }
}

/// Breakdown signals from the same price/volume snapshot the long side uses
pub fn bearish_momentum(input: &MomentumInput) -> Option<BearishReading> {
    let mut reading = BearishReading::new();

    let change_1m = input.change_1m.unwrap_or(0.0);
    if change_1m < 0.0 {
        reading.add((1.5 * change_1m.abs()).min(30.0), "monthly_decline");
    }

    let rsi = input.rsi.unwrap_or(50.0);
    if rsi > 70.0 {
        reading.add((1.5 * (rsi - 70.0)).min(20.0), "overbought_rsi");
    }

    let below_ma20 = input.above_ma20 == Some(false);
    let below_ma50 = input.above_ma50 == Some(false);
    if below_ma20 {
        reading.add(10.0, "below_ma20");
    }
    if below_ma50 {
        reading.add(10.0, "below_ma50");
        if input.change_5d.unwrap_or(0.0) < 0.0 {
            reading.add(10.0, "failing_trend");
        }
    }

    let volume_ratio = input.volume_ratio.unwrap_or(1.0);
    if volume_ratio > 1.5 && input.change_1d.unwrap_or(0.0) < 0.0 {
        reading.add((5.0 * (volume_ratio - 1.0)).min(15.0), "distribution_volume");
    }

    if below_ma20 && below_ma50 {
        reading.add(5.0, "below_both_mas");
    }

    reading.finish()
}

/// Valuation and balance-sheet snapshot. Growth and margin values are
/// fractions (`-0.12` = -12%), debt-to-equity is in percent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundamentalsInput {
    #[serde(default)]
    pub forward_pe: Option<f64>,
    #[serde(default)]
    pub trailing_pe: Option<f64>,
    #[serde(default)]
    pub price_to_sales: Option<f64>,
    #[serde(default)]
    pub debt_to_equity: Option<f64>,
    #[serde(default)]
    pub earnings_growth: Option<f64>,
    #[serde(default)]
    pub revenue_growth: Option<f64>,
    #[serde(default)]
    pub profit_margin: Option<f64>,
}

/// Fundamental stress; missing metrics add nothing
pub fn fundamentals_stress(input: &FundamentalsInput) -> Option<BearishReading> {
    let mut reading = BearishReading::new();

    if let Some(forward_pe) = input.forward_pe {
        if let Some(trailing_pe) = input.trailing_pe.filter(|pe| *pe > 0.0) {
            if forward_pe > trailing_pe * 1.2 {
                reading.add(15.0, "earnings_expected_to_fall");
            }
        }
        if forward_pe > 50.0 {
            reading.add(10.0, "rich_forward_pe");
        }
    }

    if let Some(ps) = input.price_to_sales.filter(|ps| *ps > 15.0) {
        reading.add((2.0 * (ps - 15.0)).min(15.0), "rich_price_to_sales");
    }

    if let Some(de) = input.debt_to_equity.filter(|de| *de > 200.0) {
        reading.add(((de - 200.0) / 50.0).min(15.0), "high_leverage");
    }

    if let Some(growth) = input.earnings_growth.filter(|g| *g < 0.0) {
        reading.add((50.0 * growth.abs()).min(20.0), "shrinking_earnings");
    }

    if let Some(growth) = input.revenue_growth {
        if growth < 0.0 {
            reading.add(10.0, "shrinking_revenue");
        } else if growth < 0.05 {
            reading.add(5.0, "slow_revenue");
        }
    }

    if let Some(margin) = input.profit_margin.filter(|m| *m < 0.0) {
        reading.add((30.0 * margin.abs()).min(15.0), "negative_margins");
    }

    reading.finish()
}

pub fn analyst_downgrade_score(input: &AnalystInput) -> Option<f64> {
    input.action.is_bearish().then(|| analyst_score(input))
}

/// Bearish sweeps keep the options score; otherwise heavy put buying alone
/// scales with the put/call ratio
pub fn bearish_options_score(input: &OptionsInput) -> Option<f64> {
    if options_flow(input) == OptionsFlow::BearishSweep {
        return Some(options_score(input));
    }
    let put_call = input.put_call_ratio.unwrap_or(1.0);
    (put_call > 1.5).then(|| clamp_score((30.0 * put_call).min(80.0)))
}

pub fn insider_selling_score(input: &InsiderInput) -> Option<f64> {
    if input.is_buy || input.is_empty() {
        return None;
    }
    let mut score = insider_score(input);
    if input.value > 1_000_000.0 {
        score = (score + 15.0).min(100.0);
    }
    Some(score)
}

pub fn institutional_distribution_score(input: &InstitutionalInput) -> Option<f64> {
    (input.signal() == InstitutionalSignal::Distribution).then(|| institutional_score(input))
}

pub fn congress_selling_score(input: &CongressInput) -> Option<f64> {
    (input.signal() == CongressSignal::Selling).then(|| congress_score(input))
}

pub fn negative_news_score(input: &MentionInput) -> Option<f64> {
    (input.sentiment() == Sentiment::Bearish).then(|| NEWS_RULE.score(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorical::AnalystAction;
    use approx::assert_relative_eq;

    #[test]
    fn test_bearish_momentum_breakdown() {
        let input = MomentumInput {
            change_1d: Some(-3.0),
            change_5d: Some(-6.0),
            change_1m: Some(-12.0),
            volume_ratio: Some(2.0),
            rsi: Some(40.0),
            above_ma20: Some(false),
            above_ma50: Some(false),
        };
        let reading = bearish_momentum(&input).unwrap();
        // 18 + 10 + 10 + 10 + 5 + 5
        assert_relative_eq!(reading.score, 58.0);
        assert_eq!(
            reading.labels,
            vec![
                "monthly_decline",
                "below_ma20",
                "below_ma50",
                "failing_trend",
                "distribution_volume",
                "below_both_mas"
            ]
        );
    }

    #[test]
    fn test_bearish_momentum_ignores_healthy_chart() {
        let input = MomentumInput {
            change_1m: Some(4.0),
            rsi: Some(60.0),
            above_ma20: Some(true),
            above_ma50: Some(true),
            ..Default::default()
        };
        assert!(bearish_momentum(&input).is_none());
        assert!(bearish_momentum(&MomentumInput::default()).is_none());
    }

    #[test]
    fn test_overbought_rsi_is_capped() {
        let input = MomentumInput {
            rsi: Some(95.0),
            ..Default::default()
        };
        assert_relative_eq!(bearish_momentum(&input).unwrap().score, 20.0);
    }

    #[test]
    fn test_fundamentals_stress() {
        let input = FundamentalsInput {
            forward_pe: Some(80.0),
            trailing_pe: Some(60.0),
            price_to_sales: Some(20.0),
            debt_to_equity: Some(450.0),
            earnings_growth: Some(-0.3),
            revenue_growth: Some(-0.02),
            profit_margin: Some(-0.1),
        };
        let reading = fundamentals_stress(&input).unwrap();
        // 15 + 10 + 10 + 5 + 15 + 10 + 3
        assert_relative_eq!(reading.score, 68.0, epsilon = 1e-9);
        assert!(fundamentals_stress(&FundamentalsInput::default()).is_none());
    }

    #[test]
    fn test_bearish_derivations_need_a_bearish_record() {
        let upgrade = AnalystInput {
            action: AnalystAction::Upgrade,
            rating: None,
            analyst_firm: None,
            price_target: None,
        };
        assert!(analyst_downgrade_score(&upgrade).is_none());

        let pt_cut = AnalystInput {
            action: AnalystAction::PtLower,
            ..upgrade
        };
        assert_eq!(analyst_downgrade_score(&pt_cut), Some(40.0));

        let buy = InsiderInput {
            is_buy: true,
            ..Default::default()
        };
        assert!(insider_selling_score(&buy).is_none());
        assert!(insider_selling_score(&InsiderInput::default()).is_none());
    }

    #[test]
    fn test_large_insider_sale_gets_extra() {
        let sale = InsiderInput {
            is_buy: false,
            value: 3_000_000.0,
            role: Some("CFO".to_string()),
            cluster_count: 0,
        };
        // 50 - 10 + 15 + 10, then +15
        assert_eq!(insider_selling_score(&sale), Some(80.0));
    }

    #[test]
    fn test_bearish_options() {
        let sweep = OptionsInput {
            volume_oi_ratio: Some(4.0),
            put_call_ratio: Some(2.0),
            call_volume: 10_000,
            put_volume: 20_000,
        };
        assert_eq!(bearish_options_score(&sweep), Some(80.0));

        let puts_only = OptionsInput {
            volume_oi_ratio: Some(1.0),
            put_call_ratio: Some(1.8),
            call_volume: 1_000,
            put_volume: 1_800,
        };
        assert_relative_eq!(bearish_options_score(&puts_only).unwrap(), 54.0, epsilon = 1e-9);

        let calls = OptionsInput {
            volume_oi_ratio: Some(4.0),
            put_call_ratio: Some(0.4),
            call_volume: 10_000,
            put_volume: 4_000,
        };
        assert!(bearish_options_score(&calls).is_none());
    }

    #[test]
    fn test_negative_news_requires_bearish_tone() {
        let bearish = MentionInput {
            mentions: 3,
            bullish: 0,
            bearish: 3,
            neutral: 1,
            headlines: vec![],
        };
        assert_relative_eq!(negative_news_score(&bearish).unwrap(), 30.0);

        let mixed = MentionInput {
            bearish: 1,
            bullish: 1,
            ..bearish
        };
        assert!(negative_news_score(&mixed).is_none());
    }
}
