//! Continuous sources: price momentum, short interest, options flow and
//! sector ETF flows.

use serde::{Deserialize, Serialize};

use crate::clamp_score;

/// Price/volume snapshot for one ticker. Percent values, e.g. `12.5` = 12.5%.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MomentumInput {
    #[serde(default)]
    pub change_1d: Option<f64>,
    #[serde(default)]
    pub change_5d: Option<f64>,
    #[serde(default)]
    pub change_1m: Option<f64>,
    /// Today's volume over the 20-day average
    #[serde(default)]
    pub volume_ratio: Option<f64>,
    #[serde(default)]
    pub rsi: Option<f64>,
    #[serde(default)]
    pub above_ma20: Option<bool>,
    #[serde(default)]
    pub above_ma50: Option<bool>,
}

impl MomentumInput {
    pub fn is_empty(&self) -> bool {
        self.change_1d.is_none()
            && self.change_5d.is_none()
            && self.change_1m.is_none()
            && self.volume_ratio.is_none()
            && self.rsi.is_none()
            && self.above_ma20.is_none()
            && self.above_ma50.is_none()
    }
}

const MOMENTUM_CHANGE_CAP: f64 = 25.0;

/// Bullish momentum: monthly trend, volume confirmation, RSI zone and moving
/// averages. Defaults: no change, volume ratio 1, RSI 50, not above MAs.
pub fn momentum_score(input: &MomentumInput) -> f64 {
    if input.is_empty() {
        return 0.0;
    }

    let change_1m = input.change_1m.unwrap_or(0.0);
    let volume_ratio = input.volume_ratio.unwrap_or(1.0);
    let rsi = input.rsi.unwrap_or(50.0);

    let mut score = 50.0;
    score += (change_1m * 2.0).clamp(-MOMENTUM_CHANGE_CAP, MOMENTUM_CHANGE_CAP);

    score += match volume_ratio {
        v if v > 2.0 => 15.0,
        v if v > 1.5 => 10.0,
        v if v > 1.2 => 5.0,
        _ => 0.0,
    };

    score += match rsi {
        r if r >= 70.0 => 5.0,
        r if r > 50.0 => 10.0,
        r if r < 30.0 => -10.0,
        _ => 0.0,
    };

    if input.above_ma20.unwrap_or(false) {
        score += 5.0;
    }
    if input.above_ma50.unwrap_or(false) {
        score += 5.0;
    }

    clamp_score(score)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShortInterestInput {
    /// Short interest as percent of float
    #[serde(default)]
    pub short_float: Option<f64>,
    #[serde(default)]
    pub days_to_cover: Option<f64>,
}

/// Crowding level of a short position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SqueezeRisk {
    High,
    Medium,
    Low,
}

impl SqueezeRisk {
    pub fn from_levels(short_float: f64, days_to_cover: f64) -> Self {
        if short_float > 20.0 || days_to_cover > 10.0 {
            SqueezeRisk::High
        } else if short_float > 10.0 || days_to_cover > 5.0 {
            SqueezeRisk::Medium
        } else {
            SqueezeRisk::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SqueezeRisk::High => "high",
            SqueezeRisk::Medium => "medium",
            SqueezeRisk::Low => "low",
        }
    }
}

/// Short interest score: twice the short float plus a days-to-cover step.
/// A missing short float scores 0.
pub fn short_interest_score(input: &ShortInterestInput) -> f64 {
    let Some(short_float) = input.short_float else {
        return 0.0;
    };
    let days_to_cover = input.days_to_cover.unwrap_or(0.0);

    let mut score = short_float * 2.0;
    if days_to_cover > 10.0 {
        score += 20.0;
    } else if days_to_cover > 5.0 {
        score += 10.0;
    }
    clamp_score(score)
}

pub fn squeeze_risk(input: &ShortInterestInput) -> SqueezeRisk {
    SqueezeRisk::from_levels(
        input.short_float.unwrap_or(0.0),
        input.days_to_cover.unwrap_or(0.0),
    )
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionsInput {
    /// Today's option volume over open interest
    #[serde(default)]
    pub volume_oi_ratio: Option<f64>,
    #[serde(default)]
    pub put_call_ratio: Option<f64>,
    #[serde(default)]
    pub call_volume: u64,
    #[serde(default)]
    pub put_volume: u64,
}

impl OptionsInput {
    pub fn total_volume(&self) -> u64 {
        self.call_volume.saturating_add(self.put_volume)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionsFlow {
    BullishSweep,
    BearishSweep,
    Straddle,
    Neutral,
}

impl OptionsFlow {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionsFlow::BullishSweep => "bullish_sweep",
            OptionsFlow::BearishSweep => "bearish_sweep",
            OptionsFlow::Straddle => "straddle",
            OptionsFlow::Neutral => "neutral",
        }
    }
}

/// Classify the flow from the put/call mix and the volume spike
pub fn options_flow(input: &OptionsInput) -> OptionsFlow {
    let vol_oi = input.volume_oi_ratio.unwrap_or(0.0);
    let put_call = input.put_call_ratio.unwrap_or(1.0);

    if vol_oi > 2.0 && put_call < 0.6 {
        OptionsFlow::BullishSweep
    } else if vol_oi > 2.0 && put_call > 1.5 {
        OptionsFlow::BearishSweep
    } else if vol_oi > 3.0 {
        OptionsFlow::Straddle
    } else {
        OptionsFlow::Neutral
    }
}

/// Unusual options activity: volume spike, one-sided positioning and raw size.
/// No traded contracts scores 0.
pub fn options_score(input: &OptionsInput) -> f64 {
    let total = input.total_volume();
    if total == 0 {
        return 0.0;
    }
    let vol_oi = input.volume_oi_ratio.unwrap_or(0.0);
    let put_call = input.put_call_ratio.unwrap_or(1.0);

    let mut score = 50.0;
    score += match vol_oi {
        r if r > 5.0 => 25.0,
        r if r > 3.0 => 15.0,
        r if r > 2.0 => 10.0,
        _ => 0.0,
    };

    if !(0.5..=1.5).contains(&put_call) {
        score += 15.0;
    } else if !(0.6..=1.2).contains(&put_call) {
        score += 10.0;
    }

    if total > 100_000 {
        score += 10.0;
    } else if total > 50_000 {
        score += 5.0;
    }

    clamp_score(score)
}

/// Sector ETF price/volume snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorFlowInput {
    #[serde(default)]
    pub change_1d: f64,
    #[serde(default)]
    pub change_1w: f64,
    #[serde(default)]
    pub change_1m: f64,
    #[serde(default)]
    pub volume_ratio: Option<f64>,
}

const FLOW_CAP: f64 = 25.0;

/// Flow score of one sector ETF: 50 plus a weighted trend term, with volume
/// confirming the direction of the move.
pub fn sector_flow_score(input: &SectorFlowInput) -> f64 {
    let trend = 0.4 * input.change_1d + 0.35 * input.change_1w + 0.25 * input.change_1m;
    let volume_ratio = input.volume_ratio.unwrap_or(1.0);

    let mut score = 50.0 + (trend * 5.0).clamp(-FLOW_CAP, FLOW_CAP);
    let inflow = trend > 0.0;
    if volume_ratio > 1.5 {
        score += if inflow { 15.0 } else { -10.0 };
    } else if volume_ratio > 1.2 {
        score += if inflow { 8.0 } else { -5.0 };
    }

    clamp_score(score)
}

/// Share of the hot-holding score carried as an auxiliary bonus
pub const ETF_FLOW_BONUS_RATE: f64 = 0.05;

/// A stock held by one or more sector ETFs with measured flows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldingFlowInput {
    #[serde(default)]
    pub sector_flow_scores: Vec<f64>,
    #[serde(default)]
    pub sectors: Vec<String>,
}

/// Combined flow score of a holding; no sectors scores 0
pub fn hot_holding_score(input: &HoldingFlowInput) -> f64 {
    if input.sector_flow_scores.is_empty() {
        return 0.0;
    }
    let total: f64 = input
        .sector_flow_scores
        .iter()
        .filter(|s| s.is_finite())
        .map(|s| 0.2 * s)
        .sum();
    clamp_score((50.0 + total).min(100.0))
}
