//! Disclosed trading activity: insiders, members of Congress and
//! institutional holders.

use serde::{Deserialize, Serialize};

use crate::clamp_score;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsiderInput {
    #[serde(default)]
    pub is_buy: bool,
    /// Transaction value in dollars
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub role: Option<String>,
    /// Number of distinct insiders trading in the same window
    #[serde(default)]
    pub cluster_count: u32,
}

impl InsiderInput {
    /// No direction, size, role or cluster: nothing was reported
    pub fn is_empty(&self) -> bool {
        !self.is_buy && self.value <= 0.0 && self.role.is_none() && self.cluster_count == 0
    }
}

fn role_bonus(role: Option<&str>) -> f64 {
    let Some(role) = role else {
        return 0.0;
    };
    let role = role.to_ascii_lowercase();
    if ["ceo", "cfo", "chief executive", "chief financial"]
        .iter()
        .any(|r| role.contains(r))
    {
        10.0
    } else if role.contains("director") {
        5.0
    } else {
        0.0
    }
}

/// Insider transaction score. Sells still land on the scale so the short
/// side can reuse them. An empty payload scores 0.
pub fn insider_score(input: &InsiderInput) -> f64 {
    if input.is_empty() {
        return 0.0;
    }

    let mut score = 50.0;
    score += if input.is_buy { 30.0 } else { -10.0 };

    score += match input.value {
        v if v >= 1_000_000.0 => 15.0,
        v if v >= 500_000.0 => 10.0,
        v if v >= 100_000.0 => 5.0,
        _ => 0.0,
    };

    score += role_bonus(input.role.as_deref());

    if input.cluster_count >= 3 {
        score += 15.0;
    }

    clamp_score(score)
}

/// Aggregated congressional trades for one ticker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CongressInput {
    #[serde(default)]
    pub buys: u32,
    #[serde(default)]
    pub sells: u32,
    #[serde(default)]
    pub politicians: Vec<String>,
    /// Estimated total dollar value across trades
    #[serde(default)]
    pub total_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CongressSignal {
    Buying,
    Selling,
    Mixed,
}

impl CongressSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            CongressSignal::Buying => "buying",
            CongressSignal::Selling => "selling",
            CongressSignal::Mixed => "mixed",
        }
    }
}

impl CongressInput {
    pub fn net_buys(&self) -> i64 {
        self.buys as i64 - self.sells as i64
    }

    pub fn signal(&self) -> CongressSignal {
        match self.net_buys() {
            n if n > 0 => CongressSignal::Buying,
            n if n < 0 => CongressSignal::Selling,
            _ => CongressSignal::Mixed,
        }
    }

    fn distinct_politicians(&self) -> usize {
        let mut names: Vec<&str> = self.politicians.iter().map(String::as_str).collect();
        names.sort_unstable();
        names.dedup();
        names.len()
    }
}

pub fn congress_score(input: &CongressInput) -> f64 {
    if input.buys == 0 && input.sells == 0 {
        return 0.0;
    }
    let net = input.net_buys();

    let mut score = 50.0;
    if net > 0 {
        score += 15.0 + (5.0 * net as f64).min(15.0);
    } else if net < 0 {
        score -= 10.0;
    }

    score += match input.distinct_politicians() {
        n if n >= 3 => 20.0,
        2 => 10.0,
        _ => 0.0,
    };

    score += match input.total_value {
        v if v >= 500_000.0 => 15.0,
        v if v >= 100_000.0 => 10.0,
        v if v >= 50_000.0 => 5.0,
        _ => 0.0,
    };

    clamp_score(score)
}

/// 13F position changes across tracked funds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstitutionalInput {
    #[serde(default)]
    pub funds_buying: u32,
    #[serde(default)]
    pub funds_selling: u32,
    #[serde(default)]
    pub is_new_position: bool,
    #[serde(default)]
    pub notable_holders: Vec<String>,
    #[serde(default)]
    pub total_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstitutionalSignal {
    Accumulation,
    Distribution,
    NewPosition,
    Neutral,
}

impl InstitutionalSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstitutionalSignal::Accumulation => "accumulation",
            InstitutionalSignal::Distribution => "distribution",
            InstitutionalSignal::NewPosition => "new_position",
            InstitutionalSignal::Neutral => "neutral",
        }
    }
}

impl InstitutionalInput {
    pub fn net_buyers(&self) -> i64 {
        self.funds_buying as i64 - self.funds_selling as i64
    }

    pub fn signal(&self) -> InstitutionalSignal {
        match self.net_buyers() {
            n if n >= 2 => InstitutionalSignal::Accumulation,
            n if n <= -2 => InstitutionalSignal::Distribution,
            _ if self.is_new_position => InstitutionalSignal::NewPosition,
            _ => InstitutionalSignal::Neutral,
        }
    }
}

pub fn institutional_score(input: &InstitutionalInput) -> f64 {
    if input.funds_buying == 0 && input.funds_selling == 0 && !input.is_new_position {
        return 0.0;
    }

    let mut score = 50.0;
    score += (10.0 * input.net_buyers() as f64).min(30.0);
    if input.is_new_position {
        score += 15.0;
    }
    score += (15.0 * input.notable_holders.len() as f64).min(30.0);

    score += match input.total_value {
        v if v >= 100_000_000.0 => 10.0,
        v if v >= 50_000_000.0 => 5.0,
        _ => 0.0,
    };

    clamp_score(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insider_ceo_cluster_buy() {
        let input = InsiderInput {
            is_buy: true,
            value: 2_500_000.0,
            role: Some("Chief Executive Officer".to_string()),
            cluster_count: 3,
        };
        assert_eq!(insider_score(&input), 100.0);
    }

    #[test]
    fn test_insider_director_sale() {
        let input = InsiderInput {
            is_buy: false,
            value: 150_000.0,
            role: Some("Director".to_string()),
            cluster_count: 1,
        };
        assert_eq!(insider_score(&input), 50.0);
    }

    #[test]
    fn test_insider_empty_and_bare_sale() {
        assert!(InsiderInput::default().is_empty());
        assert_eq!(insider_score(&InsiderInput::default()), 0.0);

        let bare_sale = InsiderInput {
            value: 20_000.0,
            ..Default::default()
        };
        assert_eq!(insider_score(&bare_sale), 40.0);
    }

    #[test]
    fn test_congress_buying() {
        let input = CongressInput {
            buys: 4,
            sells: 1,
            politicians: vec!["Pelosi".into(), "Crenshaw".into(), "Pelosi".into()],
            total_value: 250_000.0,
        };
        // 50 + 15 + 15 + 10 (two distinct names) + 10
        assert_eq!(congress_score(&input), 100.0);
        assert_eq!(input.signal(), CongressSignal::Buying);
    }

    #[test]
    fn test_congress_selling_and_empty() {
        let input = CongressInput {
            buys: 0,
            sells: 2,
            politicians: vec!["Tuberville".into()],
            total_value: 60_000.0,
        };
        assert_eq!(congress_score(&input), 45.0);
        assert_eq!(input.signal(), CongressSignal::Selling);
        assert_eq!(congress_score(&CongressInput::default()), 0.0);
    }

    #[test]
    fn test_institutional_signals() {
        let accumulation = InstitutionalInput {
            funds_buying: 3,
            funds_selling: 0,
            is_new_position: false,
            notable_holders: vec!["Berkshire Hathaway".into()],
            total_value: 75_000_000.0,
        };
        assert_eq!(institutional_score(&accumulation), 100.0);
        assert_eq!(accumulation.signal(), InstitutionalSignal::Accumulation);

        let distribution = InstitutionalInput {
            funds_buying: 0,
            funds_selling: 3,
            ..Default::default()
        };
        assert_eq!(institutional_score(&distribution), 20.0);
        assert_eq!(distribution.signal(), InstitutionalSignal::Distribution);

        let fresh = InstitutionalInput {
            funds_buying: 1,
            is_new_position: true,
            ..Default::default()
        };
        assert_eq!(fresh.signal(), InstitutionalSignal::NewPosition);
        assert_eq!(institutional_score(&fresh), 75.0);
        assert_eq!(institutional_score(&InstitutionalInput::default()), 0.0);
    }
}
