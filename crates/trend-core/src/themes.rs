//! Hot Theme Membership
//!
//! A theme is a group of tickers sharing a market narrative, tracked through a
//! handful of thematic ETFs. A theme is "hot" when any of its ETFs is up more
//! than 5% over a month or more than 2% over a week.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::Ticker;

/// Monthly gain (percent) above which a theme ETF marks its theme hot
pub const HOT_MONTHLY_PERF: f64 = 5.0;
/// Weekly gain (percent) above which a theme ETF marks its theme hot
pub const HOT_WEEKLY_PERF: f64 = 2.0;

/// Static definition of a theme
#[derive(Debug, Clone, Copy)]
pub struct ThemeDefinition {
    pub name: &'static str,
    pub etfs: &'static [&'static str],
    pub tickers: &'static [&'static str],
}

pub const THEME_CATALOG: &[ThemeDefinition] = &[
    ThemeDefinition {
        name: "semiconductors",
        etfs: &["SMH", "SOXX", "PSI"],
        tickers: &[
            "NVDA", "AMD", "INTC", "MU", "AVGO", "QCOM", "TSM", "ASML", "LRCX", "AMAT", "KLAC",
            "MRVL", "ON", "NXPI", "TXN", "ADI", "MCHP", "SWKS", "MPWR", "ARM", "GFS", "SMCI",
        ],
    },
    ThemeDefinition {
        name: "precious_metals",
        etfs: &["GLD", "SLV", "GDX", "GDXJ", "SIL", "SILJ"],
        tickers: &[
            "NEM", "GOLD", "AEM", "WPM", "FNV", "RGLD", "AG", "PAAS", "KGC", "HMY", "EGO",
            "BTG", "CDE", "MAG", "HL", "FSM",
        ],
    },
    ThemeDefinition {
        name: "energy",
        etfs: &["XLE", "XOP", "OIH", "USO"],
        tickers: &[
            "XOM", "CVX", "COP", "SLB", "EOG", "OXY", "MPC", "VLO", "PSX", "DVN", "FANG", "HAL",
            "BKR", "MRO", "APA", "AR", "RRC", "EQT", "CTRA",
        ],
    },
    ThemeDefinition {
        name: "biotech",
        etfs: &["XBI", "IBB"],
        tickers: &[
            "MRNA", "BNTX", "REGN", "VRTX", "GILD", "BIIB", "AMGN", "ALNY", "BMRN", "IONS",
            "EXAS", "NBIX", "ARGX", "PCVX",
        ],
    },
    ThemeDefinition {
        name: "uranium_nuclear",
        etfs: &["URA", "URNM"],
        tickers: &["CCJ", "UEC", "DNN", "LEU", "NXE", "UUUU", "SMR"],
    },
    ThemeDefinition {
        name: "steel_materials",
        etfs: &["SLX", "XME", "PICK"],
        tickers: &[
            "CLF", "NUE", "STLD", "X", "RS", "AA", "CENX", "FCX", "SCCO", "VALE", "RIO", "BHP",
            "TECK",
        ],
    },
    ThemeDefinition {
        name: "defense",
        etfs: &["ITA", "PPA", "XAR"],
        tickers: &[
            "LMT", "RTX", "NOC", "GD", "BA", "LHX", "HII", "TDG", "HWM", "KTOS", "PLTR", "RKLB",
        ],
    },
    ThemeDefinition {
        name: "china_tech",
        etfs: &["KWEB", "FXI", "MCHI"],
        tickers: &["BABA", "JD", "PDD", "BIDU", "NIO", "XPEV", "LI", "BILI", "TME", "IQ"],
    },
    ThemeDefinition {
        name: "cannabis",
        etfs: &["MSOS", "MJ"],
        tickers: &["TLRY", "CGC", "ACB", "CRON", "SNDL"],
    },
];

/// Look up a catalogued theme by name
pub fn theme_definition(name: &str) -> Option<&'static ThemeDefinition> {
    THEME_CATALOG.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

/// Performance of one thematic ETF (percent changes)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtfPerformance {
    pub etf: String,
    #[serde(default)]
    pub perf_1d: f64,
    #[serde(default)]
    pub perf_1w: f64,
    #[serde(default)]
    pub perf_1m: f64,
}

/// Observed performance of a theme for the current run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemePerformance {
    pub theme: String,
    #[serde(default)]
    pub etf_perf: Vec<EtfPerformance>,
    /// Member tickers; empty means "use the catalogue definition"
    #[serde(default)]
    pub tickers: Vec<String>,
}

impl ThemePerformance {
    pub fn is_hot(&self) -> bool {
        self.etf_perf
            .iter()
            .any(|e| e.perf_1m > HOT_MONTHLY_PERF || e.perf_1w > HOT_WEEKLY_PERF)
    }

    pub fn avg_perf_1m(&self) -> f64 {
        if self.etf_perf.is_empty() {
            return 0.0;
        }
        self.etf_perf.iter().map(|e| e.perf_1m).sum::<f64>() / self.etf_perf.len() as f64
    }

    /// Member tickers, falling back to the catalogue when none were supplied
    pub fn members(&self) -> Vec<Ticker> {
        let names: Vec<&str> = if self.tickers.is_empty() {
            theme_definition(&self.theme)
                .map(|d| d.tickers.to_vec())
                .unwrap_or_default()
        } else {
            self.tickers.iter().map(String::as_str).collect()
        };

        names
            .into_iter()
            .filter_map(|name| match Ticker::parse(name) {
                Ok(t) => Some(t),
                Err(_) => {
                    tracing::debug!("Skipping invalid theme member {:?} in {}", name, self.theme);
                    None
                }
            })
            .collect()
    }
}

/// Set of tickers that belong to a currently hot theme
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeMembership {
    hot_themes: Vec<String>,
    members: BTreeSet<Ticker>,
}

impl ThemeMembership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Membership built directly from a ticker set
    pub fn from_tickers(tickers: impl IntoIterator<Item = Ticker>) -> Self {
        Self {
            hot_themes: Vec::new(),
            members: tickers.into_iter().collect(),
        }
    }

    /// Union of the members of every hot theme
    pub fn from_performances(performances: &[ThemePerformance]) -> Self {
        let mut membership = Self::default();
        for perf in performances.iter().filter(|p| p.is_hot()) {
            membership.hot_themes.push(perf.theme.clone());
            membership.members.extend(perf.members());
        }
        membership
    }

    pub fn contains(&self, ticker: &Ticker) -> bool {
        self.members.contains(ticker)
    }

    pub fn hot_themes(&self) -> &[String] {
        &self.hot_themes
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
