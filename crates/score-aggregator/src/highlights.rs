//! Short human-readable reasons attached to each aggregate score

use trend_core::{Source, SourceSignal};

/// Format a dollar amount with thousands separators, e.g. `$1,250,000`
fn fmt_dollars(value: f64) -> String {
    let whole = value.abs().round() as u64;
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0.0 {
        format!("-${}", out)
    } else {
        format!("${}", out)
    }
}

fn long_phrase(signal: &SourceSignal) -> Option<String> {
    match signal.source {
        Source::Momentum => {
            let change = signal.attr_f64("change_1m")?;
            (change > 5.0).then(|| format!("+{:.0}% month", change))
        }
        Source::Finviz => {
            let tags = signal.attr_str_list("signals");
            (!tags.is_empty()).then(|| {
                let shown: Vec<&str> = tags.into_iter().take(2).collect();
                format!("finviz: {}", shown.join(", "))
            })
        }
        Source::Reddit => {
            let mentions = signal.attr_f64("mentions")?;
            (mentions > 10.0).then(|| format!("{:.0} Reddit mentions", mentions))
        }
        Source::News => {
            let articles = signal.attr_f64("mentions")?;
            (articles > 2.0).then(|| format!("{:.0} news articles", articles))
        }
        Source::GoogleTrends => {
            if signal.attr_bool("is_breakout") == Some(true) {
                return Some("Google breakout".to_string());
            }
            let peak = signal
                .attributes
                .get("values")
                .and_then(|v| v.as_array())
                .map(|values| values.iter().filter_map(|v| v.as_f64()).fold(0.0, f64::max))?;
            (peak > 50.0).then(|| format!("trending ({:.0})", peak))
        }
        Source::ShortInterest => {
            if signal.attr_str("squeeze_risk") != Some("high") {
                return None;
            }
            let short_float = signal.attr_f64("short_float").unwrap_or(0.0);
            Some(format!("squeeze risk ({:.0}% short)", short_float))
        }
        Source::OptionsActivity => match signal.attr_str("signal")? {
            flow @ ("bullish_sweep" | "bearish_sweep") => Some(format!("options: {}", flow)),
            _ => None,
        },
        Source::Perplexity => {
            if signal.attr_bool("has_catalyst") != Some(true) {
                return None;
            }
            Some(match signal.attr_str("catalyst") {
                Some(catalyst) => format!("AI catalyst: {}", catalyst),
                None => "AI catalyst".to_string(),
            })
        }
        Source::InsiderTrading => {
            let value = signal.attr_f64("value").unwrap_or(0.0);
            (signal.attr_bool("is_buy") == Some(true) && value > 100_000.0)
                .then(|| format!("insider buy {}", fmt_dollars(value)))
        }
        Source::AnalystRatings => {
            (signal.attr_str("action") == Some("upgrade")).then(|| "analyst upgrade".to_string())
        }
        Source::CongressTrading => {
            if signal.attr_str("signal") != Some("buying") {
                return None;
            }
            let members = signal
                .attributes
                .get("politicians")
                .and_then(|v| v.as_array())
                .map(Vec::len)
                .unwrap_or(0);
            Some(format!("congress buying ({} members)", members))
        }
        Source::Institutional => (signal.attr_str("signal") == Some("accumulation"))
            .then(|| "institutional accumulation".to_string()),
        Source::EtfFlows => signal
            .attr_str_list("sectors")
            .first()
            .map(|sector| format!("ETF inflows: {}", sector)),
        _ => None,
    }
}

/// Reasons a ticker ranks on the long side, in source order
pub fn long_highlights(signals: &[&SourceSignal], in_hot_theme: bool) -> Vec<String> {
    let mut highlights: Vec<String> = signals.iter().filter_map(|s| long_phrase(s)).collect();
    if in_hot_theme {
        highlights.push("hot theme".to_string());
    }
    highlights
}

/// Reasons a ticker ranks on the short side: the bearish labels of every
/// contributing signal, deduplicated in first-seen order, then details for
/// downgrades and insider sales.
pub fn short_highlights(signals: &[&SourceSignal], squeeze_short_float: Option<f64>) -> Vec<String> {
    let mut highlights: Vec<String> = Vec::new();
    for signal in signals {
        for label in signal.attr_str_list("signals") {
            let phrase = label.replace('_', " ");
            if !highlights.contains(&phrase) {
                highlights.push(phrase);
            }
        }
    }

    for signal in signals {
        match signal.source {
            Source::AnalystDowngrades => {
                let action = signal.attr_str("action").unwrap_or("downgrade").replace('_', " ");
                highlights.push(match signal.attr_str("analyst_firm") {
                    Some(firm) => format!("{} by {}", action, firm),
                    None => action,
                });
            }
            Source::InsiderSelling => {
                let role = signal.attr_str("role").unwrap_or("insider");
                highlights.push(match signal.attr_f64("value").filter(|v| *v > 0.0) {
                    Some(value) => format!("{} sold {}", role, fmt_dollars(value)),
                    None => format!("{} sold", role),
                });
            }
            _ => {}
        }
    }

    if let Some(short_float) = squeeze_short_float {
        highlights.push(format!("squeeze warning ({:.0}% short float)", short_float));
    }
    highlights
}
