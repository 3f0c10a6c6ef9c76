//! Terminal tables for a finished snapshot

use score_aggregator::ScoreSnapshot;
use trend_core::AggregateScore;

const HIGHLIGHT_WIDTH: usize = 60;

pub fn render(snapshot: &ScoreSnapshot, top_n: usize) -> String {
    let summary = &snapshot.summary;
    let mut out = String::new();

    out.push_str(&format!(
        "Trending scan {}\n",
        snapshot.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    out.push_str(&format!(
        "{} tickers | {} longs ({} multi-source, {} hot theme) | {} shorts ({} squeeze warnings)\n",
        summary.total_tickers,
        summary.long_candidates,
        summary.multi_source_longs,
        summary.hot_theme_longs,
        summary.short_candidates,
        summary.squeeze_warnings
    ));
    if !summary.hot_themes.is_empty() {
        out.push_str(&format!("Hot themes: {}\n", summary.hot_themes.join(", ")));
    }
    if summary.skipped_signals > 0 {
        out.push_str(&format!("Skipped {} malformed signals\n", summary.skipped_signals));
    }

    out.push_str(&format!("\nTop {} long candidates\n", top_n));
    out.push_str(&table(snapshot.top_longs(top_n)));

    out.push_str(&format!("\nTop {} short candidates\n", top_n));
    out.push_str(&table(snapshot.top_shorts(top_n)));

    out
}

fn table(scores: &[AggregateScore]) -> String {
    if scores.is_empty() {
        return "  (none)\n".to_string();
    }

    let mut out = format!(
        "  {:>3}  {:<6} {:>6} {:>4}  {:<3}  {}\n",
        "#", "TICKER", "SCORE", "SRC", "", "HIGHLIGHTS"
    );
    for (rank, score) in scores.iter().enumerate() {
        out.push_str(&format!(
            "  {:>3}  {:<6} {:>6.1} {:>4}  {:<3}  {}\n",
            rank + 1,
            score.ticker,
            score.combined_score,
            score.num_sources,
            score.band().indicator(),
            truncate(&score.highlights.join("; "), HIGHLIGHT_WIDTH)
        ));
    }
    out
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use score_aggregator::{ScoringEngine, SignalBatch};
    use trend_core::{Source, SourceSignal, ThemeMembership, Ticker};

    #[test]
    fn test_render_lists_both_sides() {
        let t = |s: &str| Ticker::parse(s).unwrap();
        let long = SignalBatch::from_signals(vec![
            SourceSignal::new(Source::Momentum, t("NVDA"), 88.0),
            SourceSignal::new(Source::Reddit, t("NVDA"), 70.0),
            SourceSignal::new(Source::News, t("AMD"), 30.0),
        ]);
        let short = SignalBatch::new();
        let at = Utc.with_ymd_and_hms(2026, 3, 4, 15, 0, 0).unwrap();
        let snapshot =
            ScoringEngine::default().run_at(&long, &short, &ThemeMembership::new(), at);

        let text = render(&snapshot, 1);
        assert!(text.starts_with("Trending scan 2026-03-04 15:00 UTC"));
        assert!(text.contains("NVDA"));
        assert!(!text.contains("AMD"));
        assert!(text.contains("(none)"));
    }

    #[test]
    fn test_truncate_long_highlights() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
    }
}
