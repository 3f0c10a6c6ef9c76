#[cfg(test)]
mod aggregation_tests {
    use std::collections::BTreeSet;

    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use trend_core::{
        AggregateScore, ScoringError, SignalRecord, Source, SourceSignal, ThemeMembership, Ticker,
    };

    use crate::{
        aggregate_long, aggregate_short, LongAggregator, LongConfig, ScoringConfig, ScoringEngine,
        ShortAggregator, ShortConfig, ShortInterestIndex, SignalBatch, SourceWeightTable,
    };

    fn ticker(s: &str) -> Ticker {
        Ticker::parse(s).unwrap()
    }

    fn long_scores(
        signals: Vec<SourceSignal>,
        config: &LongConfig,
        themes: &ThemeMembership,
    ) -> Vec<AggregateScore> {
        LongAggregator::new(config, themes).aggregate(&SignalBatch::from_signals(signals))
    }

    fn short_scores(
        signals: Vec<SourceSignal>,
        config: &ShortConfig,
        short_interest: &ShortInterestIndex,
    ) -> Vec<AggregateScore> {
        ShortAggregator::new(config, short_interest).aggregate(&SignalBatch::from_signals(signals))
    }

    #[test]
    fn test_weight_renormalization() {
        // News carries weight but did not observe AAA
        let weights = SourceWeightTable::new([
            (Source::Momentum, 0.6),
            (Source::Reddit, 0.4),
            (Source::News, 0.5),
        ])
        .unwrap();
        let config = LongConfig::new(weights, 5.0, 3.0).unwrap();

        let scores = long_scores(
            vec![
                SourceSignal::new(Source::Momentum, ticker("AAA"), 80.0),
                SourceSignal::new(Source::Reddit, ticker("AAA"), 40.0),
            ],
            &config,
            &ThemeMembership::new(),
        );

        assert_relative_eq!(scores[0].base_score, 64.0, epsilon = 1e-9);
        assert_relative_eq!(scores[0].combined_score, 67.0, epsilon = 1e-9);
    }

    #[test]
    fn test_aapl_scenario() {
        let scores = long_scores(
            vec![
                SourceSignal::new(Source::Momentum, ticker("AAPL"), 90.0),
                SourceSignal::new(Source::Reddit, ticker("AAPL"), 70.0),
            ],
            &LongConfig::default(),
            &ThemeMembership::new(),
        );

        let aapl = &scores[0];
        assert_relative_eq!(aapl.base_score, 83.333_333_333, epsilon = 1e-6);
        assert_relative_eq!(aapl.combined_score, 86.333_333_333, epsilon = 1e-6);
        assert_eq!(aapl.num_sources, 2);
        assert_eq!(
            aapl.contributing_sources,
            BTreeSet::from([Source::Momentum, Source::Reddit])
        );
    }

    #[test]
    fn test_xyz_short_scenario() {
        let long_batch = SignalBatch::from_signals(vec![SourceSignal::new(
            Source::ShortInterest,
            ticker("XYZ"),
            50.0,
        )
        .with_attribute("short_float", 25.0)]);
        let short_batch = SignalBatch::from_signals(vec![SourceSignal::new(
            Source::BearishMomentum,
            ticker("XYZ"),
            85.0,
        )]);

        let snapshot = ScoringEngine::default().run(&long_batch, &short_batch, &ThemeMembership::new());
        let xyz = snapshot.short_score(&ticker("XYZ")).unwrap();
        assert_relative_eq!(xyz.combined_score, 70.0, epsilon = 1e-9);
        assert_eq!(xyz.adjustments.squeeze_penalty, 15.0);
        assert!(xyz.squeeze_warning);
    }

    #[test]
    fn test_short_floor_is_inclusive() {
        let config = ShortConfig::default();
        let index = ShortInterestIndex::new();

        let below = short_scores(
            vec![SourceSignal::new(Source::BearishMomentum, ticker("LOW"), 39.999)],
            &config,
            &index,
        );
        assert!(below.is_empty());

        let at = short_scores(
            vec![SourceSignal::new(Source::BearishMomentum, ticker("EXACT"), 40.0)],
            &config,
            &index,
        );
        assert_eq!(at.len(), 1);
        assert_eq!(at[0].combined_score, 40.0);
    }

    #[test]
    fn test_squeeze_penalty_before_clamp() {
        let config = ShortConfig::default();
        let index = ShortInterestIndex::from_entries([(ticker("SQZ"), 25.0), (ticker("HOT"), 25.0)]);

        let scores = short_scores(
            vec![
                SourceSignal::new(Source::BearishMomentum, ticker("SQZ"), 95.0),
                // 100 + 4 bonus exceeds the scale before the penalty
                SourceSignal::new(Source::BearishMomentum, ticker("HOT"), 100.0),
                SourceSignal::new(Source::Fundamentals, ticker("HOT"), 100.0),
            ],
            &config,
            &index,
        );

        let sqz = scores.iter().find(|s| s.ticker.as_str() == "SQZ").unwrap();
        assert_relative_eq!(sqz.combined_score, 80.0, epsilon = 1e-9);

        let hot = scores.iter().find(|s| s.ticker.as_str() == "HOT").unwrap();
        assert_relative_eq!(hot.combined_score, 89.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_weight_source_keeps_visibility() {
        let config = LongConfig::default();
        let themes = ThemeMembership::from_tickers([ticker("THEME")]);

        let scores = long_scores(
            vec![
                SourceSignal::new(Source::EtfFlows, ticker("QUIET"), 80.0),
                SourceSignal::new(Source::EtfFlows, ticker("THEME"), 80.0),
            ],
            &config,
            &themes,
        );

        let quiet = scores.iter().find(|s| s.ticker.as_str() == "QUIET").unwrap();
        assert_eq!(quiet.num_sources, 1);
        assert_eq!(quiet.combined_score, 0.0);

        let themed = scores.iter().find(|s| s.ticker.as_str() == "THEME").unwrap();
        assert_eq!(themed.combined_score, 5.0);
    }

    #[test]
    fn test_unknown_source_counts_without_weight() {
        let scores = long_scores(
            vec![
                SourceSignal::new(Source::Momentum, ticker("PLTR"), 60.0),
                SourceSignal::new(Source::from_name("stocktwits"), ticker("PLTR"), 100.0),
            ],
            &LongConfig::default(),
            &ThemeMembership::new(),
        );

        let pltr = &scores[0];
        assert_eq!(pltr.num_sources, 2);
        assert_relative_eq!(pltr.base_score, 60.0, epsilon = 1e-9);
        assert_relative_eq!(pltr.combined_score, 63.0, epsilon = 1e-9);
        assert!(pltr.is_consistent());
    }

    #[test]
    fn test_multi_source_bonus_monotonic() {
        let config = LongConfig::default();
        let themes = ThemeMembership::new();
        let sources = Source::long_sources();

        let mut previous = f64::MIN;
        for n in 1..=sources.len() {
            let signals = sources[..n]
                .iter()
                .map(|s| SourceSignal::new(s.clone(), ticker("MONO"), 55.0))
                .collect();
            let score = long_scores(signals, &config, &themes)[0].combined_score;
            assert!(score >= previous, "{} sources: {} < {}", n, score, previous);
            previous = score;
        }
    }

    #[test]
    fn test_scores_always_clamped() {
        let themes = ThemeMembership::from_tickers([ticker("MAX")]);
        let mut signals: Vec<SourceSignal> = Source::long_sources()
            .into_iter()
            .map(|s| SourceSignal::new(s, ticker("MAX"), 100.0))
            .collect();
        signals.push(
            SourceSignal::new(Source::from_name("extra"), ticker("MAX"), 100.0)
                .with_attribute("auxiliary_bonus", 50.0),
        );

        let max = &long_scores(signals, &LongConfig::default(), &themes)[0];
        assert_eq!(max.combined_score, 100.0);
        assert!(max.base_score + max.adjustments.net() > 100.0);

        let config = ShortConfig {
            min_score: 0.0,
            ..Default::default()
        };
        let index = ShortInterestIndex::from_entries([(ticker("MIN"), 40.0)]);
        let min = &short_scores(
            vec![SourceSignal::new(Source::BearishMomentum, ticker("MIN"), 5.0)],
            &config,
            &index,
        )[0];
        assert_eq!(min.combined_score, 0.0);
    }

    #[test]
    fn test_idempotent_and_order_independent() {
        let signals = vec![
            SourceSignal::new(Source::Momentum, ticker("NVDA"), 80.0),
            SourceSignal::new(Source::Reddit, ticker("AMD"), 80.0),
            SourceSignal::new(Source::News, ticker("AMD"), 80.0),
            SourceSignal::new(Source::Momentum, ticker("AAPL"), 80.0),
            SourceSignal::new(Source::ShortInterest, ticker("GME"), 45.0)
                .with_attribute("short_float", 30.0),
        ];
        let short = vec![
            SourceSignal::new(Source::BearishMomentum, ticker("GME"), 90.0),
            SourceSignal::new(Source::BearishMomentum, ticker("INTC"), 75.0),
        ];
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 14, 30, 0).unwrap();
        let engine = ScoringEngine::default();
        let themes = ThemeMembership::new();

        let long_batch = SignalBatch::from_signals(signals.clone());
        let short_batch = SignalBatch::from_signals(short.clone());
        let first = engine.run_at(&long_batch, &short_batch, &themes, at);
        let second = engine.run_at(&long_batch, &short_batch, &themes, at);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );

        let reversed = engine.run_at(
            &SignalBatch::from_signals(signals.into_iter().rev()),
            &SignalBatch::from_signals(short.into_iter().rev()),
            &themes,
            at,
        );
        assert_eq!(first, reversed);

        let order: Vec<&str> = first.long_scores.iter().map(|s| s.ticker.as_str()).collect();
        // AMD leads on the multi-source bonus; the rest tie on score and sort by ticker
        assert_eq!(order, vec!["AMD", "AAPL", "NVDA", "GME"]);
    }

    #[test]
    fn test_empty_input() {
        let empty = SignalBatch::new();
        let snapshot = ScoringEngine::default().run(&empty, &empty, &ThemeMembership::new());
        assert!(snapshot.long_scores.is_empty());
        assert!(snapshot.short_scores.is_empty());
        assert_eq!(snapshot.summary.total_tickers, 0);
        assert!(snapshot.check_consistency().is_ok());

        let universe = BTreeSet::new();
        assert!(aggregate_long(&universe, &empty, &LongConfig::default(), &ThemeMembership::new())
            .is_empty());
        assert!(aggregate_short(&universe, &empty, &ShortConfig::default(), &ShortInterestIndex::new())
            .is_empty());
    }

    #[test]
    fn test_configuration_errors_fail_fast() {
        assert!(matches!(
            SourceWeightTable::new([(Source::Momentum, -0.2)]),
            Err(ScoringError::InvalidWeight { .. })
        ));
        assert!(matches!(
            ShortConfig::new(SourceWeightTable::default_short(), 4.0, 20.0, 15.0, -1.0),
            Err(ScoringError::InvalidThreshold { name: "min_score", .. })
        ));
        assert!(ScoringConfig::new(LongConfig::default(), ShortConfig::default()).is_ok());
    }

    #[test]
    fn test_ticker_on_both_sides() {
        let long_batch = SignalBatch::from_signals(vec![
            SourceSignal::new(Source::Momentum, ticker("TSLA"), 85.0),
        ]);
        let short_batch = SignalBatch::from_signals(vec![
            SourceSignal::new(Source::Fundamentals, ticker("TSLA"), 70.0),
        ]);

        let snapshot = ScoringEngine::default().run(&long_batch, &short_batch, &ThemeMembership::new());
        assert!(snapshot.long_score(&ticker("TSLA")).is_some());
        assert!(snapshot.short_score(&ticker("TSLA")).is_some());
        assert_eq!(snapshot.contested().len(), 1);
    }

    #[test]
    fn test_raw_records_end_to_end() {
        let mut long_batch = SignalBatch::new();
        long_batch.ingest_records(
            &Source::Momentum,
            vec![SignalRecord {
                ticker: Some("smci".to_string()),
                raw: Some(json!({
                    "change_1m": 18.0,
                    "volume_ratio": 2.5,
                    "rsi": 62.0,
                    "above_ma20": true,
                    "above_ma50": true
                })),
                ..Default::default()
            }],
        );
        long_batch.ingest_records(
            &Source::ShortInterest,
            vec![SignalRecord {
                ticker: Some("SMCI".to_string()),
                raw: Some(json!({"short_float": 22.0, "days_to_cover": 2.0})),
                ..Default::default()
            }],
        );

        let mut short_batch = SignalBatch::new();
        short_batch.ingest_records(
            &Source::BearishMomentum,
            vec![SignalRecord {
                ticker: Some("SMCI".to_string()),
                raw: Some(json!({"change_1m": 18.0, "rsi": 84.0})),
                ..Default::default()
            }],
        );

        let themes = ThemeMembership::from_tickers([ticker("SMCI")]);
        let snapshot = ScoringEngine::default().run(&long_batch, &short_batch, &themes);

        let smci = snapshot.long_score(&ticker("SMCI")).unwrap();
        // momentum 100, short interest 44: (20 + 2.64) / .26, +5 theme, +3 second source
        assert_relative_eq!(smci.combined_score, 22.64 / 0.26 + 8.0, epsilon = 1e-9);
        assert!(smci.highlights.contains(&"+18% month".to_string()));
        assert!(smci.highlights.contains(&"squeeze risk (22% short)".to_string()));

        // Overbought RSI alone scores 20, below the short floor
        assert!(snapshot.short_scores.is_empty());
    }
}
