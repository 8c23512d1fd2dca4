//! End-to-end tests for the aggregation pipeline

#[cfg(test)]
mod tests {
    use oracle_core::config::OracleConfig;
    use oracle_core::history::bucket_by_name;
    use oracle_core::oracle::{aggregate, is_acceptable_change};
    use oracle_core::types::{AggregationMethod, PriceObservation, PricePoint};
    use oracle_core::OracleError;

    const NOW: i64 = 1_700_000_000_000;

    fn obs(source: &str, price: f64, age_ms: i64, confidence: f64) -> PriceObservation {
        PriceObservation {
            source: source.to_string(),
            price,
            observed_at: NOW - age_ms,
            confidence,
        }
    }

    // ========================================================================
    // Aggregation pipeline
    // ========================================================================

    #[test]
    fn test_full_pipeline_flags_manipulated_source() {
        let config = OracleConfig::default();
        let input = vec![
            obs("binance", 100.0, 0, 0.9),
            obs("coinbase", 101.0, 0, 0.9),
            obs("shady", 150.0, 0, 0.9),
        ];

        for method in [
            AggregationMethod::WeightedAverage,
            AggregationMethod::Median,
            AggregationMethod::Mean,
        ] {
            let result = aggregate(&input, method, NOW, &config).unwrap();
            assert_eq!(result.outliers.len(), 1, "method {}", method);
            assert_eq!(result.outliers[0].source, "shady");
            assert_eq!(result.source_count, 2);
            assert!((result.final_price - 100.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_all_sources_stale_fails() {
        let config = OracleConfig::default();
        let six_minutes = 6 * 60 * 1000;
        let input = vec![
            obs("binance", 100.0, six_minutes, 0.9),
            obs("coinbase", 101.0, six_minutes + 1, 0.9),
        ];
        assert_eq!(
            aggregate(&input, AggregationMethod::WeightedAverage, NOW, &config),
            Err(OracleError::AllSourcesStale)
        );
    }

    #[test]
    fn test_mixed_staleness_counts_only_fresh() {
        let config = OracleConfig::default();
        let input = vec![
            obs("fresh_a", 100.0, 0, 0.8),
            obs("fresh_b", 102.0, 60_000, 0.8),
            obs("stale", 400.0, 10 * 60 * 1000, 0.8),
        ];
        let result = aggregate(&input, AggregationMethod::Mean, NOW, &config).unwrap();
        // Stale source never reaches outlier detection
        assert_eq!(result.source_count + result.outliers.len(), 2);
        assert_eq!(result.final_price, 101.0);
    }

    #[test]
    fn test_tighter_threshold_flags_more() {
        let loose = OracleConfig::default();
        let tight = OracleConfig {
            outlier_threshold: 0.005,
            ..OracleConfig::default()
        };
        let input = vec![
            obs("a", 100.0, 0, 0.9),
            obs("b", 101.0, 0, 0.9),
            obs("c", 103.0, 0, 0.9),
        ];
        let relaxed = aggregate(&input, AggregationMethod::Median, NOW, &loose).unwrap();
        let strict = aggregate(&input, AggregationMethod::Median, NOW, &tight).unwrap();
        assert!(strict.outliers.len() > relaxed.outliers.len());
        assert!(strict.confidence_score < relaxed.confidence_score);
    }

    #[test]
    fn test_confidence_score_bounds_hold_end_to_end() {
        let config = OracleConfig::default();
        let input: Vec<PriceObservation> = (0..12)
            .map(|i| obs(&format!("s{}", i), 100.0 + i as f64 * 0.1, 0, 0.05 * i as f64))
            .collect();
        let result = aggregate(&input, AggregationMethod::WeightedAverage, NOW, &config).unwrap();
        assert!(result.confidence_score >= 0.0 && result.confidence_score <= 1.0);
    }

    // ========================================================================
    // Change guard
    // ========================================================================

    #[test]
    fn test_guard_on_aggregated_output() {
        let config = OracleConfig::default();
        let input = vec![obs("a", 118.0, 0, 0.9), obs("b", 120.0, 0, 0.9)];
        let result = aggregate(&input, AggregationMethod::Mean, NOW, &config).unwrap();

        assert!(is_acceptable_change(100.0, result.final_price, config.max_change_pct));
        assert!(!is_acceptable_change(90.0, result.final_price, config.max_change_pct));
    }

    // ========================================================================
    // Interval bucketing
    // ========================================================================

    #[test]
    fn test_bucketing_a_stored_series() {
        let series: Vec<PricePoint> = vec![
            PricePoint { timestamp: 0, price: 100.0, source: "a".into() },
            PricePoint { timestamp: 1_800_000, price: 110.0, source: "b".into() },
            PricePoint { timestamp: 3_700_000, price: 120.0, source: "a".into() },
        ];

        let buckets = bucket_by_name(&series, "1h");
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].bucket_start, 0);
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[1].bucket_start, 3_600_000);
        assert_eq!(buckets[1].count, 1);

        // Unknown interval names fall back to 1h
        assert_eq!(bucket_by_name(&series, "fortnight"), buckets);
    }

    #[test]
    fn test_bucket_stats_track_members() {
        let series: Vec<PricePoint> = (0..10)
            .map(|i| PricePoint {
                timestamp: i * 1000,
                price: 100.0 + i as f64,
                source: "a".into(),
            })
            .collect();

        let buckets = bucket_by_name(&series, "1m");
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].count, 10);
        assert_eq!(buckets[0].low, 100.0);
        assert_eq!(buckets[0].high, 109.0);
        assert!((buckets[0].price - 104.5).abs() < 1e-9);
    }
}
