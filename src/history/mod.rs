//! Interval bucketer - fixed-width time buckets over a raw price series
//!
//! Groups stored price points into epoch-aligned windows for charting,
//! with a mean/high/low/count summary per window. Independent of live
//! aggregation.

use std::collections::HashMap;

use crate::types::{Interval, IntervalBucket, PricePoint};

/// Bucket a raw series into fixed-width intervals.
///
/// The bucket key is `floor(timestamp / interval) * interval`, aligned to
/// the epoch rather than the calendar. Accumulation goes through a map,
/// but the returned sequence is always sorted ascending by bucket start;
/// callers may rely on that order. An empty series yields an empty vec.
pub fn bucket_by_interval(series: &[PricePoint], interval: Interval) -> Vec<IntervalBucket> {
    let interval_ms = interval.duration_ms();

    let mut buckets: HashMap<i64, Vec<f64>> = HashMap::new();
    for point in series {
        let bucket_start = point.timestamp.div_euclid(interval_ms) * interval_ms;
        buckets.entry(bucket_start).or_default().push(point.price);
    }

    let mut result: Vec<IntervalBucket> = buckets
        .into_iter()
        .map(|(bucket_start, prices)| {
            let sum: f64 = prices.iter().sum();
            let high = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let low = prices.iter().cloned().fold(f64::INFINITY, f64::min);
            IntervalBucket {
                bucket_start,
                price: sum / prices.len() as f64,
                high,
                low,
                count: prices.len(),
            }
        })
        .collect();

    result.sort_by_key(|b| b.bucket_start);
    result
}

/// Bucket by interval name; unrecognized names behave as "1h".
pub fn bucket_by_name(series: &[PricePoint], interval_name: &str) -> Vec<IntervalBucket> {
    bucket_by_interval(series, Interval::from_name(interval_name))
}
