//! Core types used throughout the oracle engine
//!
//! Defines the observation, result and bucket records shared by the
//! aggregation core and the service layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One source's claim about an asset price.
///
/// Ephemeral: built by the caller per aggregation call, never mutated,
/// discarded after use. Timestamps are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    /// Source identifier (e.g. "binance", "chainlink")
    pub source: String,
    /// Reported price, must be positive
    pub price: f64,
    /// When the source observed the price (epoch ms)
    pub observed_at: i64,
    /// Source-supplied confidence in [0, 1]
    pub confidence: f64,
}

/// Aggregation method for reducing clean observations to one price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMethod {
    WeightedAverage,
    Median,
    Mean,
}

impl Default for AggregationMethod {
    fn default() -> Self {
        AggregationMethod::WeightedAverage
    }
}

impl AggregationMethod {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "weighted_average" | "weighted" => Some(AggregationMethod::WeightedAverage),
            "median" => Some(AggregationMethod::Median),
            "mean" | "average" => Some(AggregationMethod::Mean),
            _ => None,
        }
    }
}

impl fmt::Display for AggregationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationMethod::WeightedAverage => write!(f, "weighted_average"),
            AggregationMethod::Median => write!(f, "median"),
            AggregationMethod::Mean => write!(f, "mean"),
        }
    }
}

/// Result of one aggregation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResult {
    /// Consensus price over the outlier-free set
    pub final_price: f64,
    /// Method actually applied
    pub method: AggregationMethod,
    /// Number of observations that survived staleness and outlier filtering
    pub source_count: usize,
    /// Trust in this result, in [0, 1]
    pub confidence_score: f64,
    /// Observations excluded as outliers
    pub outliers: Vec<PriceObservation>,
}

/// Flattened aggregation record returned by the service layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationSnapshot {
    pub symbol: String,
    pub aggregated_price: f64,
    pub method: AggregationMethod,
    pub confidence_score: f64,
    pub source_count: usize,
    pub outlier_count: usize,
    pub timestamp: DateTime<Utc>,
}

/// Supported charting intervals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    Min1,
    Min5,
    Min15,
    Min30,
    Hour1,
    Hour4,
    Day1,
}

impl Default for Interval {
    fn default() -> Self {
        Interval::Hour1
    }
}

impl Interval {
    /// Get duration in seconds
    pub fn duration_secs(&self) -> i64 {
        match self {
            Interval::Min1 => 60,
            Interval::Min5 => 5 * 60,
            Interval::Min15 => 15 * 60,
            Interval::Min30 => 30 * 60,
            Interval::Hour1 => 60 * 60,
            Interval::Hour4 => 4 * 60 * 60,
            Interval::Day1 => 24 * 60 * 60,
        }
    }

    /// Get duration in milliseconds
    pub fn duration_ms(&self) -> i64 {
        self.duration_secs() * 1000
    }

    /// Parse an interval name; unrecognized names fall back to 1h
    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "1m" => Interval::Min1,
            "5m" => Interval::Min5,
            "15m" => Interval::Min15,
            "30m" => Interval::Min30,
            "1h" => Interval::Hour1,
            "4h" => Interval::Hour4,
            "1d" => Interval::Day1,
            _ => Interval::default(),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interval::Min1 => write!(f, "1m"),
            Interval::Min5 => write!(f, "5m"),
            Interval::Min15 => write!(f, "15m"),
            Interval::Min30 => write!(f, "30m"),
            Interval::Hour1 => write!(f, "1h"),
            Interval::Hour4 => write!(f, "4h"),
            Interval::Day1 => write!(f, "1d"),
        }
    }
}

/// Raw stored price point, input to the interval bucketer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePoint {
    /// Timestamp in epoch milliseconds
    pub timestamp: i64,
    /// Price at that instant
    pub price: f64,
    /// Source that reported it
    pub source: String,
}

/// Per-interval summary of a raw price series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalBucket {
    /// Start of the bucket, epoch ms, floor-aligned to the interval
    pub bucket_start: i64,
    /// Arithmetic mean of member prices
    pub price: f64,
    /// Highest member price
    pub high: f64,
    /// Lowest member price
    pub low: f64,
    /// Number of member points, always >= 1
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_from_name() {
        assert_eq!(Interval::from_name("5m"), Interval::Min5);
        assert_eq!(Interval::from_name("1D"), Interval::Day1);
        assert_eq!(Interval::from_name("2w"), Interval::Hour1);
        assert_eq!(Interval::from_name(""), Interval::Hour1);
    }

    #[test]
    fn test_interval_durations() {
        assert_eq!(Interval::Min1.duration_secs(), 60);
        assert_eq!(Interval::Hour4.duration_secs(), 14400);
        assert_eq!(Interval::Day1.duration_ms(), 86_400_000);
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!(
            AggregationMethod::from_str("weighted_average"),
            Some(AggregationMethod::WeightedAverage)
        );
        assert_eq!(
            AggregationMethod::from_str("MEDIAN"),
            Some(AggregationMethod::Median)
        );
        assert_eq!(AggregationMethod::from_str("mode"), None);
    }

    #[test]
    fn test_method_serde_tag() {
        let json = serde_json::to_string(&AggregationMethod::WeightedAverage).unwrap();
        assert_eq!(json, "\"weighted_average\"");
    }
}
