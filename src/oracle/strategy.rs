//! Aggregation strategies - one scalar price from the clean set
//!
//! All three methods operate on the outlier-free subset only, never the
//! raw input.

use crate::error::{OracleError, Result};
use crate::oracle::outliers::median;
use crate::types::{AggregationMethod, PriceObservation};

/// Reduce the clean set to one price under the chosen method.
///
/// Weighted average uses each observation's confidence as its weight.
/// A zero total weight is an explicit `DegenerateWeights` failure: the
/// naive formula would return 0, which is indistinguishable from a
/// legitimately low price.
pub fn final_price(method: AggregationMethod, clean: &[PriceObservation]) -> Result<f64> {
    if clean.is_empty() {
        return Err(OracleError::NoSources);
    }

    match method {
        AggregationMethod::WeightedAverage => {
            let total_weight: f64 = clean.iter().map(|o| o.confidence).sum();
            if total_weight == 0.0 {
                return Err(OracleError::DegenerateWeights);
            }
            let weighted_sum: f64 = clean.iter().map(|o| o.price * o.confidence).sum();
            Ok(weighted_sum / total_weight)
        }
        AggregationMethod::Median => {
            let prices: Vec<f64> = clean.iter().map(|o| o.price).collect();
            // Non-empty set checked above
            median(&prices).ok_or(OracleError::NoSources)
        }
        AggregationMethod::Mean => {
            let sum: f64 = clean.iter().map(|o| o.price).sum();
            Ok(sum / clean.len() as f64)
        }
    }
}
