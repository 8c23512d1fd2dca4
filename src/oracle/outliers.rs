//! Outlier detection against a robust reference price
//!
//! The reference is the statistical median of the fresh prices; anything
//! deviating more than the configured relative threshold is flagged.

use crate::error::{OracleError, Result};
use crate::types::PriceObservation;

/// Standard median: middle element for odd lengths, average of the two
/// middle elements for even lengths. Returns `None` for an empty slice.
pub fn median(prices: &[f64]) -> Option<f64> {
    if prices.is_empty() {
        return None;
    }
    let mut sorted = prices.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Split observations into (clean, outliers) around `reference`.
///
/// An observation is an outlier when `|price - reference| / reference`
/// exceeds `threshold`. The two outputs partition the input exactly and
/// preserve relative order. Fails fast on a zero reference instead of
/// dividing by it; positive-price validation upstream makes that
/// unreachable in practice.
pub fn partition_outliers(
    observations: &[PriceObservation],
    reference: f64,
    threshold: f64,
) -> Result<(Vec<PriceObservation>, Vec<PriceObservation>)> {
    if reference == 0.0 {
        return Err(OracleError::ZeroReference);
    }

    let mut clean = Vec::with_capacity(observations.len());
    let mut outliers = Vec::new();

    for obs in observations {
        let deviation = (obs.price - reference).abs() / reference;
        if deviation > threshold {
            outliers.push(obs.clone());
        } else {
            clean.push(obs.clone());
        }
    }

    Ok((clean, outliers))
}
