//! Price aggregator - combines untrusted observations into one consensus price
//!
//! Orchestrates validation, staleness filtering, outlier detection,
//! the chosen aggregation strategy and confidence scoring into a single
//! request/response operation.

use crate::config::OracleConfig;
use crate::error::{OracleError, Result};
use crate::oracle::outliers::{median, partition_outliers};
use crate::oracle::scoring::confidence_score;
use crate::oracle::staleness::filter_fresh;
use crate::oracle::strategy::final_price;
use crate::types::{AggregationMethod, AggregationResult, PriceObservation};

/// Aggregate one batch of observations into a consensus price.
///
/// Deterministic in its inputs: `now_ms` is explicit and `config` is an
/// immutable snapshot, so identical calls yield identical results.
///
/// Pipeline: validate -> staleness filter -> outlier partition around the
/// median of the fresh set -> strategy over the clean set -> confidence
/// score. The result upholds
/// `source_count + outliers.len() == fresh set size`.
pub fn aggregate(
    observations: &[PriceObservation],
    method: AggregationMethod,
    now_ms: i64,
    config: &OracleConfig,
) -> Result<AggregationResult> {
    if observations.is_empty() {
        return Err(OracleError::NoSources);
    }
    validate(observations)?;

    let fresh = filter_fresh(observations, now_ms, config.freshness_window_ms);
    if fresh.is_empty() {
        return Err(OracleError::AllSourcesStale);
    }

    let prices: Vec<f64> = fresh.iter().map(|o| o.price).collect();
    let reference = median(&prices).ok_or(OracleError::AllSourcesStale)?;

    let (clean, outliers) = partition_outliers(&fresh, reference, config.outlier_threshold)?;
    if clean.is_empty() {
        // Reachable with an even fresh set whose halves disagree, e.g.
        // {100, 200}: median 150, both sides deviate 33%
        return Err(OracleError::NoConsensus);
    }

    let price = final_price(method, &clean)?;
    let score = confidence_score(&clean, outliers.len(), &config.scoring);

    Ok(AggregationResult {
        final_price: price,
        method,
        source_count: clean.len(),
        confidence_score: score,
        outliers,
    })
}

/// Reject malformed observations before any statistics run.
///
/// Prices must be positive and finite; confidences must lie in [0, 1].
/// Out-of-range confidence is rejected rather than clamped so that the
/// weighted average and the scorer always see the same values the caller
/// supplied.
fn validate(observations: &[PriceObservation]) -> Result<()> {
    for obs in observations {
        if !obs.price.is_finite() || obs.price <= 0.0 {
            return Err(OracleError::InvalidPrice(obs.source.clone()));
        }
        if !obs.confidence.is_finite() || !(0.0..=1.0).contains(&obs.confidence) {
            return Err(OracleError::InvalidConfidence(obs.source.clone()));
        }
    }
    Ok(())
}
