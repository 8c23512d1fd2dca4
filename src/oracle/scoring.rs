//! Confidence scoring - how much to trust an aggregation result
//!
//! Combines source quality, source count and outlier ratio into one
//! [0, 1] score.

use crate::config::ScoringConfig;
use crate::types::PriceObservation;

/// Score the clean set against the number of outliers it shed.
///
/// Three bounded factors, weighted by the config (defaults 0.5/0.3/0.2,
/// summing to 1, so the score is in [0, 1] by construction):
/// - average source confidence over the clean set
/// - source count, saturating at `source_saturation` sources
/// - fraction of inputs that were not outliers
///
/// An empty clean set scores 0.
pub fn confidence_score(
    clean: &[PriceObservation],
    outlier_count: usize,
    scoring: &ScoringConfig,
) -> f64 {
    if clean.is_empty() {
        return 0.0;
    }

    let avg_confidence =
        clean.iter().map(|o| o.confidence).sum::<f64>() / clean.len() as f64;

    let source_factor = (clean.len() as f64 / scoring.source_saturation as f64).min(1.0);

    let total_sources = clean.len() + outlier_count;
    let outlier_factor = if total_sources == 0 {
        1.0
    } else {
        1.0 - outlier_count as f64 / total_sources as f64
    };

    avg_confidence * scoring.avg_confidence_weight
        + source_factor * scoring.source_count_weight
        + outlier_factor * scoring.outlier_ratio_weight
}
