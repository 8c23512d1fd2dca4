//! Staleness filter - drops observations outside the freshness window

use crate::types::PriceObservation;

/// Keep observations newer than `now_ms - freshness_window_ms`.
///
/// An observation exactly at the window edge counts as stale. Relative
/// input order is preserved.
pub fn filter_fresh(
    observations: &[PriceObservation],
    now_ms: i64,
    freshness_window_ms: i64,
) -> Vec<PriceObservation> {
    let cutoff = now_ms - freshness_window_ms;
    observations
        .iter()
        .filter(|o| o.observed_at > cutoff)
        .cloned()
        .collect()
}
