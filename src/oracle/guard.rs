//! Change guard - sanity bound on committed price movement
//!
//! Evaluated by the surrounding service before a freshly aggregated price
//! replaces the previously committed one. This module only answers the
//! predicate; enforcement is the caller's job.

/// Whether `new_price` moved no more than `max_change_pct` percent away
/// from `previous_price`. The bound is inclusive.
pub fn is_acceptable_change(previous_price: f64, new_price: f64, max_change_pct: f64) -> bool {
    let change_pct = ((new_price - previous_price) / previous_price).abs() * 100.0;
    change_pct <= max_change_pct
}
