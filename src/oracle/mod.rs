//! Oracle module - multi-source price aggregation
//!
//! Reduces several independently reported, untrusted price observations
//! to a single consensus price with a confidence score, rejecting stale
//! and manipulated inputs along the way.
//!
//! Everything here is a synchronous pure function over its explicit
//! inputs: thresholds come in as an immutable [`OracleConfig`] snapshot
//! and the current instant is an explicit parameter, so identical inputs
//! always produce identical output and concurrent callers need no
//! synchronization.
//!
//! [`OracleConfig`]: crate::config::OracleConfig

mod aggregator;
mod guard;
mod outliers;
mod scoring;
mod staleness;
mod strategy;

pub use aggregator::aggregate;
pub use guard::is_acceptable_change;
pub use outliers::{median, partition_outliers};
pub use scoring::confidence_score;
pub use staleness::filter_fresh;
pub use strategy::final_price;
