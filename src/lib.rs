//! Oracle Core Library
//!
//! Price aggregation and consensus-scoring engine for multi-source
//! oracle feeds

pub mod config;
pub mod error;
pub mod history;
pub mod oracle;
pub mod service;
pub mod types;

pub use config::OracleConfig;
pub use error::OracleError;
pub use types::{AggregationMethod, AggregationResult, Interval, IntervalBucket, PriceObservation};
