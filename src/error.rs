//! Typed failures of the aggregation core
//!
//! Every failure is returned to the immediate caller; the core never
//! retries and never logs.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum OracleError {
    /// Empty observation set passed to aggregate
    #[error("no price sources provided")]
    NoSources,

    /// An observation carried a non-positive or non-finite price.
    /// Holds the offending source name.
    #[error("invalid price from source '{0}'")]
    InvalidPrice(String),

    /// An observation carried a confidence outside [0, 1].
    /// Holds the offending source name.
    #[error("confidence out of range from source '{0}'")]
    InvalidConfidence(String),

    /// Every observation is older than the freshness window
    #[error("all price sources are stale")]
    AllSourcesStale,

    /// Outlier rejection left nothing to aggregate: every fresh source
    /// deviates from the reference median beyond the threshold
    #[error("all fresh sources flagged as outliers")]
    NoConsensus,

    /// Weighted average requested but total confidence weight is zero
    #[error("total confidence weight is zero")]
    DegenerateWeights,

    /// Reference median is zero; deviation would divide by zero
    #[error("reference price is zero")]
    ZeroReference,
}

pub type Result<T> = std::result::Result<T, OracleError>;
