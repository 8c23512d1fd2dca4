//! Configuration management for the oracle engine
//!
//! Loads from optional config files + environment variables via .env.
//! The loaded value is an immutable snapshot: every aggregation call
//! receives a reference to one `OracleConfig` and sees a consistent set
//! of thresholds throughout. Reloads replace the whole value, never
//! mutate it in place.

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Immutable threshold snapshot consumed by the aggregation core
#[derive(Debug, Clone, Deserialize)]
pub struct OracleConfig {
    /// Maximum observation age in milliseconds (default 5 minutes)
    pub freshness_window_ms: i64,
    /// Maximum relative deviation from the reference median (default 0.10)
    pub outlier_threshold: f64,
    /// Maximum percent change the ChangeGuard accepts (default 20)
    pub max_change_pct: f64,
    /// Confidence assumed for sources that report none (default 0.8)
    pub default_confidence: f64,
    /// Confidence scoring weights
    pub scoring: ScoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Weight of the clean set's average confidence
    pub avg_confidence_weight: f64,
    /// Weight of the source-count factor
    pub source_count_weight: f64,
    /// Weight of the outlier-ratio factor
    pub outlier_ratio_weight: f64,
    /// Source count at which the source factor saturates to 1.0
    pub source_saturation: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            avg_confidence_weight: 0.5,
            source_count_weight: 0.3,
            outlier_ratio_weight: 0.2,
            source_saturation: 10,
        }
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            freshness_window_ms: 5 * 60 * 1000,
            outlier_threshold: 0.10,
            max_change_pct: 20.0,
            default_confidence: 0.8,
            scoring: ScoringConfig::default(),
        }
    }
}

impl OracleConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        // Load .env file first
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .set_default("freshness_window_ms", 5 * 60 * 1000)?
            .set_default("outlier_threshold", 0.10)?
            .set_default("max_change_pct", 20.0)?
            .set_default("default_confidence", 0.8)?
            .set_default("scoring.avg_confidence_weight", 0.5)?
            .set_default("scoring.source_count_weight", 0.3)?
            .set_default("scoring.outlier_ratio_weight", 0.2)?
            .set_default("scoring.source_saturation", 10)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // Override with environment variables (ORACLE_*)
            .add_source(Environment::with_prefix("ORACLE").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        let oracle_config: OracleConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        oracle_config.validate()?;

        Ok(oracle_config)
    }

    /// Validate loaded values that file or environment overrides could
    /// break. The confidence score stays in [0, 1] only while the
    /// scoring weights are non-negative and sum to 1.
    pub fn validate(&self) -> Result<()> {
        let s = &self.scoring;
        if s.avg_confidence_weight < 0.0
            || s.source_count_weight < 0.0
            || s.outlier_ratio_weight < 0.0
        {
            bail!("Scoring weights must be non-negative");
        }
        let sum = s.avg_confidence_weight + s.source_count_weight + s.outlier_ratio_weight;
        if (sum - 1.0).abs() > 1e-9 {
            bail!("Scoring weights must sum to 1, got {}", sum);
        }
        if s.source_saturation == 0 {
            bail!("scoring.source_saturation must be at least 1");
        }
        if self.freshness_window_ms <= 0 {
            bail!("freshness_window_ms must be positive");
        }
        if self.outlier_threshold < 0.0 {
            bail!("outlier_threshold must be non-negative");
        }
        Ok(())
    }

    /// Generate a digest of the config for logging
    pub fn digest(&self) -> String {
        format!(
            "freshness_ms={} outlier_thr={:.2} max_change_pct={:.1} default_conf={:.2}",
            self.freshness_window_ms,
            self.outlier_threshold,
            self.max_change_pct,
            self.default_confidence
        )
    }
}

impl std::fmt::Display for OracleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.digest())
    }
}
