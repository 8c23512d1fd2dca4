//! Price service - wires the aggregation core to its collaborators
//!
//! The core itself never persists, never logs and never reads the clock;
//! this layer does all three. It resolves a human-readable symbol to an
//! asset id through the [`Store`], runs the aggregator, enforces the
//! change guard against the last committed price, and persists both the
//! raw feeds and the aggregation record.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::OracleConfig;
use crate::history::bucket_by_name;
use crate::oracle::{aggregate, is_acceptable_change};
use crate::types::{
    AggregationMethod, AggregationSnapshot, IntervalBucket, PriceObservation, PricePoint,
};

/// Raw per-source submission, as received from the outside
#[derive(Debug, Clone, Deserialize)]
pub struct RawSource {
    /// Source name
    pub name: String,
    /// Reported price
    pub price: f64,
    /// Observation time in epoch ms; defaults to now when omitted
    pub timestamp: Option<i64>,
    /// Source confidence; defaults to the configured value when omitted
    pub confidence: Option<f64>,
}

/// Aggregation row persisted alongside the raw feeds
#[derive(Debug, Clone, Serialize)]
pub struct AggregationRecord {
    pub aggregated_price: f64,
    pub price_count: usize,
    pub method: AggregationMethod,
    pub confidence_score: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub timestamp: i64,
}

/// Persistence collaborator. Implementations own the actual database;
/// this crate only consumes resolved identifiers and rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    /// Resolve a symbol (case-insensitive) to an asset id
    async fn resolve_asset(&self, symbol: &str) -> Result<Option<String>>;

    /// Last committed aggregated price for the asset, if any
    async fn last_committed_price(&self, asset_id: &str) -> Result<Option<f64>>;

    /// Persist the raw per-source feeds for the asset
    async fn insert_price_feeds(
        &self,
        asset_id: &str,
        feeds: Vec<PriceObservation>,
    ) -> Result<()>;

    /// Persist (commit) one aggregation record for the asset
    async fn insert_aggregation(&self, asset_id: &str, record: AggregationRecord) -> Result<()>;

    /// Stored price points for the asset in [from, to], ascending by time
    async fn price_feeds_between(
        &self,
        asset_id: &str,
        from: Option<i64>,
        to: Option<i64>,
    ) -> Result<Vec<PricePoint>>;
}

/// Service-level orchestration around the pure aggregation core
pub struct PriceService<S: Store> {
    store: S,
    config: OracleConfig,
}

impl<S: Store> PriceService<S> {
    pub fn new(store: S, config: OracleConfig) -> Self {
        Self { store, config }
    }

    /// Aggregate submitted sources for a symbol and commit the result.
    ///
    /// The change guard runs against the last committed price before
    /// anything is written; a move beyond `max_change_pct` aborts the
    /// commit entirely.
    pub async fn aggregate_symbol(
        &self,
        symbol: &str,
        sources: Vec<RawSource>,
        method: AggregationMethod,
    ) -> Result<AggregationSnapshot> {
        let asset_id = self
            .store
            .resolve_asset(&symbol.to_uppercase())
            .await
            .context("Failed to resolve asset")?
            .with_context(|| format!("Asset not found: {}", symbol))?;

        let now = Utc::now();
        let now_ms = now.timestamp_millis();

        let observations: Vec<PriceObservation> = sources
            .into_iter()
            .map(|s| PriceObservation {
                source: s.name,
                price: s.price,
                observed_at: s.timestamp.unwrap_or(now_ms),
                confidence: s.confidence.unwrap_or(self.config.default_confidence),
            })
            .collect();

        let result = aggregate(&observations, method, now_ms, &self.config)
            .with_context(|| format!("Aggregation failed for {}", symbol))?;

        if let Some(previous) = self
            .store
            .last_committed_price(&asset_id)
            .await
            .context("Failed to load last committed price")?
        {
            if !is_acceptable_change(previous, result.final_price, self.config.max_change_pct) {
                warn!(
                    symbol,
                    previous,
                    new = result.final_price,
                    max_change_pct = self.config.max_change_pct,
                    "rejecting aggregation: price moved beyond the change guard"
                );
                bail!(
                    "Price change for {} exceeds {}%: {} -> {}",
                    symbol,
                    self.config.max_change_pct,
                    previous,
                    result.final_price
                );
            }
        }

        let min_price = observations.iter().map(|o| o.price).fold(f64::INFINITY, f64::min);
        let max_price = observations
            .iter()
            .map(|o| o.price)
            .fold(f64::NEG_INFINITY, f64::max);

        self.store
            .insert_price_feeds(&asset_id, observations)
            .await
            .context("Failed to persist price feeds")?;

        self.store
            .insert_aggregation(
                &asset_id,
                AggregationRecord {
                    aggregated_price: result.final_price,
                    price_count: result.source_count,
                    method: result.method,
                    confidence_score: result.confidence_score,
                    min_price,
                    max_price,
                    timestamp: now_ms,
                },
            )
            .await
            .context("Failed to persist aggregation")?;

        info!(
            symbol,
            price = result.final_price,
            confidence = result.confidence_score,
            sources = result.source_count,
            outliers = result.outliers.len(),
            "committed aggregated price"
        );

        Ok(AggregationSnapshot {
            symbol: symbol.to_string(),
            aggregated_price: result.final_price,
            method: result.method,
            confidence_score: result.confidence_score,
            source_count: result.source_count,
            outlier_count: result.outliers.len(),
            timestamp: now,
        })
    }

    /// Stored history for a symbol, bucketed into the named interval
    pub async fn price_history(
        &self,
        symbol: &str,
        from: Option<i64>,
        to: Option<i64>,
        interval_name: &str,
    ) -> Result<Vec<IntervalBucket>> {
        let asset_id = self
            .store
            .resolve_asset(&symbol.to_uppercase())
            .await
            .context("Failed to resolve asset")?
            .with_context(|| format!("Asset not found: {}", symbol))?;

        let rows = self
            .store
            .price_feeds_between(&asset_id, from, to)
            .await
            .context("Failed to fetch price history")?;

        Ok(bucket_by_name(&rows, interval_name))
    }
}
