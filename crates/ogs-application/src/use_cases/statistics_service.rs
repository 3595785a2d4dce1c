//! Statistics Service Use Case
//!
//! Read-through cache in front of the recent-orders aggregate. Cache
//! problems only cost latency: a failed read, a missing entry or a malformed
//! entry all lead to a fresh computation, and a failed write is logged and
//! ignored. Concurrent misses are not coalesced.

use crate::domain_services::StatisticsServiceInterface;
use async_trait::async_trait;
use chrono::Utc;
use ogs_domain::error::Result;
use ogs_domain::ports::providers::{CacheEntryConfig, CacheProvider};
use ogs_domain::ports::repositories::StatisticsSource;
use ogs_domain::value_objects::{CachedSnapshot, StatisticsReport, StatisticsSnapshot};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Cached recent-order statistics
pub struct StatisticsService {
    source: Arc<dyn StatisticsSource>,
    cache: Arc<dyn CacheProvider>,
    cache_key: String,
    window: usize,
}

impl StatisticsService {
    /// Create a new statistics service with injected dependencies
    pub fn new(
        source: Arc<dyn StatisticsSource>,
        cache: Arc<dyn CacheProvider>,
        cache_key: impl Into<String>,
        window: usize,
    ) -> Self {
        Self {
            source,
            cache,
            cache_key: cache_key.into(),
            window,
        }
    }

    /// Compute the aggregate directly, bypassing the cache
    pub async fn compute(&self) -> Result<StatisticsSnapshot> {
        let started = Instant::now();
        let aggregate = self.source.aggregate_recent(self.window).await?;
        Ok(StatisticsSnapshot::from_aggregate(aggregate, started.elapsed()))
    }

    async fn read_cached(&self) -> Option<CachedSnapshot> {
        match self.cache.get_json(&self.cache_key).await {
            Ok(Some(json)) => match serde_json::from_str::<CachedSnapshot>(&json) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(key = %self.cache_key, error = %e, "Malformed cache entry, recomputing");
                    None
                }
            },
            Ok(None) => {
                debug!(key = %self.cache_key, "Statistics cache miss");
                None
            }
            Err(e) => {
                warn!(key = %self.cache_key, error = %e, "Statistics cache read failed");
                None
            }
        }
    }

    async fn write_cached(&self, entry: &CachedSnapshot, ttl_secs: u64) {
        let json = match serde_json::to_string(entry) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize statistics for cache");
                return;
            }
        };

        let config = CacheEntryConfig::new().with_ttl_secs(ttl_secs);
        if let Err(e) = self.cache.set_json(&self.cache_key, &json, config).await {
            warn!(key = %self.cache_key, error = %e, "Statistics cache save failed");
        }
    }
}

#[async_trait]
impl StatisticsServiceInterface for StatisticsService {
    async fn get_statistics(&self, ttl_secs: u64) -> Result<StatisticsReport> {
        if let Some(entry) = self.read_cached().await {
            debug!(key = %self.cache_key, "Statistics served from cache");
            return Ok(StatisticsReport::cached(entry, Utc::now().timestamp()));
        }

        let snapshot = self.compute().await?;
        info!(
            execution_time_ms = snapshot.summary.execution_time_ms,
            provider = self.cache.provider_name(),
            "Statistics computed"
        );

        let entry = CachedSnapshot {
            snapshot,
            cache_timestamp: Utc::now().timestamp(),
        };
        self.write_cached(&entry, ttl_secs).await;

        Ok(StatisticsReport::fresh(entry.snapshot, entry.cache_timestamp))
    }
}
