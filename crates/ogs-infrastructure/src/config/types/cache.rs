//! Cache configuration types

use ogs_domain::constants::{DEFAULT_STATISTICS_CACHE_TTL_SECS, STATISTICS_CACHE_KEY};
use serde::{Deserialize, Serialize};

/// Statistics cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache statistics at all
    pub enabled: bool,
    /// Cache key of the statistics snapshot
    pub key: String,
    /// Snapshot TTL in seconds
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            key: STATISTICS_CACHE_KEY.to_string(),
            ttl_secs: DEFAULT_STATISTICS_CACHE_TTL_SECS,
        }
    }
}
