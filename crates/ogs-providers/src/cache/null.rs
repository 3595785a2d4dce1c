//! Null cache provider
//!
//! Used when caching is disabled: every read misses, so the statistics are
//! always computed directly.

use async_trait::async_trait;
use ogs_domain::error::Result;
use ogs_domain::ports::providers::{CacheEntryConfig, CacheProvider};

/// Null cache provider that doesn't store anything
///
/// # Example
///
/// ```ignore
/// use ogs_providers::cache::NullCacheProvider;
///
/// let provider = NullCacheProvider::new();
/// // All operations succeed but nothing is cached
/// ```
#[derive(Debug, Clone, Default)]
pub struct NullCacheProvider;

impl NullCacheProvider {
    /// Create a new null cache provider
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheProvider for NullCacheProvider {
    async fn get_json(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set_json(&self, _key: &str, _value: &str, _config: CacheEntryConfig) -> Result<()> {
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}
