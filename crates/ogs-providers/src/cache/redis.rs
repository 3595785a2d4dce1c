//! Redis distributed cache provider
//!
//! Shares the [`RedisConnection`] of the lock provider. Entries are written
//! with `SET key value EX ttl` and left to expire.
//!
//! ## Example
//!
//! ```ignore
//! use ogs_providers::cache::RedisCacheProvider;
//! use ogs_providers::redis_client::RedisConnection;
//! use std::{sync::Arc, time::Duration};
//!
//! let timeout = Duration::from_secs(5);
//! let connection = Arc::new(RedisConnection::new("redis://localhost:6379", timeout)?);
//! let provider = RedisCacheProvider::new(connection);
//! ```

use crate::redis_client::RedisConnection;
use async_trait::async_trait;
use ogs_domain::error::Result;
use ogs_domain::ports::providers::{CacheEntryConfig, CacheProvider};
use std::sync::Arc;

/// Redis cache provider
#[derive(Clone)]
pub struct RedisCacheProvider {
    connection: Arc<RedisConnection>,
}

impl RedisCacheProvider {
    /// Create a cache provider over a shared connection
    pub fn new(connection: Arc<RedisConnection>) -> Self {
        Self { connection }
    }

    /// Get the Redis server address description
    pub fn server_address(&self) -> &str {
        self.connection.address()
    }
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get_json(&self, key: &str) -> Result<Option<String>> {
        let mut cmd = redis::cmd("GET");
        cmd.arg(key);
        self.connection.query(&cmd, "GET").await
    }

    async fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()> {
        let ttl_seconds = config.effective_ttl().as_secs();

        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);
        if ttl_seconds > 0 {
            cmd.arg("EX").arg(ttl_seconds);
        }
        self.connection.query(&cmd, "SET").await
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheProvider")
            .field("server", &self.server_address())
            .finish()
    }
}
