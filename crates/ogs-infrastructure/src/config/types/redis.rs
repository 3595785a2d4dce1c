//! Redis configuration types

use ogs_providers::constants::{REDIS_DEFAULT_HOST, REDIS_DEFAULT_PORT, REDIS_DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Redis connection settings
///
/// With `enabled = false` the service runs on the file lock alone and the
/// statistics cache falls back to the in-process cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    /// Use Redis for locking and caching
    pub enabled: bool,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Connect and command timeout in seconds
    pub timeout_secs: u64,
}

impl RedisConfig {
    /// Connection URL
    pub fn url(&self) -> String {
        format!("redis://{}:{}/", self.host, self.port)
    }

    /// Connect and command timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: REDIS_DEFAULT_HOST.to_string(),
            port: REDIS_DEFAULT_PORT,
            timeout_secs: REDIS_DEFAULT_TIMEOUT_SECS,
        }
    }
}
