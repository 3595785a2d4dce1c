//! Application configuration root

use super::{CacheConfig, JobConfig, LockConfig, LoggingConfig, RedisConfig};
use serde::{Deserialize, Serialize};

/// Complete service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Remote lock store and cache
    pub redis: RedisConfig,
    /// Job lock
    pub lock: LockConfig,
    /// Statistics cache
    pub cache: CacheConfig,
    /// Order job, fan-out and statistics tunables
    pub job: JobConfig,
    /// Logging
    pub logging: LoggingConfig,
}
