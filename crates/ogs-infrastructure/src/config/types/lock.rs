//! Lock configuration types

use crate::constants::DEFAULT_LOCK_DIR;
use ogs_domain::constants::{DEFAULT_LOCK_NAME, DEFAULT_LOCK_TTL_SECS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Job lock settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    /// Lock name (Redis key and lock file stem)
    pub name: String,
    /// Lock TTL in seconds; must exceed the job's worst-case duration
    pub ttl_secs: u64,
    /// Directory for fallback lock files
    pub directory: PathBuf,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_LOCK_NAME.to_string(),
            ttl_secs: DEFAULT_LOCK_TTL_SECS,
            directory: PathBuf::from(DEFAULT_LOCK_DIR),
        }
    }
}
