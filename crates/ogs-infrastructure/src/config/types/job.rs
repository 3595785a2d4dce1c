//! Job configuration types

use crate::constants::DEFAULT_ORDERS_FILE;
use ogs_domain::constants::{DEFAULT_JOB_WORK_DURATION_MS, DEFAULT_STATISTICS_WINDOW, MAX_FAN_OUT};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Order job, fan-out and statistics tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    /// Pause held inside the critical section, in milliseconds
    pub work_duration_ms: u64,
    /// Upper bound for one fan-out request
    pub max_fan_out: usize,
    /// Number of most recent orders analysed by the statistics
    pub statistics_window: usize,
    /// JSON file backing the order store; unset keeps orders in memory only
    pub orders_file: Option<PathBuf>,
}

impl JobConfig {
    /// Pause held inside the critical section
    pub fn work_duration(&self) -> Duration {
        Duration::from_millis(self.work_duration_ms)
    }
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            work_duration_ms: DEFAULT_JOB_WORK_DURATION_MS,
            max_fan_out: MAX_FAN_OUT,
            statistics_window: DEFAULT_STATISTICS_WINDOW,
            orders_file: Some(PathBuf::from(DEFAULT_ORDERS_FILE)),
        }
    }
}
