//! Domain layer constants
//!
//! Defaults for the guarded order job and the statistics cache. The
//! infrastructure configuration falls back to these values.

// ============================================================================
// LOCK CONSTANTS
// ============================================================================

/// Lock name guarding the order generation job
pub const DEFAULT_LOCK_NAME: &str = "order_job_lock";

/// Lock time-to-live in seconds
pub const DEFAULT_LOCK_TTL_SECS: u64 = 60;

/// Extension appended to the lock name for the fallback lock file
pub const LOCK_FILE_EXTENSION: &str = "lock";

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Cache key for the recent-orders statistics snapshot
pub const STATISTICS_CACHE_KEY: &str = "order_stats_last_100";

/// Statistics cache time-to-live in seconds
pub const DEFAULT_STATISTICS_CACHE_TTL_SECS: u64 = 5;

// ============================================================================
// JOB CONSTANTS
// ============================================================================

/// Pause held inside the critical section, in milliseconds
pub const DEFAULT_JOB_WORK_DURATION_MS: u64 = 1000;

/// Upper bound for a single fan-out request
pub const MAX_FAN_OUT: usize = 1000;

/// Number of most recent orders analysed by the statistics query
pub const DEFAULT_STATISTICS_WINDOW: usize = 100;

/// Inclusive range of quantities for a generated order
pub const ORDER_QUANTITY_RANGE: std::ops::RangeInclusive<u32> = 1..=5;

/// Customer names used for generated orders
pub const CUSTOMER_NAMES: &[&str] = &[
    "Ivan Petrov",
    "Maria Sidorova",
    "Alexei Kozlov",
    "Elena Volkova",
    "Dmitry Orlov",
];

/// Domain for generated customer e-mail addresses
pub const CUSTOMER_EMAIL_DOMAIN: &str = "example.com";
