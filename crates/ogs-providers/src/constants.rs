//! Provider-specific constants

// ============================================================================
// REDIS CONSTANTS
// ============================================================================

/// Default Redis host
pub const REDIS_DEFAULT_HOST: &str = "127.0.0.1";

/// Default Redis port
pub const REDIS_DEFAULT_PORT: u16 = 6379;

/// Connect and command timeout for Redis, in seconds
pub const REDIS_DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Server-side compare-and-delete: delete the key only if it still holds
/// the caller's token. Returns 1 when deleted, 0 otherwise.
pub const COMPARE_AND_DELETE_SCRIPT: &str = r#"
if redis.call("get", KEYS[1]) == ARGV[1] then
    return redis.call("del", KEYS[1])
else
    return 0
end
"#;

// ============================================================================
// FILE LOCK CONSTANTS
// ============================================================================

/// Open-then-lock attempts before reporting the lock busy
///
/// A retry is needed when the previous holder unlinked the file between our
/// open and our lock.
pub const LOCK_FILE_OPEN_ATTEMPTS: usize = 3;

/// Permission bits for a lock directory created on first acquire (before umask)
#[cfg(unix)]
pub const LOCK_DIRECTORY_MODE: u32 = 0o755;

// ============================================================================
// CACHE PROVIDER CONSTANTS
// ============================================================================

/// Default maximum number of entries in the in-memory cache
pub const CACHE_DEFAULT_MAX_ENTRIES: u64 = 10_000;

// ============================================================================
// ORDER STORE CONSTANTS
// ============================================================================

/// Queries the relational store issues for one statistics computation
/// (per-product, per-category, summary)
pub const STATISTICS_QUERY_COUNT: u32 = 3;
