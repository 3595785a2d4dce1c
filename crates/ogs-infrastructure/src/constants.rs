//! Infrastructure layer constants
//!
//! Defaults for the ambient stack. Job and lock defaults live in
//! `ogs_domain::constants`, Redis defaults in `ogs_providers::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "ogs.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "ogs";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "OGS";

/// Separator between nested keys in environment variables
/// (`OGS_REDIS__HOST` sets `redis.host`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// STORAGE CONSTANTS
// ============================================================================

/// Default directory for fallback lock files
pub const DEFAULT_LOCK_DIR: &str = "locks";

/// Default order store file
pub const DEFAULT_ORDERS_FILE: &str = "data/orders.json";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_ENV_FILTER: &str = "OGS_LOG";

/// File stem used when the log file path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "ogs";

// ============================================================================
// HEALTH CHECK CONSTANTS
// ============================================================================

/// Name of the Redis health check
pub const HEALTH_CHECK_REDIS: &str = "redis";

/// Name of the lock directory health check
pub const HEALTH_CHECK_LOCK_DIR: &str = "lock_directory";

/// Name of the order store health check
pub const HEALTH_CHECK_ORDER_STORE: &str = "order_store";
