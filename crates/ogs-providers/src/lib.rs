//! # Order Guard Service - Provider Implementations
//!
//! Adapters for the ports defined in `ogs-domain`.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Lock | `LockProvider` | Redis, File, InMemory |
//! | Cache | `CacheProvider` | Redis, Moka, Null |
//! | Order store | `OrderRepository`, `StatisticsSource` | InMemory (optional JSON file) |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! ogs-providers = { version = "0.1", default-features = false, features = ["cache-moka"] }
//! ```
//!
//! The file and in-memory lock providers are always available.

// Re-export ogs-domain types commonly used with providers
pub use ogs_domain::error::{Error, Result};
pub use ogs_domain::ports::providers::{CacheProvider, LockProvider};
pub use ogs_domain::ports::repositories::{OrderRepository, StatisticsSource};

/// Provider-specific constants
pub mod constants;

/// Shared Redis client
///
/// One explicitly constructed connection handle, injected into the Redis
/// lock and cache providers.
#[cfg(any(feature = "lock-redis", feature = "cache-redis"))]
pub mod redis_client;

/// Lock provider implementations
///
/// Implements `LockProvider` for the remote store, the file fallback and
/// tests.
pub mod lock;

/// Cache provider implementations
///
/// Implements `CacheProvider` trait for caching backends.
pub mod cache;

/// Order store implementations
///
/// Implements `OrderRepository` and `StatisticsSource`.
pub mod database;
