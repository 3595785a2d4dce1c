//! Lock Provider Implementations
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`RedisLockProvider`] | Distributed | `SET NX EX` plus compare-and-delete script |
//! | [`FileLockProvider`] | Local | Advisory lock on `<dir>/<name>.lock` |
//! | [`InMemoryLockProvider`] | Process | TTL map, for tests and single-process use |
//!
//! ## Provider Selection Guide
//!
//! - **Multi Instance**: `RedisLockProvider`, with `FileLockProvider` as fallback
//! - **Single Host**: `FileLockProvider` alone
//! - **Testing**: `InMemoryLockProvider`

pub mod file;
pub mod memory;
#[cfg(feature = "lock-redis")]
pub mod redis;

// Re-export for convenience
pub use file::FileLockProvider;
pub use memory::InMemoryLockProvider;
#[cfg(feature = "lock-redis")]
pub use self::redis::RedisLockProvider;
