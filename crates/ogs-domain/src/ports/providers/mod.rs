//! External Provider Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | LockProvider | Mutual exclusion backends (remote store, file) |
//! | CacheProvider | Short-lived key-value caching |

/// Cache provider port
pub mod cache;
/// Lock provider port
pub mod lock;

pub use cache::{CacheEntryConfig, CacheProvider};
pub use lock::LockProvider;
