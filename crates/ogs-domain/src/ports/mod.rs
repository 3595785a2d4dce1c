//! Domain Port Interfaces
//!
//! Ports define the contracts that external layers must implement:
//! - **providers/** - lock and cache backends
//! - **repositories/** - the order store

/// External service provider ports
pub mod providers;
/// Order store ports
pub mod repositories;

pub use providers::{CacheEntryConfig, CacheProvider, LockProvider};
pub use repositories::{OrderRepository, StatisticsSource};
