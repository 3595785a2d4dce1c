//! Configuration types module

pub mod app;
pub mod cache;
pub mod job;
pub mod lock;
pub mod logging;
pub mod redis;

// Re-export main types
pub use app::AppConfig;
pub use cache::CacheConfig;
pub use job::JobConfig;
pub use lock::LockConfig;
pub use logging::LoggingConfig;
pub use self::redis::RedisConfig;
