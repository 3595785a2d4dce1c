//! Use Cases
//!
//! Application services built on the domain ports.

pub mod fan_out;
pub mod lock_coordinator;
pub mod order_job;
pub mod statistics_service;

pub use fan_out::FanOutService;
pub use lock_coordinator::{LockCoordinator, ownership_token};
pub use order_job::{OrderJobService, OrderJobSettings, generate_order};
pub use statistics_service::StatisticsService;
