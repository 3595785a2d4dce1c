//! Application Layer - Order Guard Service
//!
//! Use cases orchestrating the domain ports:
//!
//! - [`LockCoordinator`]: remote lock with transparent file fallback
//! - [`OrderJobService`]: the guarded "generate one order" job
//! - [`FanOutService`]: repeated invocation of the job
//! - [`StatisticsService`]: read-through cache over the recent-orders aggregate
//!
//! This crate depends only on `ogs-domain`; adapters are injected.

pub mod domain_services;
pub mod use_cases;

pub use domain_services::*;
pub use use_cases::*;
