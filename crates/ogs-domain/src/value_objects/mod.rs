//! Value objects
//!
//! Immutable data carried across the layers.

/// Fan-out and job reports
pub mod job;
/// Lock handles and acquisition outcomes
pub mod lock;
/// Catalogue and order records
pub mod order;
/// Recent-order statistics
pub mod statistics;

pub use job::{FanOutMode, FanOutReport, FanOutSummary, InvocationResult, JobReport, JobStatus};
pub use lock::{Guarded, LockBackend, LockHandle, LockOutcome};
pub use order::{Category, NewOrder, Order, Product};
pub use statistics::{
    CachedSnapshot, CategoryStatistics, OrderAggregate, OrderTotals, ProductStatistics,
    QueryPerformance, StatisticsReport, StatisticsSnapshot, StatisticsSummary, TimePeriod,
};
