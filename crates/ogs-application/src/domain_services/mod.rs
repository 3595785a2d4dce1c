//! Domain Service Interfaces
//!
//! Seams between use cases, so a use case can be exercised against a fake
//! collaborator.

use async_trait::async_trait;
use ogs_domain::error::Result;
use ogs_domain::value_objects::{JobReport, StatisticsReport};

/// One guarded invocation of the order job
#[async_trait]
pub trait OrderJobInterface: Send + Sync {
    /// Run the job once
    ///
    /// Never fails: lock contention and failures are folded into the report
    /// status (`skipped` / `error`).
    async fn run(&self) -> JobReport;
}

/// Recent-order statistics
#[async_trait]
pub trait StatisticsServiceInterface: Send + Sync {
    /// Get statistics, served from cache when a fresh entry exists
    async fn get_statistics(&self, ttl_secs: u64) -> Result<StatisticsReport>;
}
