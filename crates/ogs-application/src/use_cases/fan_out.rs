//! Fan-Out Use Case
//!
//! Invokes the order job `n` times and tallies the outcomes. With the job
//! lock in place, at most one of any overlapping invocations succeeds.

use crate::domain_services::OrderJobInterface;
use futures::future::join_all;
use ogs_domain::error::{Error, Result};
use ogs_domain::value_objects::{FanOutMode, FanOutReport, FanOutSummary, InvocationResult};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Repeated invocation of the order job
pub struct FanOutService {
    job: Arc<dyn OrderJobInterface>,
    max_fan_out: usize,
}

impl FanOutService {
    /// Create a fan-out over `job`, capped at `max_fan_out` invocations
    pub fn new(job: Arc<dyn OrderJobInterface>, max_fan_out: usize) -> Self {
        Self { job, max_fan_out }
    }

    /// Invoke the job `requested` times
    ///
    /// `requested` above the cap is clamped; zero is rejected.
    pub async fn run(&self, requested: usize, mode: FanOutMode) -> Result<FanOutReport> {
        if requested < 1 {
            return Err(Error::invalid_argument("Parameter N must be greater than 0"));
        }
        let n = if requested > self.max_fan_out {
            warn!(requested, limit = self.max_fan_out, "N limited for safety");
            self.max_fan_out
        } else {
            requested
        };

        info!(n, mode = ?mode, "Fan-out started");
        let started = Instant::now();

        let results = match mode {
            FanOutMode::Sequential => {
                let mut results = Vec::with_capacity(n);
                for process_id in 1..=n {
                    results.push(self.invoke(process_id).await);
                }
                results
            }
            FanOutMode::Concurrent => join_all((1..=n).map(|id| self.invoke(id))).await,
        };

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let summary = FanOutSummary::from_results(&results, elapsed_ms);
        info!(
            successful = summary.successful,
            errors = summary.errors,
            skipped = summary.skipped,
            "Fan-out completed"
        );

        Ok(FanOutReport {
            status: "completed".to_string(),
            summary,
            results,
        })
    }

    async fn invoke(&self, process_id: usize) -> InvocationResult {
        let started = Instant::now();
        let result = self.job.run().await;
        let execution_time_ms = started.elapsed().as_millis() as u64;
        tracing::debug!(process_id, status = ?result.status, "Invocation completed");

        InvocationResult {
            process_id,
            result,
            execution_time_ms,
        }
    }
}
