//! Job and fan-out reports

use super::lock::LockBackend;
use super::order::Order;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one guarded job invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// The job ran and produced an order
    Success,
    /// The lock was busy, the job did not run
    Skipped,
    /// The lock fallback or the job itself failed
    Error,
}

/// Report returned by one job invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobReport {
    /// Outcome
    pub status: JobStatus,
    /// Human readable outcome
    pub message: String,
    /// Created order, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    /// Backend that guarded the run, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<LockBackend>,
    /// Completion time
    pub timestamp: DateTime<Utc>,
    /// Wall-clock duration of the invocation
    pub execution_time_ms: u64,
}

impl JobReport {
    /// Report a successful run
    pub fn success(order: Order, backend: LockBackend, execution_time_ms: u64) -> Self {
        Self {
            status: JobStatus::Success,
            message: "Order created successfully".to_string(),
            order: Some(order),
            backend: Some(backend),
            timestamp: Utc::now(),
            execution_time_ms,
        }
    }

    /// Report a skipped run
    pub fn skipped<S: Into<String>>(message: S, execution_time_ms: u64) -> Self {
        Self {
            status: JobStatus::Skipped,
            message: message.into(),
            order: None,
            backend: None,
            timestamp: Utc::now(),
            execution_time_ms,
        }
    }

    /// Report a failed run
    pub fn error<S: Into<String>>(message: S, execution_time_ms: u64) -> Self {
        Self {
            status: JobStatus::Error,
            message: message.into(),
            order: None,
            backend: None,
            timestamp: Utc::now(),
            execution_time_ms,
        }
    }
}

/// How a fan-out request schedules its invocations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FanOutMode {
    /// One invocation after another
    #[default]
    Sequential,
    /// All invocations started at once
    Concurrent,
}

/// One invocation inside a fan-out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationResult {
    /// 1-based invocation number
    pub process_id: usize,
    /// Job report
    pub result: JobReport,
    /// Wall-clock duration of this invocation
    pub execution_time_ms: u64,
}

/// Counters over a fan-out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FanOutSummary {
    /// Invocations performed
    pub total_processes: usize,
    /// Invocations with `success`
    pub successful: usize,
    /// Invocations with `error`
    pub errors: usize,
    /// Invocations with `skipped`
    pub skipped: usize,
    /// Wall-clock duration of the fan-out
    pub total_execution_time_ms: u64,
    /// `total_execution_time_ms / total_processes`
    pub average_execution_time_ms: f64,
    /// Completion time
    pub timestamp: DateTime<Utc>,
}

impl FanOutSummary {
    /// Tally invocation results
    pub fn from_results(results: &[InvocationResult], total_execution_time_ms: u64) -> Self {
        let count = |status: JobStatus| {
            results
                .iter()
                .filter(|r| r.result.status == status)
                .count()
        };
        let total_processes = results.len();

        Self {
            total_processes,
            successful: count(JobStatus::Success),
            errors: count(JobStatus::Error),
            skipped: count(JobStatus::Skipped),
            total_execution_time_ms,
            average_execution_time_ms: if total_processes > 0 {
                total_execution_time_ms as f64 / total_processes as f64
            } else {
                0.0
            },
            timestamp: Utc::now(),
        }
    }
}

/// Full fan-out response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FanOutReport {
    /// Always `completed` once every invocation returned
    pub status: String,
    /// Counters
    pub summary: FanOutSummary,
    /// Per-invocation results, in invocation order
    pub results: Vec<InvocationResult>,
}
