//! Fan-Out Tests

use async_trait::async_trait;
use ogs_application::{
    FanOutService, LockCoordinator, OrderJobInterface, OrderJobService, OrderJobSettings,
};
use ogs_domain::error::Error;
use ogs_domain::value_objects::{FanOutMode, JobReport, JobStatus};
use ogs_providers::database::InMemoryOrderStore;
use ogs_providers::lock::{FileLockProvider, InMemoryLockProvider};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;

/// Job cycling through skipped, error, skipped reports without any lock
#[derive(Default)]
struct ScriptedJob {
    calls: AtomicUsize,
}

#[async_trait]
impl OrderJobInterface for ScriptedJob {
    async fn run(&self) -> JobReport {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        match call % 3 {
            0 => JobReport::skipped("busy", 1),
            1 => JobReport::error("boom", 1),
            _ => JobReport::skipped("busy", 1),
        }
    }
}

fn real_job(work_ms: u64) -> (Arc<OrderJobService>, TempDir) {
    let dir = TempDir::new().unwrap();
    let coordinator = Arc::new(LockCoordinator::new(
        Arc::new(InMemoryLockProvider::new()),
        Arc::new(FileLockProvider::new(dir.path())),
    ));
    let job = OrderJobService::new(
        coordinator,
        Arc::new(InMemoryOrderStore::new()),
        OrderJobSettings {
            lock_name: "order_job_lock".to_string(),
            lock_ttl_secs: 60,
            work_duration: Duration::from_millis(work_ms),
        },
    );
    (Arc::new(job), dir)
}

#[tokio::test]
async fn test_zero_invocations_is_rejected() {
    let service = FanOutService::new(Arc::new(ScriptedJob::default()), 10);

    let err = service.run(0, FanOutMode::Sequential).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
    assert!(err.to_string().contains("greater than 0"));
}

#[tokio::test]
async fn test_request_above_cap_is_clamped() {
    let job = Arc::new(ScriptedJob::default());
    let service = FanOutService::new(job.clone(), 3);

    let report = service.run(10, FanOutMode::Sequential).await.unwrap();

    assert_eq!(report.summary.total_processes, 3);
    assert_eq!(report.results.len(), 3);
    assert_eq!(job.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_summary_counts_statuses() {
    let service = FanOutService::new(Arc::new(ScriptedJob::default()), 100);

    let report = service.run(6, FanOutMode::Sequential).await.unwrap();

    assert_eq!(report.status, "completed");
    assert_eq!(report.summary.successful, 0);
    assert_eq!(report.summary.errors, 2);
    assert_eq!(report.summary.skipped, 4);
    let ids: Vec<usize> = report.results.iter().map(|r| r.process_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn test_sequential_invocations_all_succeed() {
    let (job, _dir) = real_job(0);
    let service = FanOutService::new(job, 100);

    let report = service.run(4, FanOutMode::Sequential).await.unwrap();

    assert_eq!(report.summary.successful, 4);
    assert_eq!(report.summary.skipped, 0);
    assert!(
        report
            .results
            .iter()
            .all(|r| r.result.status == JobStatus::Success)
    );
}

#[tokio::test]
async fn test_concurrent_invocations_admit_one() {
    let (job, _dir) = real_job(200);
    let service = FanOutService::new(job, 100);

    let report = service.run(5, FanOutMode::Concurrent).await.unwrap();

    assert_eq!(report.summary.total_processes, 5);
    assert_eq!(report.summary.successful, 1);
    assert_eq!(report.summary.skipped, 4);
    assert_eq!(report.summary.errors, 0);
}
