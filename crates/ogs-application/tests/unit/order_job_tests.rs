//! Order Job Tests

use crate::doubles::DownRemote;
use ogs_application::{
    LockCoordinator, OrderJobInterface, OrderJobService, OrderJobSettings, generate_order,
};
use ogs_application::use_cases::order_job::SKIPPED_MESSAGE;
use ogs_domain::constants::CUSTOMER_NAMES;
use ogs_domain::ports::repositories::OrderRepository;
use ogs_domain::value_objects::{JobStatus, LockBackend, Product};
use ogs_providers::database::{InMemoryOrderStore, default_catalogue};
use ogs_providers::lock::{FileLockProvider, InMemoryLockProvider};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn settings(work_ms: u64) -> OrderJobSettings {
    OrderJobSettings {
        lock_name: "order_job_lock".to_string(),
        lock_ttl_secs: 60,
        work_duration: Duration::from_millis(work_ms),
    }
}

#[test]
fn test_generate_order_shape() {
    let product = Product {
        id: 7,
        category_id: 1,
        name: "Laptop".to_string(),
        price_cents: 129_999,
        is_active: true,
    };

    for _ in 0..100 {
        let order = generate_order(&product);
        assert_eq!(order.product_id, 7);
        assert!((1..=5).contains(&order.quantity));
        assert_eq!(order.unit_price_cents, 129_999);
        assert_eq!(
            order.total_price_cents,
            129_999 * u64::from(order.quantity)
        );
        assert!(CUSTOMER_NAMES.contains(&order.customer_name.as_str()));

        let (local, domain) = order.customer_email.split_once('@').unwrap();
        assert_eq!(domain, "example.com");
        let stem = order.customer_name.to_lowercase().replace(' ', ".");
        let suffix: u32 = local.strip_prefix(&stem).unwrap().parse().unwrap();
        assert!((1..=999).contains(&suffix));
    }
}

#[tokio::test]
async fn test_single_run_creates_order() {
    let remote = Arc::new(InMemoryLockProvider::new());
    let dir = TempDir::new().unwrap();
    let coordinator = Arc::new(LockCoordinator::new(
        remote.clone(),
        Arc::new(FileLockProvider::new(dir.path())),
    ));
    let store = Arc::new(InMemoryOrderStore::new());
    let job = OrderJobService::new(coordinator, store.clone(), settings(0));

    let report = job.run().await;

    assert_eq!(report.status, JobStatus::Success);
    assert_eq!(report.message, "Order created successfully");
    assert_eq!(report.backend, Some(LockBackend::Remote));
    assert_eq!(report.order.unwrap().order_id, 1);
    assert_eq!(store.order_count().await.unwrap(), 1);
    assert!(remote.holder("order_job_lock").is_none());
}

#[tokio::test]
async fn test_simultaneous_runs_one_success_one_skip() {
    let remote = Arc::new(InMemoryLockProvider::new());
    let dir = TempDir::new().unwrap();
    let coordinator = Arc::new(LockCoordinator::new(
        remote.clone(),
        Arc::new(FileLockProvider::new(dir.path())),
    ));
    let store = Arc::new(InMemoryOrderStore::new());
    let job = OrderJobService::new(coordinator, store.clone(), settings(300));

    let (first, second) = tokio::join!(job.run(), job.run());
    let mut statuses = [first.status, second.status];
    statuses.sort_by_key(|s| *s as u8);

    assert_eq!(statuses, [JobStatus::Success, JobStatus::Skipped]);
    let (winner, loser) = if first.status == JobStatus::Success {
        (first, second)
    } else {
        (second, first)
    };
    assert!(winner.order.is_some());
    assert_eq!(loser.message, SKIPPED_MESSAGE);
    assert!(loser.order.is_none());

    assert_eq!(store.order_count().await.unwrap(), 1);
    assert!(remote.holder("order_job_lock").is_none());
    assert!(!dir.path().join("order_job_lock.lock").exists());
}

#[tokio::test]
async fn test_simultaneous_runs_on_file_fallback() {
    let dir = TempDir::new().unwrap();
    let file = Arc::new(FileLockProvider::new(dir.path()));
    let coordinator = Arc::new(LockCoordinator::new(
        Arc::new(DownRemote::default()),
        file.clone(),
    ));
    let store = Arc::new(InMemoryOrderStore::new());
    let job = OrderJobService::new(coordinator, store.clone(), settings(300));

    let (first, second) = tokio::join!(job.run(), job.run());
    let successes: Vec<_> = [&first, &second]
        .into_iter()
        .filter(|r| r.status == JobStatus::Success)
        .collect();
    let skipped = [&first, &second]
        .into_iter()
        .filter(|r| r.status == JobStatus::Skipped)
        .count();

    assert_eq!(successes.len(), 1);
    assert_eq!(skipped, 1);
    assert_eq!(successes[0].backend, Some(LockBackend::File));
    assert!(!file.lock_path("order_job_lock").exists());
}

#[tokio::test]
async fn test_failed_work_reports_error_and_releases() {
    let (categories, mut products) = default_catalogue();
    for product in &mut products {
        product.is_active = false;
    }
    let remote = Arc::new(InMemoryLockProvider::new());
    let dir = TempDir::new().unwrap();
    let coordinator = Arc::new(LockCoordinator::new(
        remote.clone(),
        Arc::new(FileLockProvider::new(dir.path())),
    ));
    let store = Arc::new(InMemoryOrderStore::with_catalogue(categories, products));
    let job = OrderJobService::new(coordinator, store, settings(0));

    let report = job.run().await;

    assert_eq!(report.status, JobStatus::Error);
    assert!(report.message.starts_with("Order job error:"));
    assert!(report.message.contains("active product"));
    assert!(report.order.is_none());
    assert!(remote.holder("order_job_lock").is_none());
}

#[tokio::test]
async fn test_report_serializes_lowercase_status() {
    let remote = Arc::new(InMemoryLockProvider::new());
    let dir = TempDir::new().unwrap();
    let coordinator = Arc::new(LockCoordinator::new(
        remote,
        Arc::new(FileLockProvider::new(dir.path())),
    ));
    let job = OrderJobService::new(coordinator, Arc::new(InMemoryOrderStore::new()), settings(0));

    let json = serde_json::to_value(job.run().await).unwrap();
    assert_eq!(json["status"], "success");
    assert_eq!(json["backend"], "remote");
    assert!(json["order"]["order_id"].is_u64());
}
