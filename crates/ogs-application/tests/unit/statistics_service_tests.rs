//! Statistics Service Tests

use crate::doubles::{CountingSource, FailingCache};
use ogs_application::{StatisticsService, StatisticsServiceInterface};
use ogs_domain::ports::providers::{CacheEntryConfig, CacheProvider};
use ogs_domain::ports::repositories::OrderRepository;
use ogs_providers::cache::{MokaCacheProvider, NullCacheProvider};
use ogs_providers::database::InMemoryOrderStore;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

const KEY: &str = "order_stats_last_100";

#[tokio::test]
async fn test_fresh_then_cached_then_recomputed() {
    let source = Arc::new(CountingSource::default());
    let cache = Arc::new(MokaCacheProvider::new());
    let service = StatisticsService::new(source.clone(), cache, KEY, 100);

    let fresh = service.get_statistics(1).await.unwrap();
    assert!(!fresh.from_cache);
    assert!(fresh.cache_age_seconds.is_none());

    let cached = service.get_statistics(1).await.unwrap();
    assert!(cached.from_cache);
    assert_eq!(cached.snapshot, fresh.snapshot);
    assert_eq!(cached.cache_timestamp, fresh.cache_timestamp);
    assert!(cached.cache_age_seconds.unwrap() >= 0);
    assert_eq!(source.calls(), 1);

    tokio::time::sleep(Duration::from_millis(1_300)).await;

    let recomputed = service.get_statistics(1).await.unwrap();
    assert!(!recomputed.from_cache);
    assert_eq!(recomputed.snapshot.summary.total_orders, 2);
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_malformed_entry_is_recomputed_and_overwritten() {
    let source = Arc::new(CountingSource::default());
    let cache = Arc::new(MokaCacheProvider::new());
    cache
        .set_json(KEY, "{not json", CacheEntryConfig::new().with_ttl_secs(60))
        .await
        .unwrap();
    let service = StatisticsService::new(source.clone(), cache.clone(), KEY, 100);

    let report = service.get_statistics(60).await.unwrap();
    assert!(!report.from_cache);
    assert_eq!(source.calls(), 1);

    let stored = cache.get_json(KEY).await.unwrap().unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&stored).is_ok());
    assert!(service.get_statistics(60).await.unwrap().from_cache);
}

#[tokio::test]
async fn test_failing_cache_degrades_to_direct_computation() {
    let source = Arc::new(CountingSource::default());
    let cache = Arc::new(FailingCache::default());
    let service = StatisticsService::new(source.clone(), cache.clone(), KEY, 100);

    let first = service.get_statistics(5).await.unwrap();
    let second = service.get_statistics(5).await.unwrap();

    assert!(!first.from_cache);
    assert!(!second.from_cache);
    assert_eq!(source.calls(), 2);
    assert_eq!(cache.writes.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_disabled_cache_always_computes() {
    let source = Arc::new(CountingSource::default());
    let cache = Arc::new(NullCacheProvider::new());
    let service = StatisticsService::new(source.clone(), cache, KEY, 100);

    assert!(!service.get_statistics(5).await.unwrap().from_cache);
    assert!(!service.get_statistics(5).await.unwrap().from_cache);
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_window_is_passed_to_source() {
    let source = Arc::new(CountingSource::default());
    let service = StatisticsService::new(source, Arc::new(NullCacheProvider::new()), KEY, 25);

    let snapshot = service.compute().await.unwrap();
    assert_eq!(snapshot.query_performance.records_analyzed, 25);
    assert_eq!(snapshot.query_performance.queries_executed, 3);
}

#[tokio::test]
async fn test_report_over_real_store() {
    let store = Arc::new(InMemoryOrderStore::new());
    for _ in 0..3 {
        let product = store.random_active_product().await.unwrap().unwrap();
        let draft = ogs_application::generate_order(&product);
        store.insert_order(draft).await.unwrap();
    }
    let service = StatisticsService::new(store, Arc::new(MokaCacheProvider::new()), KEY, 100);

    let report = service.get_statistics(5).await.unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["summary"]["total_orders"], 3);
    assert_eq!(json["from_cache"], false);
    assert!(json["summary"]["time_period"].is_object());
    assert!(json.get("cache_age_seconds").is_none());
    assert!(json["products"].as_array().unwrap().len() <= 3);
}
