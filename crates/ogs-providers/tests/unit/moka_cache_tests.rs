//! Moka Cache Provider Tests

use ogs_domain::ports::providers::{CacheEntryConfig, CacheProvider};
use ogs_providers::cache::MokaCacheProvider;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct TestValue {
    data: String,
    number: i32,
}

#[tokio::test]
async fn test_moka_provider_basic_operations() {
    let provider = MokaCacheProvider::new();

    let value = TestValue {
        data: "test data".to_string(),
        number: 42,
    };

    let json = serde_json::to_string(&value).unwrap();
    provider
        .set_json("test_key", &json, CacheEntryConfig::default())
        .await
        .unwrap();

    let retrieved_json = provider.get_json("test_key").await.unwrap();
    let retrieved: Option<TestValue> = retrieved_json.map(|j| serde_json::from_str(&j).unwrap());
    assert_eq!(retrieved, Some(value));

}

#[tokio::test]
async fn test_moka_provider_nonexistent_key() {
    let provider = MokaCacheProvider::new();

    assert!(provider.get_json("nonexistent").await.unwrap().is_none());
}

#[tokio::test]
async fn test_moka_provider_entry_expires_after_its_ttl() {
    let provider = MokaCacheProvider::new();

    provider
        .set_json("short", "\"v\"", CacheEntryConfig::new().with_ttl_secs(1))
        .await
        .unwrap();
    provider
        .set_json("long", "\"v\"", CacheEntryConfig::new().with_ttl_secs(60))
        .await
        .unwrap();

    assert!(provider.get_json("short").await.unwrap().is_some());

    tokio::time::sleep(Duration::from_millis(1_300)).await;

    assert!(provider.get_json("short").await.unwrap().is_none());
    assert!(provider.get_json("long").await.unwrap().is_some());
}

#[tokio::test]
async fn test_moka_provider_overwrite_replaces_value() {
    let provider = MokaCacheProvider::new();

    provider
        .set_json("key", "\"old\"", CacheEntryConfig::default())
        .await
        .unwrap();
    provider
        .set_json("key", "\"new\"", CacheEntryConfig::default())
        .await
        .unwrap();

    assert_eq!(
        provider.get_json("key").await.unwrap().as_deref(),
        Some("\"new\"")
    );
}

#[test]
fn test_moka_provider_name() {
    let provider = MokaCacheProvider::with_capacity(10);
    assert_eq!(provider.provider_name(), "moka");
    assert_eq!(provider.max_entries(), 10);
}
