//! Null Cache Provider Tests

use ogs_domain::ports::providers::{CacheEntryConfig, CacheProvider};
use ogs_providers::cache::NullCacheProvider;

#[tokio::test]
async fn test_null_provider_never_stores() {
    let provider = NullCacheProvider::new();

    provider
        .set_json("key", "\"value\"", CacheEntryConfig::default())
        .await
        .unwrap();

    assert!(provider.get_json("key").await.unwrap().is_none());
    assert_eq!(provider.provider_name(), "null");
}
