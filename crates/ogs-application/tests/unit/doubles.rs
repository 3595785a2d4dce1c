//! Test doubles for the domain ports

use async_trait::async_trait;
use ogs_domain::error::{Error, Result};
use ogs_domain::ports::providers::{CacheEntryConfig, CacheProvider, LockProvider};
use ogs_domain::ports::repositories::StatisticsSource;
use ogs_domain::value_objects::{OrderAggregate, OrderTotals};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Remote lock store that is never reachable
#[derive(Debug, Default)]
pub struct DownRemote {
    pub attempts: AtomicUsize,
}

#[async_trait]
impl LockProvider for DownRemote {
    async fn try_acquire(&self, _name: &str, _token: &str, _ttl: Duration) -> Result<bool> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(Error::backend_unavailable("connection refused"))
    }

    async fn release(&self, _name: &str, _token: &str) -> Result<bool> {
        Err(Error::backend_unavailable("connection refused"))
    }

    fn provider_name(&self) -> &str {
        "down"
    }
}

/// Remote lock store that answers with a non-connectivity error
#[derive(Debug, Default)]
pub struct BrokenRemote;

#[async_trait]
impl LockProvider for BrokenRemote {
    async fn try_acquire(&self, _name: &str, _token: &str, _ttl: Duration) -> Result<bool> {
        Err(Error::infrastructure("WRONGTYPE Operation against a key"))
    }

    async fn release(&self, _name: &str, _token: &str) -> Result<bool> {
        Err(Error::infrastructure("WRONGTYPE Operation against a key"))
    }

    fn provider_name(&self) -> &str {
        "broken"
    }
}

/// Lock provider that must never be called
#[derive(Debug, Default)]
pub struct UnusedLock;

#[async_trait]
impl LockProvider for UnusedLock {
    async fn try_acquire(&self, _name: &str, _token: &str, _ttl: Duration) -> Result<bool> {
        panic!("fallback lock must not be used")
    }

    async fn release(&self, _name: &str, _token: &str) -> Result<bool> {
        panic!("fallback lock must not be used")
    }

    fn provider_name(&self) -> &str {
        "unused"
    }
}

/// Cache whose every operation fails
#[derive(Debug, Default)]
pub struct FailingCache {
    pub writes: AtomicUsize,
}

#[async_trait]
impl CacheProvider for FailingCache {
    async fn get_json(&self, _key: &str) -> Result<Option<String>> {
        Err(Error::backend_unavailable("cache down"))
    }

    async fn set_json(&self, _key: &str, _value: &str, _config: CacheEntryConfig) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(Error::backend_unavailable("cache down"))
    }

    fn provider_name(&self) -> &str {
        "failing"
    }
}

/// Statistics source counting its computations
#[derive(Debug, Default)]
pub struct CountingSource {
    pub calls: AtomicUsize,
}

impl CountingSource {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatisticsSource for CountingSource {
    async fn aggregate_recent(&self, window: usize) -> Result<OrderAggregate> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) as u64 + 1;
        Ok(OrderAggregate {
            totals: OrderTotals {
                total_orders: call,
                total_revenue_cents: call * 1_000,
                avg_order_value_cents: 1_000.0,
                first_order_time: None,
                last_order_time: None,
            },
            queries_executed: 3,
            records_analyzed: window as u64,
            ..OrderAggregate::default()
        })
    }
}
