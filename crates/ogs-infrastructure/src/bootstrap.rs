//! Composition root
//!
//! Builds the provider graph from [`AppConfig`] and hands out the use cases.
//!
//! | Setting | Lock | Statistics cache |
//! |---------|------|------------------|
//! | `redis.enabled` | Redis, file fallback | Redis (if `cache.enabled`) |
//! | `!redis.enabled` | file only | Moka (if `cache.enabled`) |
//! | `!cache.enabled` | unchanged | none |

use crate::config::AppConfig;
use crate::constants::{HEALTH_CHECK_LOCK_DIR, HEALTH_CHECK_ORDER_STORE, HEALTH_CHECK_REDIS};
use crate::health::HealthRegistry;
use crate::health::HealthResponse;
use crate::health::checkers::{
    LockDirectoryHealthChecker, OrderStoreHealthChecker, RedisHealthChecker,
};
use ogs_application::{
    FanOutService, LockCoordinator, OrderJobInterface, OrderJobService, OrderJobSettings,
    StatisticsService, StatisticsServiceInterface,
};
use ogs_domain::error::Result;
use ogs_domain::ports::providers::{CacheProvider, LockProvider};
use ogs_domain::value_objects::{FanOutMode, FanOutReport, JobReport, StatisticsReport};
use ogs_providers::cache::{MokaCacheProvider, NullCacheProvider, RedisCacheProvider};
use ogs_providers::database::InMemoryOrderStore;
use ogs_providers::lock::{FileLockProvider, RedisLockProvider};
use ogs_providers::redis_client::RedisConnection;
use std::sync::Arc;
use tracing::info;

/// Wired application services
pub struct AppContext {
    job: Arc<OrderJobService>,
    fan_out: FanOutService,
    statistics: StatisticsService,
    health: HealthRegistry,
    cache_ttl_secs: u64,
}

impl AppContext {
    /// Build every provider and use case from a validated configuration
    ///
    /// No network traffic happens here; Redis is contacted on first use.
    pub async fn build(config: &AppConfig) -> Result<Self> {
        let file_lock: Arc<dyn LockProvider> =
            Arc::new(FileLockProvider::new(config.lock.directory.clone()));

        let store = Arc::new(match &config.job.orders_file {
            Some(path) => InMemoryOrderStore::open(path.clone())?,
            None => InMemoryOrderStore::new(),
        });

        let health = HealthRegistry::new();
        health
            .register_checker(
                HEALTH_CHECK_LOCK_DIR,
                LockDirectoryHealthChecker::new(config.lock.directory.clone()),
            )
            .await;
        health
            .register_checker(
                HEALTH_CHECK_ORDER_STORE,
                OrderStoreHealthChecker::new(store.clone()),
            )
            .await;

        let redis = if config.redis.enabled {
            let connection = Arc::new(RedisConnection::new(
                &config.redis.url(),
                config.redis.timeout(),
            )?);
            health
                .register_checker(
                    HEALTH_CHECK_REDIS,
                    RedisHealthChecker::new(connection.clone()),
                )
                .await;
            Some(connection)
        } else {
            None
        };

        let coordinator = Arc::new(match &redis {
            Some(connection) => LockCoordinator::new(
                Arc::new(RedisLockProvider::new(connection.clone())),
                file_lock,
            ),
            None => LockCoordinator::file_only(file_lock),
        });

        let cache: Arc<dyn CacheProvider> = match (&redis, config.cache.enabled) {
            (_, false) => Arc::new(NullCacheProvider::new()),
            (Some(connection), true) => Arc::new(RedisCacheProvider::new(connection.clone())),
            (None, true) => Arc::new(MokaCacheProvider::new()),
        };

        info!(
            redis = config.redis.enabled,
            cache = cache.provider_name(),
            lock_directory = %config.lock.directory.display(),
            "Application context built"
        );

        let job = Arc::new(OrderJobService::new(
            coordinator.clone(),
            store.clone(),
            OrderJobSettings {
                lock_name: config.lock.name.clone(),
                lock_ttl_secs: config.lock.ttl_secs,
                work_duration: config.job.work_duration(),
            },
        ));
        let fan_out = FanOutService::new(job.clone(), config.job.max_fan_out);
        let statistics = StatisticsService::new(
            store,
            cache,
            config.cache.key.clone(),
            config.job.statistics_window,
        );

        Ok(Self {
            job,
            fan_out,
            statistics,
            health,
            cache_ttl_secs: config.cache.ttl_secs,
        })
    }

    /// Run the guarded order job once
    pub async fn run_job(&self) -> JobReport {
        self.job.run().await
    }

    /// Invoke the job `requested` times
    pub async fn fan_out(&self, requested: usize, mode: FanOutMode) -> Result<FanOutReport> {
        self.fan_out.run(requested, mode).await
    }

    /// Recent-order statistics through the cache
    pub async fn statistics(&self) -> Result<StatisticsReport> {
        self.statistics.get_statistics(self.cache_ttl_secs).await
    }

    /// Run every registered health check
    pub async fn check(&self) -> HealthResponse {
        self.health.perform_health_checks().await
    }
}
