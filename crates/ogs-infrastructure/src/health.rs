//! System health checks
//!
//! Backs `ogs check`: contacts the remote lock store, the fallback lock
//! directory and the order store, and folds the results into one response.

use crate::constants::{HEALTH_CHECK_LOCK_DIR, HEALTH_CHECK_ORDER_STORE, HEALTH_CHECK_REDIS};
use crate::logging::log_health_check;
use ogs_domain::ports::repositories::OrderRepository;
use ogs_providers::redis_client::RedisConnection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Health status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Component is fully operational
    Up,
    /// Component has issues but the service still works
    Degraded,
    /// Component is not operational
    Down,
}

impl HealthStatus {
    /// Check if the status indicates the component is healthy
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Check if the component is operational (healthy or degraded)
    pub fn is_operational(&self) -> bool {
        matches!(self, Self::Up | Self::Degraded)
    }
}

/// Individual health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Name of the health check
    pub name: String,
    /// Current status
    pub status: HealthStatus,
    /// Timestamp of the check
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Response time in milliseconds
    pub response_time_ms: u64,
    /// Failure or degradation reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl HealthCheck {
    fn with_status<S: Into<String>>(name: S, status: HealthStatus, error: Option<String>) -> Self {
        Self {
            name: name.into(),
            status,
            timestamp: chrono::Utc::now(),
            response_time_ms: 0,
            error,
            details: None,
        }
    }

    /// Create a successful health check
    pub fn healthy<S: Into<String>>(name: S) -> Self {
        Self::with_status(name, HealthStatus::Up, None)
    }

    /// Create a failed health check
    pub fn failed<S: Into<String>>(name: S, error: Option<String>) -> Self {
        Self::with_status(name, HealthStatus::Down, error)
    }

    /// Create a degraded health check
    pub fn degraded<S: Into<String>>(name: S, reason: Option<String>) -> Self {
        Self::with_status(name, HealthStatus::Degraded, reason)
    }

    /// Set response time
    pub fn with_response_time(mut self, duration: Duration) -> Self {
        self.response_time_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set additional details
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Overall health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Worst status across all checks
    pub status: HealthStatus,
    /// Timestamp of the health check
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Total response time in milliseconds
    pub response_time_ms: u64,
    /// Individual results keyed by check name
    pub checks: BTreeMap<String, HealthCheck>,
    /// Service version
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthResponse {
    /// Create a new health response
    pub fn new() -> Self {
        Self {
            status: HealthStatus::Up,
            timestamp: chrono::Utc::now(),
            response_time_ms: 0,
            checks: BTreeMap::new(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Add a health check result
    pub fn add_check(mut self, check: HealthCheck) -> Self {
        if check.status == HealthStatus::Down {
            self.status = HealthStatus::Down;
        } else if check.status == HealthStatus::Degraded && self.status == HealthStatus::Up {
            self.status = HealthStatus::Degraded;
        }

        self.checks.insert(check.name.clone(), check);
        self
    }

    /// Set response time
    pub fn with_response_time(mut self, duration: Duration) -> Self {
        self.response_time_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Check if every component is healthy
    pub fn is_healthy(&self) -> bool {
        self.status.is_healthy()
    }

    /// Check if the service can run (no component down)
    pub fn is_operational(&self) -> bool {
        self.status.is_operational()
    }
}

/// Health check function trait
///
/// # Example
///
/// ```ignore
/// use ogs_infrastructure::health::{HealthChecker, HealthCheck};
/// use async_trait::async_trait;
///
/// struct AlwaysUp;
///
/// #[async_trait]
/// impl HealthChecker for AlwaysUp {
///     async fn check_health(&self) -> HealthCheck {
///         HealthCheck::healthy("always_up")
///     }
/// }
/// ```
#[async_trait::async_trait]
pub trait HealthChecker: Send + Sync {
    /// Perform a health check
    async fn check_health(&self) -> HealthCheck;
}

/// Health check registry
#[derive(Clone)]
pub struct HealthRegistry {
    checkers: Arc<RwLock<BTreeMap<String, Box<dyn HealthChecker>>>>,
}

impl HealthRegistry {
    /// Create a new health registry
    pub fn new() -> Self {
        Self {
            checkers: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Register a health checker, replacing one with the same name
    pub async fn register_checker<C>(&self, name: impl Into<String>, checker: C)
    where
        C: HealthChecker + 'static,
    {
        self.checkers
            .write()
            .await
            .insert(name.into(), Box::new(checker));
    }

    /// Unregister a health checker
    pub async fn unregister_checker(&self, name: &str) {
        self.checkers.write().await.remove(name);
    }

    /// Perform all registered health checks
    pub async fn perform_health_checks(&self) -> HealthResponse {
        let start_time = Instant::now();
        let checkers = self.checkers.read().await;

        let mut response = HealthResponse::new();

        for (name, checker) in checkers.iter() {
            let check = checker.check_health().await;
            log_health_check(name, check.status.is_operational(), check.error.as_deref());
            response = response.add_check(check);
        }

        response.with_response_time(start_time.elapsed())
    }

    /// Get the registered health check names, sorted
    pub async fn list_checks(&self) -> Vec<String> {
        self.checkers.read().await.keys().cloned().collect()
    }
}

impl Default for HealthRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HealthRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthRegistry").finish_non_exhaustive()
    }
}

/// Built-in health checkers
pub mod checkers {
    use super::*;

    /// Redis reachability
    ///
    /// An unreachable server is `Degraded`, not `Down`: jobs still run under
    /// the file lock.
    pub struct RedisHealthChecker {
        connection: Arc<RedisConnection>,
    }

    impl RedisHealthChecker {
        pub fn new(connection: Arc<RedisConnection>) -> Self {
            Self { connection }
        }
    }

    #[async_trait::async_trait]
    impl HealthChecker for RedisHealthChecker {
        async fn check_health(&self) -> HealthCheck {
            let start_time = Instant::now();
            let details = serde_json::json!({ "address": self.connection.address() });

            let check = match self.connection.ping().await {
                Ok(()) => HealthCheck::healthy(HEALTH_CHECK_REDIS),
                Err(e) => HealthCheck::degraded(
                    HEALTH_CHECK_REDIS,
                    Some(format!("{e}; falling back to file locks")),
                ),
            };
            check
                .with_details(details)
                .with_response_time(start_time.elapsed())
        }
    }

    /// Fallback lock directory is writable
    pub struct LockDirectoryHealthChecker {
        directory: PathBuf,
    }

    impl LockDirectoryHealthChecker {
        pub fn new(directory: impl Into<PathBuf>) -> Self {
            Self {
                directory: directory.into(),
            }
        }

        async fn write_marker(&self) -> std::io::Result<()> {
            tokio::fs::create_dir_all(&self.directory).await?;
            let marker = self
                .directory
                .join(format!(".health-{}", std::process::id()));
            tokio::fs::write(&marker, b"ok").await?;
            tokio::fs::remove_file(&marker).await
        }
    }

    #[async_trait::async_trait]
    impl HealthChecker for LockDirectoryHealthChecker {
        async fn check_health(&self) -> HealthCheck {
            let start_time = Instant::now();
            let details = serde_json::json!({ "directory": self.directory.display().to_string() });

            let check = match self.write_marker().await {
                Ok(()) => HealthCheck::healthy(HEALTH_CHECK_LOCK_DIR),
                Err(e) => HealthCheck::failed(
                    HEALTH_CHECK_LOCK_DIR,
                    Some(format!("Lock directory is not writable: {e}")),
                ),
            };
            check
                .with_details(details)
                .with_response_time(start_time.elapsed())
        }
    }

    /// Order store answers queries
    pub struct OrderStoreHealthChecker {
        orders: Arc<dyn OrderRepository>,
    }

    impl OrderStoreHealthChecker {
        pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
            Self { orders }
        }
    }

    #[async_trait::async_trait]
    impl HealthChecker for OrderStoreHealthChecker {
        async fn check_health(&self) -> HealthCheck {
            let start_time = Instant::now();

            let counts = async {
                let products = self.orders.product_count().await?;
                let orders = self.orders.order_count().await?;
                ogs_domain::error::Result::Ok((products, orders))
            }
            .await;

            let check = match counts {
                Ok((products, orders)) => HealthCheck::healthy(HEALTH_CHECK_ORDER_STORE)
                    .with_details(serde_json::json!({
                        "products": products,
                        "orders": orders,
                    })),
                Err(e) => HealthCheck::failed(HEALTH_CHECK_ORDER_STORE, Some(e.to_string())),
            };
            check.with_response_time(start_time.elapsed())
        }
    }
}
