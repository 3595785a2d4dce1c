//! Redis connection handle
//!
//! Wraps a `redis::Client` and a lazily opened multiplexed connection. The
//! connection slot is guarded by an async mutex that is never held while
//! connecting; a connectivity failure empties the slot so the next call
//! reconnects.
//!
//! Every connect and command is bounded by the configured timeout, and
//! connectivity failures surface as [`Error::BackendUnavailable`] so the lock
//! coordinator can fall back to the file lock.
//!
//! ## Example
//!
//! ```ignore
//! use ogs_providers::redis_client::RedisConnection;
//! use std::time::Duration;
//!
//! let connection = RedisConnection::with_host_port("127.0.0.1", 6379, Duration::from_secs(5))?;
//! connection.ping().await?;
//! ```

use ogs_domain::error::{Error, Result};
use redis::aio::MultiplexedConnection;
use redis::{Client, Cmd, FromRedisValue, RedisError, ScriptInvocation};
use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// Shared Redis client with a cached multiplexed connection
pub struct RedisConnection {
    client: Client,
    address: String,
    timeout: Duration,
    connection: Mutex<Option<MultiplexedConnection>>,
}

impl RedisConnection {
    /// Create a connection handle from a Redis URL
    ///
    /// No network traffic happens until the first command.
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::open(url).map_err(|e| {
            Error::infrastructure_with_source(format!("Failed to create Redis client: {e}"), e)
        })?;

        Ok(Self {
            client,
            address: url.to_string(),
            timeout,
            connection: Mutex::new(None),
        })
    }

    /// Create a connection handle from host and port
    pub fn with_host_port(host: &str, port: u16, timeout: Duration) -> Result<Self> {
        Self::new(&format!("redis://{host}:{port}/"), timeout)
    }

    /// Redis URL this handle connects to
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Get the shared connection, connecting on first use
    ///
    /// The slot is only locked to read or store the connection, never across
    /// the connect itself, so concurrent callers against an unresponsive
    /// server each give up after one timeout.
    pub async fn connection(&self) -> Result<MultiplexedConnection> {
        if let Some(conn) = self.connection.lock().await.as_ref() {
            return Ok(conn.clone());
        }

        let conn = self.connect().await?;
        let mut slot = self.connection.lock().await;
        Ok(slot.get_or_insert(conn).clone())
    }

    async fn connect(&self) -> Result<MultiplexedConnection> {
        let conn = tokio::time::timeout(
            self.timeout,
            self.client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| {
            Error::backend_unavailable(format!(
                "Timed out connecting to Redis at {} after {:?}",
                self.address, self.timeout
            ))
        })?
        .map_err(|e| {
            Error::backend_unavailable_with_source(
                format!("Failed to connect to Redis at {}: {e}", self.address),
                e,
            )
        })?;

        debug!(address = %self.address, "Redis connection established");
        Ok(conn)
    }

    /// Drop the cached connection
    pub async fn reset(&self) {
        self.connection.lock().await.take();
    }

    /// Run one command
    pub async fn query<T: FromRedisValue>(&self, cmd: &Cmd, operation: &str) -> Result<T> {
        let mut conn = self.connection().await?;
        self.bounded(operation, cmd.query_async::<T>(&mut conn)).await
    }

    /// Run one server-side script
    pub async fn invoke<T: FromRedisValue>(
        &self,
        invocation: &ScriptInvocation<'_>,
        operation: &str,
    ) -> Result<T> {
        let mut conn = self.connection().await?;
        self.bounded(operation, invocation.invoke_async::<T>(&mut conn))
            .await
    }

    /// Round-trip a `PING`
    pub async fn ping(&self) -> Result<()> {
        let reply: String = self.query(&redis::cmd("PING"), "PING").await?;
        if reply == "PONG" {
            Ok(())
        } else {
            Err(Error::infrastructure(format!(
                "Unexpected PING reply from Redis: {reply}"
            )))
        }
    }

    async fn bounded<T>(
        &self,
        operation: &str,
        fut: impl Future<Output = redis::RedisResult<T>>,
    ) -> Result<T> {
        let outcome = match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(e)) => self.classify(operation, e),
            Err(_) => Error::backend_unavailable(format!(
                "Redis {operation} timed out after {:?}",
                self.timeout
            )),
        };

        if outcome.is_backend_unavailable() {
            self.reset().await;
        }
        Err(outcome)
    }

    fn classify(&self, operation: &str, e: RedisError) -> Error {
        if e.is_io_error()
            || e.is_timeout()
            || e.is_connection_refusal()
            || e.is_connection_dropped()
        {
            Error::backend_unavailable_with_source(
                format!("Redis {operation} failed at {}: {e}", self.address),
                e,
            )
        } else {
            Error::infrastructure_with_source(format!("Redis {operation} failed: {e}"), e)
        }
    }
}

impl std::fmt::Debug for RedisConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisConnection")
            .field("address", &self.address)
            .field("timeout", &self.timeout)
            .finish()
    }
}
