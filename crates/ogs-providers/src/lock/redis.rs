//! Redis distributed lock provider
//!
//! Acquire is one atomic `SET name token NX EX ttl`. Release is one
//! server-side compare-and-delete script, so a holder whose lock expired can
//! never delete a lock that now belongs to someone else.

use crate::constants::COMPARE_AND_DELETE_SCRIPT;
use crate::redis_client::RedisConnection;
use async_trait::async_trait;
use ogs_domain::error::Result;
use ogs_domain::ports::providers::LockProvider;
use redis::Script;
use std::sync::Arc;
use std::time::Duration;

/// Redis lock provider
pub struct RedisLockProvider {
    connection: Arc<RedisConnection>,
    release_script: Script,
}

impl RedisLockProvider {
    /// Create a lock provider over a shared connection
    pub fn new(connection: Arc<RedisConnection>) -> Self {
        Self {
            connection,
            release_script: Script::new(COMPARE_AND_DELETE_SCRIPT),
        }
    }
}

#[async_trait]
impl LockProvider for RedisLockProvider {
    async fn try_acquire(&self, name: &str, token: &str, ttl: Duration) -> Result<bool> {
        // EX takes whole seconds; never send 0, Redis rejects it.
        let ttl_secs = ttl.as_secs().max(1);

        let mut cmd = redis::cmd("SET");
        cmd.arg(name).arg(token).arg("NX").arg("EX").arg(ttl_secs);

        let reply: Option<String> = self.connection.query(&cmd, "SET NX").await?;
        Ok(reply.is_some())
    }

    async fn release(&self, name: &str, token: &str) -> Result<bool> {
        let mut invocation = self.release_script.key(name);
        invocation.arg(token);

        let deleted: i64 = self.connection.invoke(&invocation, "EVAL").await?;
        Ok(deleted == 1)
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisLockProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisLockProvider")
            .field("server", &self.connection.address())
            .finish()
    }
}
