//! In-memory lock provider
//!
//! Same semantics as the Redis provider (set-if-absent with TTL,
//! compare-and-delete release) within one process. Useful for tests and
//! single-process deployments.

use async_trait::async_trait;
use ogs_domain::error::{Error, Result};
use ogs_domain::ports::providers::LockProvider;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Token and expiry of one held lock
#[derive(Debug, Clone)]
struct Entry {
    token: String,
    expires_at: Instant,
}

/// Process-local TTL lock table
#[derive(Debug, Default)]
pub struct InMemoryLockProvider {
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemoryLockProvider {
    /// Create an empty lock table
    pub fn new() -> Self {
        Self::default()
    }

    /// Token currently holding `name`, if the lock is live
    pub fn holder(&self, name: &str) -> Option<String> {
        let entries = self.entries.lock().ok()?;
        entries
            .get(name)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.token.clone())
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Entry>>> {
        self.entries
            .lock()
            .map_err(|_| Error::internal("In-memory lock table poisoned"))
    }
}

#[async_trait]
impl LockProvider for InMemoryLockProvider {
    async fn try_acquire(&self, name: &str, token: &str, ttl: Duration) -> Result<bool> {
        let now = Instant::now();
        let mut entries = self.entries()?;

        if entries
            .get(name)
            .is_some_and(|entry| entry.expires_at > now)
        {
            return Ok(false);
        }

        entries.insert(
            name.to_string(),
            Entry {
                token: token.to_string(),
                expires_at: now + ttl,
            },
        );
        Ok(true)
    }

    async fn release(&self, name: &str, token: &str) -> Result<bool> {
        let now = Instant::now();
        let mut entries = self.entries()?;

        match entries.get(name) {
            Some(entry) if entry.token == token && entry.expires_at > now => {
                entries.remove(name);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}
