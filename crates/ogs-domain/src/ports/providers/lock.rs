//! Lock Provider Port
//!
//! Contract shared by the remote (Redis) and file lock backends. The lock
//! coordinator owns token generation and backend selection; a provider only
//! knows how to atomically claim and release one name.

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Mutual exclusion backend
///
/// # Implementations
///
/// - **Redis**: `SET NX EX` to claim, Lua compare-and-delete to release
/// - **File**: non-blocking advisory lock on `<dir>/<name>.lock`
/// - **InMemory**: process-local store with the same TTL semantics
///
/// # Errors
///
/// Providers backed by a remote store must report connectivity failures as
/// [`Error::BackendUnavailable`](crate::error::Error::BackendUnavailable) so
/// the coordinator can fall back. "Already held" is `Ok(false)`, never an error.
#[async_trait]
pub trait LockProvider: Send + Sync + std::fmt::Debug {
    /// Claim `name` for `token` if nobody holds it
    ///
    /// # Returns
    /// `true` if claimed, `false` if currently held elsewhere
    async fn try_acquire(&self, name: &str, token: &str, ttl: Duration) -> Result<bool>;

    /// Release `name` only if it is still held by `token`
    ///
    /// # Returns
    /// `true` if released, `false` if the token no longer matches or the
    /// lock is already gone
    async fn release(&self, name: &str, token: &str) -> Result<bool>;

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}
