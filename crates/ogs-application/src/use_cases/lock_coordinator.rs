//! Lock Coordinator Use Case
//!
//! Single entry point for mutual exclusion. Tries the remote store first and
//! falls back to the file lock only when the remote store cannot be reached.
//!
//! ```text
//! acquire ──► remote.try_acquire ──► true  ──► Acquired(Remote)
//!                     │           └─► false ──► Busy
//!                     └─ BackendUnavailable ──► file.try_acquire
//!                                                 ├─ true  ──► Acquired(File)
//!                                                 └─ false ──► Busy
//! ```
//!
//! Release always goes to the backend recorded in the handle.

use futures::FutureExt;
use ogs_domain::error::{Error, Result};
use ogs_domain::ports::providers::LockProvider;
use ogs_domain::value_objects::{Guarded, LockBackend, LockHandle, LockOutcome};
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Host name used as the token prefix when the OS does not report one
const UNKNOWN_HOST: &str = "unknown-host";

/// Generate a fresh ownership token: `<host>_<uuid>`
pub fn ownership_token() -> String {
    let host = hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| UNKNOWN_HOST.to_string());
    format!("{}_{}", host, uuid::Uuid::new_v4().simple())
}

/// Remote-first lock coordinator with file fallback
#[derive(Debug, Clone)]
pub struct LockCoordinator {
    remote: Option<Arc<dyn LockProvider>>,
    file: Arc<dyn LockProvider>,
}

impl LockCoordinator {
    /// Create a coordinator over a remote backend and its file fallback
    pub fn new(remote: Arc<dyn LockProvider>, file: Arc<dyn LockProvider>) -> Self {
        Self {
            remote: Some(remote),
            file,
        }
    }

    /// Create a coordinator that only uses the file lock
    pub fn file_only(file: Arc<dyn LockProvider>) -> Self {
        Self { remote: None, file }
    }

    /// Make one non-blocking attempt to acquire `name`
    ///
    /// Returns [`LockOutcome::Busy`] when the lock is held elsewhere. Errors
    /// are reserved for a failing file fallback or an unexpected remote
    /// failure that is not a connectivity problem.
    pub async fn acquire(&self, name: &str, ttl_secs: u64) -> Result<LockOutcome> {
        if ttl_secs == 0 {
            return Err(Error::invalid_argument("Lock TTL must be at least 1 second"));
        }
        let token = ownership_token();
        let ttl = Duration::from_secs(ttl_secs);

        let Some(remote) = &self.remote else {
            return self.acquire_file(name, token, ttl_secs).await;
        };

        match remote.try_acquire(name, &token, ttl).await {
            Ok(true) => {
                info!(lock = %name, token = %token, "Remote lock acquired");
                Ok(LockOutcome::Acquired(Self::handle(
                    name,
                    token,
                    LockBackend::Remote,
                    ttl_secs,
                )))
            }
            Ok(false) => {
                debug!(lock = %name, "Remote lock is held elsewhere");
                Ok(LockOutcome::Busy)
            }
            Err(e) if e.is_backend_unavailable() => {
                warn!(lock = %name, error = %e, "Remote lock store unavailable, using file lock");
                self.acquire_file(name, token, ttl_secs).await
            }
            Err(e) => Err(e),
        }
    }

    async fn acquire_file(&self, name: &str, token: String, ttl_secs: u64) -> Result<LockOutcome> {
        let acquired = self
            .file
            .try_acquire(name, &token, Duration::from_secs(ttl_secs))
            .await?;

        if acquired {
            info!(lock = %name, "File lock acquired");
            Ok(LockOutcome::Acquired(Self::handle(
                name,
                token,
                LockBackend::File,
                ttl_secs,
            )))
        } else {
            debug!(lock = %name, "File lock is held elsewhere");
            Ok(LockOutcome::Busy)
        }
    }

    /// Release a lock through the backend that granted it
    ///
    /// Returns `false` when the lock already expired or now belongs to
    /// someone else; that is not an error.
    pub async fn release(&self, handle: &LockHandle) -> Result<bool> {
        let provider = match handle.backend {
            LockBackend::Remote => self
                .remote
                .as_ref()
                .ok_or_else(|| Error::internal("Remote lock handle without a remote backend"))?,
            LockBackend::File => &self.file,
        };

        let released = provider.release(&handle.name, &handle.token).await?;
        if released {
            info!(lock = %handle.name, backend = %handle.backend, "Lock released");
        } else {
            debug!(
                lock = %handle.name,
                backend = %handle.backend,
                "Lock was already released or expired"
            );
        }
        Ok(released)
    }

    /// Run `work` while holding `name`
    ///
    /// Returns [`Guarded::Skipped`] without running `work` when the lock is
    /// busy. Release is attempted exactly once after `work` finishes, fails
    /// or panics. A failing `work` surfaces as [`Error::WorkFailure`].
    pub async fn with_lock<T, F, Fut>(
        &self,
        name: &str,
        ttl_secs: u64,
        work: F,
    ) -> Result<Guarded<T>>
    where
        F: FnOnce(LockHandle) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let handle = match self.acquire(name, ttl_secs).await? {
            LockOutcome::Acquired(handle) => handle,
            LockOutcome::Busy => return Ok(Guarded::Skipped),
        };

        let outcome = AssertUnwindSafe(work(handle.clone())).catch_unwind().await;

        // A failed release must not mask the work result; the TTL bounds the damage.
        if let Err(e) = self.release(&handle).await {
            warn!(lock = %handle.name, error = %e, "Failed to release lock");
        }

        match outcome {
            Ok(Ok(value)) => Ok(Guarded::Completed {
                value,
                backend: handle.backend,
            }),
            Ok(Err(e)) => Err(Error::work_failure(e)),
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }

    fn handle(name: &str, token: String, backend: LockBackend, ttl_secs: u64) -> LockHandle {
        LockHandle {
            name: name.to_string(),
            token,
            backend,
            ttl_secs,
            acquired_at: chrono::Utc::now(),
        }
    }
}
