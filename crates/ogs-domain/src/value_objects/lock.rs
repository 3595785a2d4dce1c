//! Lock value objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend that granted a lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockBackend {
    /// Remote key-value store (Redis)
    Remote,
    /// Local advisory file lock
    File,
}

impl fmt::Display for LockBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => write!(f, "remote"),
            Self::File => write!(f, "file"),
        }
    }
}

/// Proof of a successful acquisition
///
/// Release is routed by `backend`, never re-decided at release time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockHandle {
    /// Lock name
    pub name: String,
    /// Ownership token stored with the lock
    pub token: String,
    /// Backend that granted the lock
    pub backend: LockBackend,
    /// Requested time-to-live in seconds
    pub ttl_secs: u64,
    /// Acquisition time
    pub acquired_at: DateTime<Utc>,
}

/// Result of a single non-blocking acquisition attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockOutcome {
    /// The lock was granted
    Acquired(LockHandle),
    /// The lock is currently held elsewhere
    Busy,
}

impl LockOutcome {
    /// Whether the lock was granted
    pub fn is_acquired(&self) -> bool {
        matches!(self, Self::Acquired(_))
    }

    /// Whether the lock is held elsewhere
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy)
    }

    /// Consume the outcome, returning the handle if acquired
    pub fn into_handle(self) -> Option<LockHandle> {
        match self {
            Self::Acquired(handle) => Some(handle),
            Self::Busy => None,
        }
    }
}

/// Result of running work under a lock
#[derive(Debug, Clone, PartialEq)]
pub enum Guarded<T> {
    /// The work ran while holding the lock
    Completed {
        /// Value produced by the work
        value: T,
        /// Backend that guarded the run
        backend: LockBackend,
    },
    /// The lock was busy and the work did not run
    Skipped,
}

impl<T> Guarded<T> {
    /// Whether the work was skipped
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }
}
