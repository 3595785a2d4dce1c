//! File lock provider
//!
//! Cross-process exclusion on one host using an advisory lock (`fs2`) on
//! `<directory>/<name>.lock`. The lock is held by the open descriptor, so a
//! crashed holder releases it when the OS closes the file; a stale file left
//! behind stays lockable.
//!
//! The file body is the decimal Unix timestamp of acquisition. It is written
//! for operators only and never read back.
//!
//! The TTL is not enforced: a file lock lives until release or process exit.

#[cfg(unix)]
use crate::constants::LOCK_DIRECTORY_MODE;
use crate::constants::LOCK_FILE_OPEN_ATTEMPTS;
use async_trait::async_trait;
use fs2::FileExt;
use ogs_domain::constants::LOCK_FILE_EXTENSION;
use ogs_domain::error::{Error, Result};
use ogs_domain::ports::providers::LockProvider;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, warn};

/// A lock held by this process
struct HeldLock {
    name: String,
    path: PathBuf,
    file: File,
}

/// Advisory file lock provider
pub struct FileLockProvider {
    directory: PathBuf,
    held: Mutex<HashMap<String, HeldLock>>,
}

impl FileLockProvider {
    /// Create a provider storing lock files under `directory`
    ///
    /// The directory is created on first acquire.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            held: Mutex::new(HashMap::new()),
        }
    }

    /// Path of the lock file for `name`
    pub fn lock_path(&self, name: &str) -> PathBuf {
        self.directory.join(format!("{name}.{LOCK_FILE_EXTENSION}"))
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(Error::invalid_argument(format!(
                "Invalid lock name for a lock file: {name:?}"
            )));
        }
        Ok(())
    }

    /// Open the lock file and try to lock it without blocking
    ///
    /// Returns `None` when another descriptor holds the lock.
    fn try_lock_file(path: &Path) -> Result<Option<File>> {
        for _ in 0..LOCK_FILE_OPEN_ATTEMPTS {
            let file = OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(false)
                .open(path)
                .map_err(|e| {
                    Error::lock_file_with_source(
                        format!("Failed to open lock file {}", path.display()),
                        e,
                    )
                })?;

            match file.try_lock_exclusive() {
                Ok(()) => {}
                Err(e) if e.kind() == fs2::lock_contended_error().kind() => return Ok(None),
                Err(e) => {
                    return Err(Error::lock_file_with_source(
                        format!("Failed to lock {}", path.display()),
                        e,
                    ));
                }
            }

            // The previous holder may have unlinked the file between our open
            // and our lock; a lock on an orphaned inode excludes nobody.
            if Self::still_linked(path, &file).map_err(|e| {
                Error::lock_file_with_source(format!("Failed to stat {}", path.display()), e)
            })? {
                return Ok(Some(file));
            }

            debug!(path = %path.display(), "Lock file replaced while locking, retrying");
            let _ = FileExt::unlock(&file);
        }

        Ok(None)
    }

    #[cfg(unix)]
    fn still_linked(path: &Path, file: &File) -> io::Result<bool> {
        use std::os::unix::fs::MetadataExt;

        let on_disk = match fs::metadata(path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        };
        let held = file.metadata()?;
        Ok(on_disk.dev() == held.dev() && on_disk.ino() == held.ino())
    }

    #[cfg(not(unix))]
    fn still_linked(path: &Path, _file: &File) -> io::Result<bool> {
        Ok(path.exists())
    }

    #[cfg(unix)]
    fn create_directory(&self) -> io::Result<()> {
        use std::os::unix::fs::DirBuilderExt;

        fs::DirBuilder::new()
            .recursive(true)
            .mode(LOCK_DIRECTORY_MODE)
            .create(&self.directory)
    }

    #[cfg(not(unix))]
    fn create_directory(&self) -> io::Result<()> {
        fs::create_dir_all(&self.directory)
    }

    fn write_timestamp(file: &mut File) -> io::Result<()> {
        file.set_len(0)?;
        write!(file, "{}", chrono::Utc::now().timestamp())?;
        file.flush()
    }

    fn held(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, HeldLock>>> {
        self.held
            .lock()
            .map_err(|_| Error::internal("File lock registry poisoned"))
    }
}

#[async_trait]
impl LockProvider for FileLockProvider {
    async fn try_acquire(&self, name: &str, token: &str, _ttl: Duration) -> Result<bool> {
        Self::validate_name(name)?;

        self.create_directory().map_err(|e| {
            Error::lock_file_with_source(
                format!("Failed to create lock directory {}", self.directory.display()),
                e,
            )
        })?;

        let path = self.lock_path(name);
        let Some(mut file) = Self::try_lock_file(&path)? else {
            debug!(lock = %name, path = %path.display(), "Lock file held by another descriptor");
            return Ok(false);
        };

        if let Err(e) = Self::write_timestamp(&mut file) {
            warn!(path = %path.display(), error = %e, "Failed to write lock timestamp");
        }

        self.held()?.insert(
            token.to_string(),
            HeldLock {
                name: name.to_string(),
                path,
                file,
            },
        );
        Ok(true)
    }

    async fn release(&self, name: &str, token: &str) -> Result<bool> {
        let held = {
            let mut registry = self.held()?;
            match registry.get(token) {
                Some(lock) if lock.name == name => registry.remove(token),
                _ => None,
            }
        };
        let Some(lock) = held else {
            return Ok(false);
        };

        // Unlink while still locked so nobody can lock the doomed inode.
        if let Err(e) = fs::remove_file(&lock.path) {
            warn!(path = %lock.path.display(), error = %e, "Failed to remove lock file");
        }
        if let Err(e) = FileExt::unlock(&lock.file) {
            warn!(path = %lock.path.display(), error = %e, "Failed to unlock lock file");
        }
        Ok(true)
    }

    fn provider_name(&self) -> &str {
        "file"
    }
}

impl std::fmt::Debug for FileLockProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileLockProvider")
            .field("directory", &self.directory)
            .finish()
    }
}
