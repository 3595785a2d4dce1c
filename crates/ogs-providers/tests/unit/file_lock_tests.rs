//! File Lock Provider Tests

use ogs_domain::ports::providers::LockProvider;
use ogs_providers::lock::FileLockProvider;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const TTL: Duration = Duration::from_secs(60);

#[tokio::test]
async fn test_acquire_creates_lock_file_with_timestamp() {
    let dir = TempDir::new().unwrap();
    let provider = FileLockProvider::new(dir.path().join("locks"));

    let before = chrono::Utc::now().timestamp();
    assert!(provider.try_acquire("job", "token-a", TTL).await.unwrap());

    let path = provider.lock_path("job");
    let body = std::fs::read_to_string(&path).unwrap();
    let stamp: i64 = body.trim().parse().unwrap();
    assert!(stamp >= before);
    assert!(stamp <= chrono::Utc::now().timestamp());
}

#[tokio::test]
async fn test_second_acquire_is_busy() {
    let dir = TempDir::new().unwrap();
    let provider = FileLockProvider::new(dir.path());

    assert!(provider.try_acquire("job", "token-a", TTL).await.unwrap());
    assert!(!provider.try_acquire("job", "token-b", TTL).await.unwrap());
}

#[tokio::test]
async fn test_separate_providers_exclude_each_other() {
    let dir = TempDir::new().unwrap();
    let first = FileLockProvider::new(dir.path());
    let second = FileLockProvider::new(dir.path());

    assert!(first.try_acquire("job", "token-a", TTL).await.unwrap());
    assert!(!second.try_acquire("job", "token-b", TTL).await.unwrap());

    assert!(first.release("job", "token-a").await.unwrap());
    assert!(second.try_acquire("job", "token-b", TTL).await.unwrap());
}

#[tokio::test]
async fn test_release_removes_file_and_allows_reacquire() {
    let dir = TempDir::new().unwrap();
    let provider = FileLockProvider::new(dir.path());

    assert!(provider.try_acquire("job", "token-a", TTL).await.unwrap());
    assert!(provider.release("job", "token-a").await.unwrap());
    assert!(!provider.lock_path("job").exists());

    assert!(provider.try_acquire("job", "token-b", TTL).await.unwrap());
}

#[tokio::test]
async fn test_release_with_unknown_token_returns_false() {
    let dir = TempDir::new().unwrap();
    let provider = FileLockProvider::new(dir.path());

    assert!(provider.try_acquire("job", "token-a", TTL).await.unwrap());
    assert!(!provider.release("job", "token-b").await.unwrap());
    assert!(provider.lock_path("job").exists());
}

#[tokio::test]
async fn test_double_release_returns_false() {
    let dir = TempDir::new().unwrap();
    let provider = FileLockProvider::new(dir.path());

    assert!(provider.try_acquire("job", "token-a", TTL).await.unwrap());
    assert!(provider.release("job", "token-a").await.unwrap());
    assert!(!provider.release("job", "token-a").await.unwrap());
}

#[tokio::test]
async fn test_stale_lock_file_is_acquirable() {
    let dir = TempDir::new().unwrap();
    let provider = FileLockProvider::new(dir.path());
    std::fs::write(provider.lock_path("job"), "1700000000").unwrap();

    assert!(provider.try_acquire("job", "token-a", TTL).await.unwrap());
    let body = std::fs::read_to_string(provider.lock_path("job")).unwrap();
    assert_ne!(body, "1700000000");
}

#[tokio::test]
async fn test_invalid_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    let provider = FileLockProvider::new(dir.path());

    assert!(provider.try_acquire("../job", "token-a", TTL).await.is_err());
}

#[cfg(unix)]
#[tokio::test]
async fn test_unwritable_directory_is_a_lock_file_error() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let locked_dir = dir.path().join("ro");
    std::fs::create_dir(&locked_dir).unwrap();
    std::fs::set_permissions(&locked_dir, std::fs::Permissions::from_mode(0o500)).unwrap();

    // Root ignores directory permissions; nothing to assert then.
    if std::fs::write(locked_dir.join("marker"), "x").is_ok() {
        return;
    }

    let provider = FileLockProvider::new(&locked_dir);
    let err = provider.try_acquire("job", "token-a", TTL).await.unwrap_err();
    assert!(matches!(err, ogs_domain::Error::LockFile { .. }));
}

#[cfg(unix)]
#[tokio::test]
async fn test_created_directories_are_not_group_or_world_writable() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("var").join("locks");
    let provider = FileLockProvider::new(&nested);

    assert!(provider.try_acquire("job", "token-a", TTL).await.unwrap());

    for created in [dir.path().join("var"), nested] {
        let mode = std::fs::metadata(&created).unwrap().permissions().mode();
        assert_eq!(mode & 0o700, 0o700, "{}", created.display());
        assert_eq!(mode & 0o022, 0, "{}", created.display());
    }
}

#[tokio::test]
async fn test_racing_acquires_yield_one_winner() {
    let dir = TempDir::new().unwrap();
    let provider = Arc::new(FileLockProvider::new(dir.path()));

    let attempts = (0..8).map(|i| {
        let provider = Arc::clone(&provider);
        tokio::spawn(async move {
            provider
                .try_acquire("job", &format!("token-{i}"), TTL)
                .await
                .unwrap()
        })
    });

    let mut acquired = 0;
    for attempt in attempts {
        if attempt.await.unwrap() {
            acquired += 1;
        }
    }
    assert_eq!(acquired, 1);
}

#[tokio::test]
async fn test_provider_name() {
    let provider = FileLockProvider::new(std::env::temp_dir());
    assert_eq!(provider.provider_name(), "file");
}
