//! Unit tests for domain error types

use ogs_domain::Error;

#[test]
fn test_not_found_error() {
    let error = Error::not_found("product");
    match error {
        Error::NotFound { resource } => assert_eq!(resource, "product"),
        _ => panic!("Expected NotFound error"),
    }
}

#[test]
fn test_invalid_argument_error() {
    let error = Error::invalid_argument("Parameter N must be greater than 0");
    match error {
        Error::InvalidArgument { message } => {
            assert_eq!(message, "Parameter N must be greater than 0")
        }
        _ => panic!("Expected InvalidArgument error"),
    }
}

#[test]
fn test_backend_unavailable_is_detected() {
    let error = Error::backend_unavailable("connection refused");
    assert!(error.is_backend_unavailable());
    assert!(!Error::lock_file("denied").is_backend_unavailable());
    assert!(!Error::cache("miss").is_backend_unavailable());
}

#[test]
fn test_lock_file_error_keeps_source() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
    let error = Error::lock_file_with_source("Failed to open lock file", io);
    match &error {
        Error::LockFile { message, source } => {
            assert_eq!(message, "Failed to open lock file");
            assert!(source.is_some());
        }
        _ => panic!("Expected LockFile error"),
    }
    assert!(error.to_string().contains("Lock file error"));
}

#[test]
fn test_work_failure_wraps_source_message() {
    let error = Error::work_failure(Error::not_found("active product"));
    match error {
        Error::WorkFailure { message, source } => {
            assert!(message.contains("active product"));
            assert!(source.is_some());
        }
        _ => panic!("Expected WorkFailure error"),
    }
}

#[test]
fn test_work_failure_is_not_double_wrapped() {
    let error = Error::work_failure(Error::work_failure_msg("boom"));
    match error {
        Error::WorkFailure { message, source } => {
            assert_eq!(message, "boom");
            assert!(source.is_none());
        }
        _ => panic!("Expected WorkFailure error"),
    }
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let error: Error = io.into();
    assert!(matches!(error, Error::IoSimple { .. }));
}
