//! Error Extension Tests

use ogs_domain::error::{Error, Result};
use ogs_infrastructure::ErrorContext;
use std::io;

#[test]
fn test_io_context() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");

    let result: Result<()> = Err(io_error).io_context("failed to read file");

    match result {
        Err(Error::Io { message, source }) => {
            assert!(message.contains("failed to read file"));
            assert!(message.contains("file not found"));
            assert!(source.is_some());
        }
        other => panic!("Expected Io error, got {other:?}"),
    }
}

#[test]
fn test_config_context() {
    let parse_error = "abc".parse::<u16>().unwrap_err();

    let result: Result<u16> = Err(parse_error).config_context("bad port");

    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_context_is_lazy() {
    let ok: std::result::Result<u8, io::Error> = Ok(1);
    let value = ok
        .with_context(|| -> String { panic!("context built for a success") })
        .unwrap();
    assert_eq!(value, 1);

    let err: std::result::Result<u8, io::Error> = Err(io::Error::other("boom"));
    let result = err.context("reading config");
    assert!(matches!(result, Err(Error::Infrastructure { .. })));
}
