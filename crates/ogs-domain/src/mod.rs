//! # Order Guard Service - Domain Layer
//!
//! Core types and boundary contracts shared by every other crate.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error taxonomy and `Result` alias |
//! | [`constants`] | Defaults inherited by configuration |
//! | [`value_objects`] | Lock handles, orders, statistics snapshots, job reports |
//! | [`ports`] | Provider and repository traits implemented by adapters |
//!
//! The domain has no knowledge of Redis, the filesystem or any database.
//! Adapters live in `ogs-providers`, wiring lives in `ogs-infrastructure`.

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
