//! # Infrastructure Layer
//!
//! Cross-cutting concerns and the composition root:
//!
//! - [`config`]: figment loader (defaults, TOML file, `OGS_` environment)
//! - [`logging`]: tracing subscriber setup
//! - [`health`]: component health checks behind `ogs check`
//! - [`bootstrap`]: [`AppContext`](bootstrap::AppContext), which wires
//!   providers into the application use cases
//! - [`error_ext`]: context helpers for foreign errors

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod health;
pub mod logging;

pub use bootstrap::AppContext;
pub use error_ext::ErrorContext;
