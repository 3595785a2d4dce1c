//! Order Store Implementations
//!
//! The production schema (categories, products, orders) lives in an
//! external relational database. [`InMemoryOrderStore`] implements the same
//! ports over a seeded catalogue, optionally persisted to a JSON file so
//! separate processes share their orders.

pub mod memory;

pub use memory::{InMemoryOrderStore, default_catalogue};
