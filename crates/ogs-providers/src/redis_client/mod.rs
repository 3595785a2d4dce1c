//! Redis client shared by the lock and cache providers

pub mod connection;

pub use connection::RedisConnection;
