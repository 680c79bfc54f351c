//! Infrastructure layer: concrete key-value drivers.
//!
//! Implements the [`crate::store::KvDriver`] contract:
//!
//! - [`RedisDriver`] - production Redis backend
//! - [`MemoryDriver`] - in-process backend for tests and local runs

mod memory_driver;
mod redis_driver;

pub use memory_driver::MemoryDriver;
pub use redis_driver::RedisDriver;
