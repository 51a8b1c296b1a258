//! Redis cache backend implementation.
//!
//! Provides a shared cache for multi-instance deployments. The connection is
//! established lazily so the server starts even when Redis is down.

mod cache;
mod error;

pub use cache::RedisCache;
