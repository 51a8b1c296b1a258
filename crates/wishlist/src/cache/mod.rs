//! Cache backend implementations.
//!
//! This module provides concrete implementations of the [`Cache`] trait
//! defined in `wishlist_core::cache`. The server's backend is selected at
//! compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `memory` (default): In-process LRU cache with lazy TTL expiry
//! - `redis`: Redis cache using the redis crate
//!
//! These features are mutually exclusive. The in-memory cache is always
//! compiled because tests run against it.
//!
//! [`Cache`]: wishlist_core::cache::Cache

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "memory", feature = "redis"))]
compile_error!(
    "Features 'memory' and 'redis' are mutually exclusive. \
    Enable only one cache backend at a time."
);

#[cfg(not(any(feature = "memory", feature = "redis")))]
compile_error!(
    "No cache backend selected. Enable 'memory' or 'redis' feature. \
    Example: cargo build -p wishlist --no-default-features --features sqlite,redis"
);

#[cfg_attr(not(feature = "memory"), allow(dead_code))]
pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;

#[cfg_attr(not(feature = "memory"), allow(unused_imports))]
pub use memory::MemoryCache;

#[cfg(feature = "redis")]
pub use redis_impl::RedisCache;
