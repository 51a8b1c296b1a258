//! Cached store decorator.
//!
//! Implements the cache-aside pattern over any `WishlistStore`:
//!
//! - **Reads**: Check cache first, on miss fetch from the store and populate cache
//! - **Writes**: Persist to the store, then invalidate affected keys
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! let store = Arc::new(SqliteRepository::new("wishlist.db").await?);
//! let cache = Arc::new(MemoryCache::new(10_000)?);
//!
//! let cached = CachedWishlistStore::new(store, cache, CacheTtls::default());
//! ```

mod store;

pub use store::CachedWishlistStore;
