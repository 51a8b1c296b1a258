//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. The store and cache backends are chosen via feature
//! flags; handlers only see trait objects.

use std::sync::Arc;

use axum::extract::FromRef;

use wishlist_auth::AuthState;
use wishlist_core::cache::Cache;
use wishlist_core::storage::WishlistStore;

use crate::config::Config;
use crate::storage::CachedWishlistStore;

/// Shared application state.
///
/// This is cloned for each request handler and contains shared resources.
#[derive(Clone)]
pub struct AppState {
    /// Store wrapped in the cache-aside decorator.
    pub store: Arc<dyn WishlistStore>,
    /// Raw cache handle, used for health probes.
    pub cache: Arc<dyn Cache>,
    /// Registration, login, and bearer-token verification.
    pub auth: AuthState,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl AppState {
    /// Wires a store and a cache into the decorated store and auth state.
    pub(crate) fn build<S, C>(store: Arc<S>, cache: Arc<C>, config: &Config) -> Self
    where
        S: WishlistStore + 'static,
        C: Cache + 'static,
    {
        let cached = Arc::new(CachedWishlistStore::new(
            store,
            Arc::clone(&cache),
            config.cache_ttls,
        ));
        let auth = AuthState::new(cached.clone(), config.auth.clone());

        Self {
            store: cached,
            cache,
            auth,
        }
    }
}

// ============================================================================
// Feature-specific constructors
// ============================================================================

#[cfg(all(feature = "sqlite", feature = "memory"))]
mod sqlite_memory {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and in-memory cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let memory_cache = Arc::new(MemoryCache::new(config.cache_max_entries)?);

            tracing::info!(
                path = %config.sqlite_path,
                max_entries = config.cache_max_entries,
                "Using SQLite storage with in-memory cache"
            );

            Ok(Self::build(sqlite_repo, memory_cache, config))
        }
    }
}

#[cfg(all(feature = "sqlite", feature = "redis"))]
mod sqlite_redis {
    use super::*;
    use crate::cache::RedisCache;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and Redis cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let redis_cache = Arc::new(RedisCache::new(&config.redis_url, config.cache_timeout())?);

            tracing::info!(
                path = %config.sqlite_path,
                redis_url = %config.redis_url,
                "Using SQLite storage with Redis cache"
            );

            Ok(Self::build(sqlite_repo, redis_cache, config))
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "memory"))]
mod inmemory_memory {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and in-memory cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repo = Arc::new(InMemoryRepository::new());
            let memory_cache = Arc::new(MemoryCache::new(config.cache_max_entries)?);

            tracing::warn!("Using in-memory storage, data is lost on restart");

            Ok(Self::build(repo, memory_cache, config))
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "redis"))]
mod inmemory_redis {
    use super::*;
    use crate::cache::RedisCache;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and Redis cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repo = Arc::new(InMemoryRepository::new());
            let redis_cache = Arc::new(RedisCache::new(&config.redis_url, config.cache_timeout())?);

            tracing::warn!(
                redis_url = %config.redis_url,
                "Using in-memory storage with Redis cache, data is lost on restart"
            );

            Ok(Self::build(repo, redis_cache, config))
        }
    }
}

// ============================================================================
// Test support - provides Default implementation for unit tests
// ============================================================================

#[cfg(test)]
mod test_support {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::storage::InMemoryRepository;

    impl Default for AppState {
        /// Creates an AppState with in-memory storage and cache for testing.
        ///
        /// Uses a cheap bcrypt cost and a fixed JWT secret.
        fn default() -> Self {
            let config = Config::for_tests();
            let cache = MemoryCache::new(1_000).expect("cache capacity is non-zero");
            Self::build(Arc::new(InMemoryRepository::new()), Arc::new(cache), &config)
        }
    }
}
