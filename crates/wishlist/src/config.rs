use std::{env, time::Duration};

use wishlist_auth::AuthConfig;
use wishlist_core::cache::CacheTtls;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "wishlist.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[cfg_attr(not(feature = "sqlite"), allow(dead_code))]
    pub sqlite_path: String,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    #[cfg_attr(not(feature = "redis"), allow(dead_code))]
    pub redis_url: String,
    /// Maximum number of in-memory cache entries (default: 10,000)
    #[cfg_attr(not(feature = "memory"), allow(dead_code))]
    pub cache_max_entries: usize,
    /// Per-operation Redis timeout in milliseconds (default: 500)
    #[cfg_attr(not(feature = "redis"), allow(dead_code))]
    pub cache_timeout_ms: u64,
    /// Lifetimes of the cached views.
    pub cache_ttls: CacheTtls,
    /// Origins allowed by CORS (default: "http://localhost:5173")
    pub allowed_origins: Vec<String>,
    /// Password hashing and token settings.
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SQLITE_PATH` - SQLite database path (default: "wishlist.db")
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    /// - `CACHE_MAX_ENTRIES` - Maximum in-memory cache entries (default: 10,000)
    /// - `CACHE_TIMEOUT_MS` - Redis operation timeout (default: 500)
    /// - `CACHE_TTL_ALL_WISHLISTS` - seconds (default: 300)
    /// - `CACHE_TTL_USER_WISHLISTS` - seconds (default: 300)
    /// - `CACHE_TTL_WISHLIST_ITEMS` - seconds (default: 180)
    /// - `CACHE_TTL_ITEM_STATUSES` - seconds (default: 120)
    /// - `ALLOWED_ORIGINS` - comma-separated CORS origins (default: "http://localhost:5173")
    ///
    /// Auth settings are read by [`AuthConfig::from_env`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok(), AuthConfig::from_env())
    }

    /// Builds the configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>, auth: AuthConfig) -> Self {
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());
        let seconds = |key: &str, default: Duration| {
            parsed(key).map(Duration::from_secs).unwrap_or(default)
        };
        let ttl_defaults = CacheTtls::default();

        Self {
            sqlite_path: lookup("SQLITE_PATH").unwrap_or_else(|| "wishlist.db".to_string()),
            redis_url: lookup("REDIS_URL")
                .unwrap_or_else(|| "redis://localhost:6379".to_string()),
            cache_max_entries: lookup("CACHE_MAX_ENTRIES")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(10_000),
            cache_timeout_ms: parsed("CACHE_TIMEOUT_MS").unwrap_or(500),
            cache_ttls: CacheTtls {
                all_wishlists: seconds("CACHE_TTL_ALL_WISHLISTS", ttl_defaults.all_wishlists),
                user_wishlists: seconds("CACHE_TTL_USER_WISHLISTS", ttl_defaults.user_wishlists),
                wishlist_items: seconds("CACHE_TTL_WISHLIST_ITEMS", ttl_defaults.wishlist_items),
                item_statuses: seconds("CACHE_TTL_ITEM_STATUSES", ttl_defaults.item_statuses),
            },
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_else(|| vec!["http://localhost:5173".to_string()]),
            auth,
        }
    }

    /// Defaults only, ignoring the environment.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::from_lookup(|_| None, AuthConfig::for_tests())
    }

    /// Get the Redis operation timeout as a Duration.
    #[cfg_attr(not(feature = "redis"), allow(dead_code))]
    pub fn cache_timeout(&self) -> Duration {
        Duration::from_millis(self.cache_timeout_ms)
    }
}

/// Splits a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
