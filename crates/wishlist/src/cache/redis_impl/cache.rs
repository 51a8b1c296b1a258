//! Redis cache implementation.
//!
//! Every operation is bounded by a timeout so a slow or unreachable Redis
//! degrades to cache misses instead of stalling requests.

use std::future::Future;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tokio::sync::Mutex;

use wishlist_core::cache::{Cache, CacheError, Result};

use super::error::map_redis_error;

/// Minimum wait between connection attempts after one fails.
const RECONNECT_BACKOFF: Duration = Duration::from_secs(5);

#[derive(Default)]
struct Link {
    conn: Option<ConnectionManager>,
    failed_at: Option<Instant>,
}

/// Redis cache backend using a lazily created connection manager.
///
/// The lock only guards the shared handle; connecting happens outside it, so
/// concurrent callers never queue behind a slow attempt. After a failed
/// attempt, calls fail immediately until [`RECONNECT_BACKOFF`] has passed.
pub struct RedisCache {
    client: redis::Client,
    link: Mutex<Link>,
    timeout: Duration,
}

impl RedisCache {
    /// Creates a Redis cache for `url` without connecting.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    /// * `timeout` - Upper bound for connecting and for each command
    ///
    /// # Errors
    ///
    /// Returns `CacheError::InvalidConfig` if the URL cannot be parsed.
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let client =
            redis::Client::open(url).map_err(|e| CacheError::InvalidConfig(e.to_string()))?;
        Ok(Self {
            client,
            link: Mutex::new(Link::default()),
            timeout,
        })
    }

    /// Returns a handle to the shared connection, connecting on first use.
    async fn connection(&self) -> Result<ConnectionManager> {
        {
            let link = self.link.lock().await;
            if let Some(conn) = link.conn.as_ref() {
                return Ok(conn.clone());
            }
            if let Some(failed_at) = link.failed_at {
                if failed_at.elapsed() < RECONNECT_BACKOFF {
                    return Err(CacheError::ConnectionFailed(
                        "redis unreachable, waiting before reconnecting".to_string(),
                    ));
                }
            }
        }

        let attempt = self
            .bounded(async {
                ConnectionManager::new(self.client.clone())
                    .await
                    .map_err(map_redis_error)
            })
            .await;

        let mut link = self.link.lock().await;
        match attempt {
            Ok(conn) => {
                // A concurrent attempt may have won; keep the first handle.
                let conn = link.conn.get_or_insert(conn).clone();
                if link.failed_at.take().is_some() {
                    tracing::info!("Reconnected to Redis");
                } else {
                    tracing::debug!("Connected to Redis");
                }
                Ok(conn)
            }
            Err(err) => {
                link.failed_at = Some(Instant::now());
                tracing::warn!(error = %err, "Redis connection attempt failed");
                Err(err)
            }
        }
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| CacheError::Timeout(self.timeout.as_millis() as u64))?
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.connection().await?;
        self.bounded(async move {
            conn.get::<_, Option<Vec<u8>>>(key)
                .await
                .map_err(map_redis_error)
        })
        .await
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.connection().await?;

        self.bounded(async move {
            match ttl {
                Some(duration) => {
                    let seconds = duration.as_secs().max(1);
                    conn.set_ex::<_, _, ()>(key, value, seconds)
                        .await
                        .map_err(map_redis_error)
                }
                None => conn
                    .set::<_, _, ()>(key, value)
                    .await
                    .map_err(map_redis_error),
            }
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.connection().await?;
        self.bounded(async move { conn.del::<_, ()>(key).await.map_err(map_redis_error) })
            .await
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        self.bounded(async move {
            let _: String = redis::cmd("PING")
                .query_async(&mut conn)
                .await
                .map_err(map_redis_error)?;
            Ok(())
        })
        .await
    }
}
