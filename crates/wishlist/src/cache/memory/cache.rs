//! Process-local LRU cache.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::Mutex;

use wishlist_core::cache::{Cache, CacheError, Result};

#[derive(Debug)]
struct Slot {
    bytes: Vec<u8>,
    deadline: Option<Instant>,
}

impl Slot {
    fn live_at(&self, now: Instant) -> bool {
        self.deadline.is_none_or(|deadline| now < deadline)
    }
}

/// Bounded in-memory cache with per-key TTL.
///
/// Expired slots are dropped lazily when read. Once `max_entries` is reached
/// the least recently used key is evicted. Cloning shares the same storage.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    slots: Arc<Mutex<LruCache<String, Slot>>>,
}

impl MemoryCache {
    /// # Errors
    ///
    /// `CacheError::InvalidConfig` when `max_entries` is 0.
    pub fn new(max_entries: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(max_entries)
            .ok_or_else(|| CacheError::InvalidConfig("max_entries must be > 0".to_string()))?;

        Ok(Self {
            slots: Arc::new(Mutex::new(LruCache::new(capacity))),
        })
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        // A hit bumps recency, so reads mutate too.
        let mut slots = self.slots.lock().await;

        let live = slots.get(key).map(|slot| slot.live_at(Instant::now()));
        match live {
            Some(true) => Ok(slots.get(key).map(|slot| slot.bytes.clone())),
            Some(false) => {
                slots.pop(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let slot = Slot {
            bytes: value.to_vec(),
            deadline: ttl.map(|ttl| Instant::now() + ttl),
        };
        self.slots.lock().await.put(key.to_string(), slot);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.slots.lock().await.pop(key);
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
