//! Cached store decorator.
//!
//! Wraps a `WishlistStore` with cache-aside reads for the four cached views
//! and evicts the affected keys after every committed write.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use wishlist_core::cache::{
    all_wishlists_key, item_statuses_key, keys_to_invalidate, serialization, user_wishlists_key,
    wishlist_items_key, Cache, CacheTtls, Mutation,
};
use wishlist_core::storage::{
    ItemRepository, RepositoryError, Result, StatusLedger, UserRepository, WishListRepository,
    WishlistStore,
};
use wishlist_core::wishlist::{
    ItemState, ItemView, StatusEntry, StatusRecord, User, WishItem, WishList, WishListDetail,
    WishListView,
};

/// Cached store decorator.
///
/// - **Reads** of list views, item views and status histories check the
///   cache first; on a miss they load from the store and populate the cache.
/// - **Writes** commit to the store, then evict the keys planned by
///   [`keys_to_invalidate`].
///
/// Cache errors are logged and treated as misses; they never fail a call.
///
/// # Type Parameters
///
/// * `R` - The underlying store
/// * `C` - The cache implementation
pub struct CachedWishlistStore<R: ?Sized, C: ?Sized> {
    store: Arc<R>,
    cache: Arc<C>,
    ttls: CacheTtls,
}

impl<R, C> CachedWishlistStore<R, C>
where
    R: WishlistStore + ?Sized,
    C: Cache + ?Sized,
{
    pub fn new(store: Arc<R>, cache: Arc<C>, ttls: CacheTtls) -> Self {
        Self { store, cache, ttls }
    }

    /// Cache-aside read of `key`, falling back to `load` on a miss.
    async fn read_through<T, F, Fut>(&self, key: String, ttl: Duration, load: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send,
    {
        match self.cache.get(&key).await {
            Ok(Some(bytes)) => match serialization::deserialize::<T>(&bytes) {
                Ok(value) => {
                    tracing::trace!(key = %key, "Cache hit");
                    return Ok(value);
                }
                // Deserialization failed - treat as cache miss
                Err(err) => tracing::warn!(key = %key, error = %err, "Cached value unreadable"),
            },
            Ok(None) => tracing::trace!(key = %key, "Cache miss"),
            Err(err) => tracing::warn!(key = %key, error = %err, "Cache read failed"),
        }

        let value = load().await?;

        match serialization::serialize(&value) {
            Ok(bytes) => {
                if let Err(err) = self.cache.set(&key, &bytes, Some(ttl)).await {
                    tracing::warn!(key = %key, error = %err, "Failed to populate cache");
                }
            }
            Err(err) => tracing::warn!(key = %key, error = %err, "Failed to serialize for cache"),
        }

        Ok(value)
    }

    /// Evicts every key the mutation may have made stale.
    async fn invalidate(&self, mutation: Mutation) {
        for key in keys_to_invalidate(&mutation) {
            if let Err(err) = self.cache.delete(&key).await {
                tracing::warn!(key = %key, error = %err, "Failed to invalidate cache key");
            }
        }
    }

    /// Owner of the list an item belongs to, for eviction of list views.
    async fn owner_of(&self, wishlist_id: Uuid) -> Result<Uuid> {
        self.store
            .get_wishlist(wishlist_id)
            .await?
            .map(|w| w.user_id)
            .ok_or_else(|| RepositoryError::not_found("WishList", wishlist_id))
    }
}

#[async_trait]
impl<R, C> UserRepository for CachedWishlistStore<R, C>
where
    R: WishlistStore + ?Sized + 'static,
    C: Cache + ?Sized + 'static,
{
    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        self.store.get_user(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.store.get_user_by_email(email).await
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        self.store.create_user(user).await
    }
}

#[async_trait]
impl<R, C> WishListRepository for CachedWishlistStore<R, C>
where
    R: WishlistStore + ?Sized + 'static,
    C: Cache + ?Sized + 'static,
{
    async fn create_wishlist(&self, wishlist: &WishList) -> Result<()> {
        self.store.create_wishlist(wishlist).await?;

        self.invalidate(Mutation::WishListCreated {
            owner_id: wishlist.user_id,
        })
        .await;

        tracing::debug!(wishlist_id = %wishlist.id, title = %wishlist.title, "Wish list created");
        Ok(())
    }

    async fn get_wishlist(&self, id: Uuid) -> Result<Option<WishList>> {
        self.store.get_wishlist(id).await
    }

    async fn get_wishlist_detail(&self, id: Uuid) -> Result<Option<WishListDetail>> {
        self.store.get_wishlist_detail(id).await
    }

    async fn list_wishlists(&self) -> Result<Vec<WishListView>> {
        self.read_through(all_wishlists_key(), self.ttls.all_wishlists, || {
            self.store.list_wishlists()
        })
        .await
    }

    async fn list_wishlists_by_owner(&self, user_id: Uuid) -> Result<Vec<WishListView>> {
        self.read_through(
            user_wishlists_key(user_id),
            self.ttls.user_wishlists,
            || self.store.list_wishlists_by_owner(user_id),
        )
        .await
    }

    async fn delete_wishlist(&self, id: Uuid) -> Result<Vec<Uuid>> {
        let owner_id = self.owner_of(id).await?;
        let item_ids = self.store.delete_wishlist(id).await?;

        self.invalidate(Mutation::WishListDeleted {
            owner_id,
            wishlist_id: id,
            item_ids: item_ids.clone(),
        })
        .await;

        tracing::debug!(wishlist_id = %id, items = item_ids.len(), "Wish list deleted");
        Ok(item_ids)
    }
}

#[async_trait]
impl<R, C> ItemRepository for CachedWishlistStore<R, C>
where
    R: WishlistStore + ?Sized + 'static,
    C: Cache + ?Sized + 'static,
{
    async fn add_item(&self, item: &WishItem) -> Result<()> {
        let owner_id = self.owner_of(item.wishlist_id).await?;
        self.store.add_item(item).await?;

        self.invalidate(Mutation::ItemAdded {
            owner_id,
            wishlist_id: item.wishlist_id,
        })
        .await;

        tracing::debug!(item_id = %item.id, wishlist_id = %item.wishlist_id, "Item added");
        Ok(())
    }

    async fn get_item(&self, id: Uuid) -> Result<Option<WishItem>> {
        self.store.get_item(id).await
    }

    async fn delete_item(&self, id: Uuid) -> Result<()> {
        let item = self
            .store
            .get_item(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("WishItem", id))?;
        let owner_id = self.owner_of(item.wishlist_id).await?;

        self.store.delete_item(id).await?;

        self.invalidate(Mutation::ItemDeleted {
            owner_id,
            wishlist_id: item.wishlist_id,
            item_id: id,
        })
        .await;

        tracing::debug!(item_id = %id, wishlist_id = %item.wishlist_id, "Item deleted");
        Ok(())
    }

    async fn list_items(&self, wishlist_id: Uuid) -> Result<Vec<ItemView>> {
        self.read_through(
            wishlist_items_key(wishlist_id),
            self.ttls.wishlist_items,
            || self.store.list_items(wishlist_id),
        )
        .await
    }
}

#[async_trait]
impl<R, C> StatusLedger for CachedWishlistStore<R, C>
where
    R: WishlistStore + ?Sized + 'static,
    C: Cache + ?Sized + 'static,
{
    async fn toggle(&self, item_id: Uuid, user_id: Uuid) -> Result<StatusRecord> {
        let item = self
            .store
            .get_item(item_id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("WishItem", item_id))?;

        let record = self.store.toggle(item_id, user_id).await?;

        self.invalidate(Mutation::ItemToggled {
            wishlist_id: item.wishlist_id,
            item_id,
        })
        .await;

        tracing::debug!(item_id = %item_id, user_id = %user_id, marked = record.marked, "Item toggled");
        Ok(record)
    }

    async fn current_state(&self, item_id: Uuid) -> Result<ItemState> {
        self.store.current_state(item_id).await
    }

    async fn history(&self, item_id: Uuid) -> Result<Vec<StatusEntry>> {
        self.read_through(
            item_statuses_key(item_id),
            self.ttls.item_statuses,
            || self.store.history(item_id),
        )
        .await
    }
}
