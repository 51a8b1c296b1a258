//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use wishlist_core::storage::{
    ItemRepository, RepositoryError, Result, StatusLedger, UserRepository, WishListRepository,
};
use wishlist_core::wishlist::{
    ledger, ItemState, ItemView, StatusEntry, StatusRecord, User, WishItem, WishList,
    WishListDetail, WishListView,
};

/// All tables behind one lock, so multi-table writes (cascading deletes,
/// read-then-append toggles) are atomic.
///
/// Vectors keep insertion order, which breaks ties between equal timestamps.
#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    wishlists: Vec<WishList>,
    items: Vec<WishItem>,
    statuses: Vec<StatusRecord>,
}

impl Tables {
    fn user_name(&self, user_id: Uuid) -> Option<String> {
        self.users.get(&user_id).map(User::display_name)
    }

    fn entries_for(&self, item_id: Uuid) -> Vec<StatusEntry> {
        self.statuses
            .iter()
            .filter(|s| s.item_id == item_id)
            .map(|s| StatusEntry::new(s.clone(), self.user_name(s.user_id)))
            .collect()
    }

    fn item_view(&self, item: &WishItem) -> ItemView {
        ItemView::new(item.clone(), ledger::current_state(&self.entries_for(item.id)))
    }

    /// Items of a list, oldest first.
    fn items_of(&self, wishlist_id: Uuid) -> Vec<&WishItem> {
        let mut items: Vec<&WishItem> = self
            .items
            .iter()
            .filter(|i| i.wishlist_id == wishlist_id)
            .collect();
        items.sort_by_key(|i| i.created_at);
        items
    }

    /// Views of the lists matching `filter`, oldest first.
    fn views(&self, filter: impl Fn(&WishList) -> bool) -> Vec<WishListView> {
        let mut lists: Vec<&WishList> = self.wishlists.iter().filter(|w| filter(w)).collect();
        lists.sort_by_key(|w| w.created_at);

        lists
            .into_iter()
            .map(|w| WishListView {
                wishlist: w.clone(),
                owner_name: self.user_name(w.user_id),
                items_count: self.items.iter().filter(|i| i.wishlist_id == w.id).count(),
            })
            .collect()
    }
}

/// In-memory storage backend.
///
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let mut tables = self.tables.write().await;
        let taken = tables.users.contains_key(&user.id)
            || tables.users.values().any(|u| u.email == user.email);
        if taken {
            return Err(RepositoryError::already_exists("User", &user.email));
        }
        tables.users.insert(user.id, user.clone());
        Ok(())
    }
}

#[async_trait]
impl WishListRepository for InMemoryRepository {
    async fn create_wishlist(&self, wishlist: &WishList) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&wishlist.user_id) {
            return Err(RepositoryError::not_found("User", wishlist.user_id));
        }
        if tables.wishlists.iter().any(|w| w.id == wishlist.id) {
            return Err(RepositoryError::already_exists("WishList", wishlist.id));
        }
        tables.wishlists.push(wishlist.clone());
        Ok(())
    }

    async fn get_wishlist(&self, id: Uuid) -> Result<Option<WishList>> {
        let tables = self.tables.read().await;
        Ok(tables.wishlists.iter().find(|w| w.id == id).cloned())
    }

    async fn get_wishlist_detail(&self, id: Uuid) -> Result<Option<WishListDetail>> {
        let tables = self.tables.read().await;
        let Some(wishlist) = tables.wishlists.iter().find(|w| w.id == id) else {
            return Ok(None);
        };

        let items = tables
            .items_of(id)
            .into_iter()
            .map(|item| tables.item_view(item))
            .collect();

        Ok(Some(WishListDetail::new(
            wishlist.clone(),
            tables.user_name(wishlist.user_id),
            items,
        )))
    }

    async fn list_wishlists(&self) -> Result<Vec<WishListView>> {
        let tables = self.tables.read().await;
        Ok(tables.views(|_| true))
    }

    async fn list_wishlists_by_owner(&self, user_id: Uuid) -> Result<Vec<WishListView>> {
        let tables = self.tables.read().await;
        Ok(tables.views(|w| w.user_id == user_id))
    }

    async fn delete_wishlist(&self, id: Uuid) -> Result<Vec<Uuid>> {
        let mut tables = self.tables.write().await;
        if !tables.wishlists.iter().any(|w| w.id == id) {
            return Err(RepositoryError::not_found("WishList", id));
        }

        let item_ids: Vec<Uuid> = tables
            .items
            .iter()
            .filter(|i| i.wishlist_id == id)
            .map(|i| i.id)
            .collect();

        tables.wishlists.retain(|w| w.id != id);
        tables.items.retain(|i| i.wishlist_id != id);
        tables.statuses.retain(|s| !item_ids.contains(&s.item_id));

        Ok(item_ids)
    }
}

#[async_trait]
impl ItemRepository for InMemoryRepository {
    async fn add_item(&self, item: &WishItem) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.wishlists.iter().any(|w| w.id == item.wishlist_id) {
            return Err(RepositoryError::not_found("WishList", item.wishlist_id));
        }
        if tables.items.iter().any(|i| i.id == item.id) {
            return Err(RepositoryError::already_exists("WishItem", item.id));
        }
        tables.items.push(item.clone());
        Ok(())
    }

    async fn get_item(&self, id: Uuid) -> Result<Option<WishItem>> {
        let tables = self.tables.read().await;
        Ok(tables.items.iter().find(|i| i.id == id).cloned())
    }

    async fn delete_item(&self, id: Uuid) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.items.iter().any(|i| i.id == id) {
            return Err(RepositoryError::not_found("WishItem", id));
        }
        tables.items.retain(|i| i.id != id);
        tables.statuses.retain(|s| s.item_id != id);
        Ok(())
    }

    async fn list_items(&self, wishlist_id: Uuid) -> Result<Vec<ItemView>> {
        let tables = self.tables.read().await;
        Ok(tables
            .items_of(wishlist_id)
            .into_iter()
            .map(|item| tables.item_view(item))
            .collect())
    }
}

#[async_trait]
impl StatusLedger for InMemoryRepository {
    async fn toggle(&self, item_id: Uuid, user_id: Uuid) -> Result<StatusRecord> {
        // The write lock is held from reading the latest record to appending.
        let mut tables = self.tables.write().await;
        if !tables.items.iter().any(|i| i.id == item_id) {
            return Err(RepositoryError::not_found("WishItem", item_id));
        }
        if !tables.users.contains_key(&user_id) {
            return Err(RepositoryError::not_found("User", user_id));
        }

        let previous = ledger::latest(tables.statuses.iter().filter(|s| s.item_id == item_id));
        let record = ledger::new_status_record(item_id, user_id, previous, Utc::now());
        tables.statuses.push(record.clone());

        Ok(record)
    }

    async fn current_state(&self, item_id: Uuid) -> Result<ItemState> {
        let tables = self.tables.read().await;
        Ok(ledger::current_state(&tables.entries_for(item_id)))
    }

    async fn history(&self, item_id: Uuid) -> Result<Vec<StatusEntry>> {
        let tables = self.tables.read().await;
        Ok(ledger::newest_first(tables.entries_for(item_id)))
    }
}
