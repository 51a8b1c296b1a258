use async_trait::async_trait;
use uuid::Uuid;

use crate::wishlist::{
    ItemState, ItemView, StatusEntry, StatusRecord, User, WishItem, WishList, WishListDetail,
    WishListView,
};

use super::Result;

/// Repository for user operations.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Gets a user by their ID.
    async fn get_user(&self, id: Uuid) -> Result<Option<User>>;

    /// Gets a user by their email address.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Creates a new user.
    ///
    /// Fails with `AlreadyExists` when the email is taken.
    async fn create_user(&self, user: &User) -> Result<()>;
}

/// Repository for wish list operations.
#[async_trait]
pub trait WishListRepository: Send + Sync {
    /// Creates a new wish list. Fails with `NotFound` when the owner does not exist.
    async fn create_wishlist(&self, wishlist: &WishList) -> Result<()>;

    /// Gets a wish list by its ID, without items.
    async fn get_wishlist(&self, id: Uuid) -> Result<Option<WishList>>;

    /// Gets a wish list with its items and their derived state.
    async fn get_wishlist_detail(&self, id: Uuid) -> Result<Option<WishListDetail>>;

    /// Lists every wish list, oldest first.
    async fn list_wishlists(&self) -> Result<Vec<WishListView>>;

    /// Lists the wish lists owned by a user, oldest first.
    async fn list_wishlists_by_owner(&self, user_id: Uuid) -> Result<Vec<WishListView>>;

    /// Deletes a wish list with its items and their status records.
    ///
    /// Returns the IDs of the items removed along with it.
    async fn delete_wishlist(&self, id: Uuid) -> Result<Vec<Uuid>>;
}

/// Repository for wish item operations.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Adds an item. Fails with `NotFound` when the wish list does not exist.
    async fn add_item(&self, item: &WishItem) -> Result<()>;

    /// Gets an item by its ID.
    async fn get_item(&self, id: Uuid) -> Result<Option<WishItem>>;

    /// Deletes an item and its status records.
    async fn delete_item(&self, id: Uuid) -> Result<()>;

    /// Lists the items of a wish list with their derived state, oldest first.
    async fn list_items(&self, wishlist_id: Uuid) -> Result<Vec<ItemView>>;
}

/// The append-only status history of items.
#[async_trait]
pub trait StatusLedger: Send + Sync {
    /// Appends a record negating the item's latest record, acted by `user_id`.
    ///
    /// Reading the latest record and appending the new one is atomic with
    /// respect to other toggles of the same item.
    async fn toggle(&self, item_id: Uuid, user_id: Uuid) -> Result<StatusRecord>;

    /// Derives the item's current state from its latest record.
    async fn current_state(&self, item_id: Uuid) -> Result<ItemState>;

    /// Returns the item's records newest first, annotated with the acting user's name.
    async fn history(&self, item_id: Uuid) -> Result<Vec<StatusEntry>>;
}

/// Everything the request handlers need from persistence.
pub trait WishlistStore:
    UserRepository + WishListRepository + ItemRepository + StatusLedger
{
}

impl<T> WishlistStore for T where
    T: UserRepository + WishListRepository + ItemRepository + StatusLedger
{
}
