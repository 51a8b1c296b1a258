use std::time::Duration;

use uuid::Uuid;

/// Returns the cache key for the list of every wish list.
pub fn all_wishlists_key() -> String {
    "all_wishlists".to_string()
}

/// Returns the cache key for the wish lists owned by a user.
pub fn user_wishlists_key(user_id: Uuid) -> String {
    format!("user_{}_wishlists", user_id)
}

/// Returns the cache key for the items (with derived state) of a wish list.
pub fn wishlist_items_key(wishlist_id: Uuid) -> String {
    format!("wishlist_items_{}", wishlist_id)
}

/// Returns the cache key for the status history of an item.
pub fn item_statuses_key(item_id: Uuid) -> String {
    format!("item_statuses_{}", item_id)
}

/// Time-to-live for each cached view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    pub all_wishlists: Duration,
    pub user_wishlists: Duration,
    pub wishlist_items: Duration,
    pub item_statuses: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            all_wishlists: Duration::from_secs(300),
            user_wishlists: Duration::from_secs(300),
            wishlist_items: Duration::from_secs(180),
            item_statuses: Duration::from_secs(120),
        }
    }
}
