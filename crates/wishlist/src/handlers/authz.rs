//! Ownership checks shared by the wish list and item handlers.
//!
//! Each check loads the target and fails with 404 when it is missing, or
//! 403 when the caller may not act on it. Nothing is mutated here.

use uuid::Uuid;

use wishlist_core::storage::WishlistStore;
use wishlist_core::wishlist::{WishItem, WishList};

use super::ApiError;

/// Loads a wish list, failing with 404 when it does not exist.
pub async fn find_wishlist(
    store: &dyn WishlistStore,
    wishlist_id: Uuid,
) -> Result<WishList, ApiError> {
    store
        .get_wishlist(wishlist_id)
        .await?
        .ok_or_else(ApiError::wishlist_not_found)
}

/// Loads a wish list owned by `user_id`.
pub async fn require_owner(
    store: &dyn WishlistStore,
    wishlist_id: Uuid,
    user_id: Uuid,
) -> Result<WishList, ApiError> {
    let wishlist = find_wishlist(store, wishlist_id).await?;

    if wishlist.user_id != user_id {
        tracing::warn!(
            wishlist_id = %wishlist_id,
            user_id = %user_id,
            "Authorization denied: not the owner"
        );
        return Err(ApiError::Forbidden);
    }

    Ok(wishlist)
}

/// Loads an item, failing with 404 unless it belongs to `wishlist_id`.
pub async fn require_item_in(
    store: &dyn WishlistStore,
    wishlist_id: Uuid,
    item_id: Uuid,
) -> Result<WishItem, ApiError> {
    store
        .get_item(item_id)
        .await?
        .filter(|item| item.wishlist_id == wishlist_id)
        .ok_or_else(ApiError::item_not_found)
}
