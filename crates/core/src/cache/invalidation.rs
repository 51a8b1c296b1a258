//! Eviction planning for writes.
//!
//! Every write produces a [`Mutation`]; [`keys_to_invalidate`] turns it into
//! the exact cache keys that may now hold stale data. The plan is a pure
//! function of the mutation, so it is tested without any cache backend.

use uuid::Uuid;

use super::keys::{all_wishlists_key, item_statuses_key, user_wishlists_key, wishlist_items_key};

/// A committed write against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    WishListCreated {
        owner_id: Uuid,
    },
    WishListDeleted {
        owner_id: Uuid,
        wishlist_id: Uuid,
        /// Items removed along with the list.
        item_ids: Vec<Uuid>,
    },
    ItemAdded {
        owner_id: Uuid,
        wishlist_id: Uuid,
    },
    ItemDeleted {
        owner_id: Uuid,
        wishlist_id: Uuid,
        item_id: Uuid,
    },
    ItemToggled {
        wishlist_id: Uuid,
        item_id: Uuid,
    },
}

/// Returns the cache keys to evict after `mutation` has been committed.
///
/// List views carry `items_count`, so item additions and deletions evict
/// both the global and the owner's list views.
pub fn keys_to_invalidate(mutation: &Mutation) -> Vec<String> {
    match mutation {
        Mutation::WishListCreated { owner_id } => {
            vec![all_wishlists_key(), user_wishlists_key(*owner_id)]
        }
        Mutation::WishListDeleted {
            owner_id,
            wishlist_id,
            item_ids,
        } => {
            let mut keys = vec![
                all_wishlists_key(),
                user_wishlists_key(*owner_id),
                wishlist_items_key(*wishlist_id),
            ];
            keys.extend(item_ids.iter().map(|id| item_statuses_key(*id)));
            keys
        }
        Mutation::ItemAdded {
            owner_id,
            wishlist_id,
        } => vec![
            all_wishlists_key(),
            user_wishlists_key(*owner_id),
            wishlist_items_key(*wishlist_id),
        ],
        Mutation::ItemDeleted {
            owner_id,
            wishlist_id,
            item_id,
        } => vec![
            all_wishlists_key(),
            user_wishlists_key(*owner_id),
            wishlist_items_key(*wishlist_id),
            item_statuses_key(*item_id),
        ],
        Mutation::ItemToggled {
            wishlist_id,
            item_id,
        } => vec![wishlist_items_key(*wishlist_id), item_statuses_key(*item_id)],
    }
}
