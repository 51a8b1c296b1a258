mod error;
mod invalidation;
mod keys;
pub mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use invalidation::{keys_to_invalidate, Mutation};
pub use keys::{
    all_wishlists_key, item_statuses_key, user_wishlists_key, wishlist_items_key, CacheTtls,
};
pub use traits::Cache;
