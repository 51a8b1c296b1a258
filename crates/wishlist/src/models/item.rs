use serde::Deserialize;
use uuid::Uuid;

use wishlist_core::auth::ValidationError;
use wishlist_core::serde::{default_priority, deserialize_optional_string, deserialize_priority};
use wishlist_core::wishlist::{validate_title, WishItem};

/// Request payload for adding an item to a wish list.
#[derive(Debug, Deserialize)]
pub struct CreateItem {
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    #[serde(default = "default_priority", deserialize_with = "deserialize_priority")]
    pub priority: i32,
}

impl CreateItem {
    /// Converts the request into a WishItem in `wishlist_id`.
    pub fn into_item(self, wishlist_id: Uuid) -> Result<WishItem, ValidationError> {
        let mut item =
            WishItem::new(wishlist_id, validate_title(&self.title)?).with_priority(self.priority);
        item.description = self.description;
        Ok(item)
    }
}
