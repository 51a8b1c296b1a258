use serde::Deserialize;
use uuid::Uuid;

use wishlist_core::auth::ValidationError;
use wishlist_core::serde::deserialize_optional_string;
use wishlist_core::wishlist::{validate_title, WishList};

/// Request payload for creating a wish list.
#[derive(Debug, Deserialize)]
pub struct CreateWishList {
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
}

impl CreateWishList {
    /// Converts the request into a WishList owned by `owner_id`.
    pub fn into_wishlist(self, owner_id: Uuid) -> Result<WishList, ValidationError> {
        let mut wishlist = WishList::new(owner_id, validate_title(&self.title)?);
        wishlist.description = self.description;
        Ok(wishlist)
    }
}
