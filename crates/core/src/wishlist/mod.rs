pub mod ledger;
mod types;

pub use types::{
    display_name, ItemState, ItemView, StatusEntry, StatusRecord, User, WishItem, WishList,
    WishListDetail, WishListView, DEFAULT_PRIORITY,
};

use crate::auth::ValidationError;

/// Trims a required title, rejecting blank ones.
pub fn validate_title(title: &str) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Empty("title"))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_title_trims() {
        assert_eq!(validate_title("  Birthday "), Ok("Birthday".to_string()));
    }

    #[test]
    fn validate_title_rejects_blank() {
        assert_eq!(validate_title(""), Err(ValidationError::Empty("title")));
        assert_eq!(validate_title("   "), Err(ValidationError::Empty("title")));
    }
}
