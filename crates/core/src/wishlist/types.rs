use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::email_to_name;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    /// bcrypt hash, never serialized.
    #[serde(skip)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a fresh ID and the current timestamp.
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            full_name: None,
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    /// Sets a specific ID for this user (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Name shown to other users. See [`display_name`].
    pub fn display_name(&self) -> String {
        display_name(self.full_name.as_deref(), &self.email)
    }
}

/// Name shown for a user: the full name, or the local part of the email.
pub fn display_name(full_name: Option<&str>, email: &str) -> String {
    match full_name {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => email_to_name(email),
    }
}

/// A named collection of items owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishList {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// The owning user.
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl WishList {
    pub fn new(user_id: Uuid, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            user_id,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a specific ID for this wish list (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// A wish list as returned by listing endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishListView {
    #[serde(flatten)]
    pub wishlist: WishList,
    pub owner_name: Option<String>,
    pub items_count: usize,
}

/// A wish list together with its items and their derived state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishListDetail {
    #[serde(flatten)]
    pub wishlist: WishList,
    pub owner_name: Option<String>,
    pub items_count: usize,
    pub items: Vec<ItemView>,
}

impl WishListDetail {
    pub fn new(wishlist: WishList, owner_name: Option<String>, items: Vec<ItemView>) -> Self {
        Self {
            wishlist,
            owner_name,
            items_count: items.len(),
            items,
        }
    }
}

/// Default priority for new items.
pub const DEFAULT_PRIORITY: i32 = 1;

/// A single wishable entry belonging to exactly one wish list.
///
/// Marked state is not stored here; see [`ItemState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishItem {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub priority: i32,
    pub wishlist_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl WishItem {
    pub fn new(wishlist_id: Uuid, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            priority: DEFAULT_PRIORITY,
            wishlist_id,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets a specific ID for this item (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// Marked state of an item, derived from its status history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemState {
    pub is_marked: bool,
    /// Display name of the user who marked the item.
    pub marked_by: Option<String>,
    pub marked_at: Option<DateTime<Utc>>,
}

/// An item with its derived state, as returned by item listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemView {
    #[serde(flatten)]
    pub item: WishItem,
    #[serde(flatten)]
    pub state: ItemState,
}

impl ItemView {
    pub fn new(item: WishItem, state: ItemState) -> Self {
        Self { item, state }
    }

    /// An item without any status history.
    pub fn unmarked(item: WishItem) -> Self {
        Self::new(item, ItemState::default())
    }
}

/// One immutable ledger entry recording a mark or unmark action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub id: Uuid,
    pub item_id: Uuid,
    /// The acting user.
    pub user_id: Uuid,
    pub marked: bool,
    pub created_at: DateTime<Utc>,
}

/// A status record annotated with the acting user's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    #[serde(flatten)]
    pub record: StatusRecord,
    pub user_name: Option<String>,
}

impl StatusEntry {
    pub fn new(record: StatusRecord, user_name: Option<String>) -> Self {
        Self { record, user_name }
    }
}
