//! SQLite schema definitions and SQL query constants.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings (microseconds, `Z`
//! suffix) so that ordering by the text column orders by time. Ties are
//! broken by `rowid`, which follows insertion order.

/// Pragmas applied to every connection before the schema is created.
pub const PRAGMAS: &str = "PRAGMA foreign_keys = ON;";

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    full_name TEXT,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- Wish lists table
CREATE TABLE IF NOT EXISTS wishlists (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT,
    user_id TEXT NOT NULL,
    created_at TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

-- Wish items table
CREATE TABLE IF NOT EXISTS wish_items (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT,
    priority INTEGER NOT NULL DEFAULT 1,
    wishlist_id TEXT NOT NULL,
    created_at TEXT NOT NULL,
    FOREIGN KEY (wishlist_id) REFERENCES wishlists(id) ON DELETE CASCADE
);

-- Append-only status ledger
CREATE TABLE IF NOT EXISTS item_statuses (
    id TEXT PRIMARY KEY,
    item_id TEXT NOT NULL,
    user_id TEXT NOT NULL,
    marked INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    FOREIGN KEY (item_id) REFERENCES wish_items(id) ON DELETE CASCADE,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

-- Indexes for efficient queries
CREATE INDEX IF NOT EXISTS idx_wishlists_user_id ON wishlists(user_id);
CREATE INDEX IF NOT EXISTS idx_wish_items_wishlist_id ON wish_items(wishlist_id);
CREATE INDEX IF NOT EXISTS idx_item_statuses_item_created ON item_statuses(item_id, created_at);
"#;

// ============================================================================
// User queries
// ============================================================================

pub const INSERT_USER: &str = r#"
INSERT INTO users (id, email, full_name, password_hash, created_at)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const SELECT_USER_BY_ID: &str = r#"
SELECT id, email, full_name, password_hash, created_at
FROM users
WHERE id = ?1
"#;

pub const SELECT_USER_BY_EMAIL: &str = r#"
SELECT id, email, full_name, password_hash, created_at
FROM users
WHERE email = ?1
"#;

pub const USER_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)";

// ============================================================================
// Wish list queries
// ============================================================================

pub const INSERT_WISHLIST: &str = r#"
INSERT INTO wishlists (id, title, description, user_id, created_at)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const SELECT_WISHLIST_BY_ID: &str = r#"
SELECT id, title, description, user_id, created_at
FROM wishlists
WHERE id = ?1
"#;

/// Wish list columns followed by the owner's `full_name` and `email`.
pub const SELECT_WISHLIST_WITH_OWNER: &str = r#"
SELECT w.id, w.title, w.description, w.user_id, w.created_at, u.full_name, u.email
FROM wishlists w
JOIN users u ON u.id = w.user_id
WHERE w.id = ?1
"#;

/// Wish list columns, owner `full_name` and `email`, then the item count.
pub const SELECT_ALL_WISHLIST_VIEWS: &str = r#"
SELECT w.id, w.title, w.description, w.user_id, w.created_at, u.full_name, u.email,
       (SELECT COUNT(*) FROM wish_items i WHERE i.wishlist_id = w.id) AS items_count
FROM wishlists w
JOIN users u ON u.id = w.user_id
ORDER BY w.created_at ASC, w.rowid ASC
"#;

pub const SELECT_WISHLIST_VIEWS_BY_OWNER: &str = r#"
SELECT w.id, w.title, w.description, w.user_id, w.created_at, u.full_name, u.email,
       (SELECT COUNT(*) FROM wish_items i WHERE i.wishlist_id = w.id) AS items_count
FROM wishlists w
JOIN users u ON u.id = w.user_id
WHERE w.user_id = ?1
ORDER BY w.created_at ASC, w.rowid ASC
"#;

pub const WISHLIST_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM wishlists WHERE id = ?1)";

pub const SELECT_ITEM_IDS_BY_WISHLIST: &str = r#"
SELECT id FROM wish_items WHERE wishlist_id = ?1
"#;

pub const DELETE_WISHLIST: &str = "DELETE FROM wishlists WHERE id = ?1";

// ============================================================================
// Item queries
// ============================================================================

pub const INSERT_ITEM: &str = r#"
INSERT INTO wish_items (id, title, description, priority, wishlist_id, created_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#;

pub const SELECT_ITEM_BY_ID: &str = r#"
SELECT id, title, description, priority, wishlist_id, created_at
FROM wish_items
WHERE id = ?1
"#;

pub const ITEM_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM wish_items WHERE id = ?1)";

/// Item columns, then the latest status (`marked`, `created_at`) and the
/// acting user's `full_name` and `email`. Status columns are NULL for items
/// without history.
pub const SELECT_ITEM_VIEWS_BY_WISHLIST: &str = r#"
SELECT i.id, i.title, i.description, i.priority, i.wishlist_id, i.created_at,
       s.marked, s.created_at, u.full_name, u.email
FROM wish_items i
LEFT JOIN item_statuses s ON s.rowid = (
    SELECT latest.rowid FROM item_statuses latest
    WHERE latest.item_id = i.id
    ORDER BY latest.created_at DESC, latest.rowid DESC
    LIMIT 1
)
LEFT JOIN users u ON u.id = s.user_id
WHERE i.wishlist_id = ?1
ORDER BY i.created_at ASC, i.rowid ASC
"#;

pub const DELETE_ITEM: &str = "DELETE FROM wish_items WHERE id = ?1";

// ============================================================================
// Status ledger queries
// ============================================================================

pub const INSERT_STATUS: &str = r#"
INSERT INTO item_statuses (id, item_id, user_id, marked, created_at)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const SELECT_LATEST_STATUS: &str = r#"
SELECT id, item_id, user_id, marked, created_at
FROM item_statuses
WHERE item_id = ?1
ORDER BY created_at DESC, rowid DESC
LIMIT 1
"#;

/// Status columns followed by the acting user's `full_name` and `email`.
pub const SELECT_LATEST_STATUS_ENTRY: &str = r#"
SELECT s.id, s.item_id, s.user_id, s.marked, s.created_at, u.full_name, u.email
FROM item_statuses s
LEFT JOIN users u ON u.id = s.user_id
WHERE s.item_id = ?1
ORDER BY s.created_at DESC, s.rowid DESC
LIMIT 1
"#;

pub const SELECT_STATUS_HISTORY: &str = r#"
SELECT s.id, s.item_id, s.user_id, s.marked, s.created_at, u.full_name, u.email
FROM item_statuses s
LEFT JOIN users u ON u.id = s.user_id
WHERE s.item_id = ?1
ORDER BY s.created_at DESC, s.rowid DESC
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_valid_sql() {
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS users"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS wishlists"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS wish_items"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS item_statuses"));
        assert!(CREATE_TABLES.contains("ON DELETE CASCADE"));
    }

    #[test]
    fn test_queries_contain_expected_keywords() {
        assert!(INSERT_USER.contains("INSERT"));
        assert!(SELECT_USER_BY_EMAIL.contains("email = ?1"));

        assert!(INSERT_WISHLIST.contains("INSERT"));
        assert!(SELECT_ALL_WISHLIST_VIEWS.contains("COUNT(*)"));
        assert!(SELECT_WISHLIST_VIEWS_BY_OWNER.contains("w.user_id = ?1"));
        assert!(DELETE_WISHLIST.contains("DELETE"));

        assert!(INSERT_ITEM.contains("INSERT"));
        assert!(SELECT_ITEM_VIEWS_BY_WISHLIST.contains("LEFT JOIN item_statuses"));
        assert!(DELETE_ITEM.contains("DELETE"));

        assert!(INSERT_STATUS.contains("INSERT"));
        assert!(SELECT_LATEST_STATUS.contains("LIMIT 1"));
    }

    #[test]
    fn test_listings_are_oldest_first_and_history_newest_first() {
        assert!(SELECT_ALL_WISHLIST_VIEWS.contains("ORDER BY w.created_at ASC, w.rowid ASC"));
        assert!(SELECT_ITEM_VIEWS_BY_WISHLIST.contains("ORDER BY i.created_at ASC, i.rowid ASC"));
        assert!(SELECT_STATUS_HISTORY.contains("ORDER BY s.created_at DESC, s.rowid DESC"));
    }
}
