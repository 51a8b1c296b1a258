//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! Column positions follow the queries in [`super::schema`].

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;
use uuid::Uuid;

use wishlist_core::wishlist::{
    display_name, ItemState, ItemView, StatusEntry, StatusRecord, User, WishItem, WishList,
    WishListView,
};

// ============================================================================
// User conversions
// ============================================================================

/// Convert a SQLite row to a User.
///
/// Expected columns: id, email, full_name, password_hash, created_at
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    let id: String = row.get(0)?;
    let email: String = row.get(1)?;
    let full_name: Option<String> = row.get(2)?;
    let password_hash: String = row.get(3)?;
    let created_at: String = row.get(4)?;

    Ok(User {
        id: parse_uuid(&id)?,
        email,
        full_name,
        password_hash,
        created_at: parse_datetime(&created_at)?,
    })
}

/// Reads a `full_name`, `email` column pair starting at `idx` as a display name.
///
/// Both columns are NULL when an outer join found no user.
fn name_at(row: &Row, idx: usize) -> rusqlite::Result<Option<String>> {
    let full_name: Option<String> = row.get(idx)?;
    let email: Option<String> = row.get(idx + 1)?;
    Ok(email.map(|email| display_name(full_name.as_deref(), &email)))
}

// ============================================================================
// Wish list conversions
// ============================================================================

/// Convert a SQLite row to a WishList.
///
/// Expected columns: id, title, description, user_id, created_at
pub fn row_to_wishlist(row: &Row) -> rusqlite::Result<WishList> {
    let id: String = row.get(0)?;
    let title: String = row.get(1)?;
    let description: Option<String> = row.get(2)?;
    let user_id: String = row.get(3)?;
    let created_at: String = row.get(4)?;

    Ok(WishList {
        id: parse_uuid(&id)?,
        title,
        description,
        user_id: parse_uuid(&user_id)?,
        created_at: parse_datetime(&created_at)?,
    })
}

/// Convert a row of wish list columns plus owner columns.
///
/// Expected columns: wish list columns, full_name, email
pub fn row_to_wishlist_with_owner(row: &Row) -> rusqlite::Result<(WishList, Option<String>)> {
    Ok((row_to_wishlist(row)?, name_at(row, 5)?))
}

/// Convert a SQLite row to a WishListView.
///
/// Expected columns: wish list columns, full_name, email, items_count
pub fn row_to_wishlist_view(row: &Row) -> rusqlite::Result<WishListView> {
    let (wishlist, owner_name) = row_to_wishlist_with_owner(row)?;
    let items_count: i64 = row.get(7)?;

    Ok(WishListView {
        wishlist,
        owner_name,
        items_count: parse_count(items_count)?,
    })
}

// ============================================================================
// Item conversions
// ============================================================================

/// Convert a SQLite row to a WishItem.
///
/// Expected columns: id, title, description, priority, wishlist_id, created_at
pub fn row_to_item(row: &Row) -> rusqlite::Result<WishItem> {
    let id: String = row.get(0)?;
    let title: String = row.get(1)?;
    let description: Option<String> = row.get(2)?;
    let priority: i32 = row.get(3)?;
    let wishlist_id: String = row.get(4)?;
    let created_at: String = row.get(5)?;

    Ok(WishItem {
        id: parse_uuid(&id)?,
        title,
        description,
        priority,
        wishlist_id: parse_uuid(&wishlist_id)?,
        created_at: parse_datetime(&created_at)?,
    })
}

/// Convert a row of item columns joined with the item's latest status.
///
/// Expected columns: item columns, marked, status created_at, full_name, email
pub fn row_to_item_view(row: &Row) -> rusqlite::Result<ItemView> {
    let item = row_to_item(row)?;
    let marked: Option<bool> = row.get(6)?;
    let marked_at: Option<String> = row.get(7)?;

    let state = match (marked, marked_at) {
        (Some(true), Some(marked_at)) => ItemState {
            is_marked: true,
            marked_by: name_at(row, 8)?,
            marked_at: Some(parse_datetime(&marked_at)?),
        },
        _ => ItemState::default(),
    };

    Ok(ItemView::new(item, state))
}

// ============================================================================
// Status conversions
// ============================================================================

/// Convert a SQLite row to a StatusRecord.
///
/// Expected columns: id, item_id, user_id, marked, created_at
pub fn row_to_status_record(row: &Row) -> rusqlite::Result<StatusRecord> {
    let id: String = row.get(0)?;
    let item_id: String = row.get(1)?;
    let user_id: String = row.get(2)?;
    let marked: bool = row.get(3)?;
    let created_at: String = row.get(4)?;

    Ok(StatusRecord {
        id: parse_uuid(&id)?,
        item_id: parse_uuid(&item_id)?,
        user_id: parse_uuid(&user_id)?,
        marked,
        created_at: parse_datetime(&created_at)?,
    })
}

/// Convert a row of status columns plus the acting user's columns.
///
/// Expected columns: status columns, full_name, email
pub fn row_to_status_entry(row: &Row) -> rusqlite::Result<StatusEntry> {
    Ok(StatusEntry::new(row_to_status_record(row)?, name_at(row, 5)?))
}

// ============================================================================
// Helper functions
// ============================================================================

/// Parse a UUID from string.
fn parse_uuid(s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn parse_count(count: i64) -> rusqlite::Result<usize> {
    usize::try_from(count).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Integer, Box::new(e))
    })
}

/// Format a DateTime<Utc> for SQLite storage.
///
/// Always microsecond precision with a `Z` suffix, so stored values sort
/// lexicographically in time order.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}
