//! Status ledger rules.
//!
//! An item's marked state is never stored on the item. It is derived from an
//! append-only sequence of [`StatusRecord`]s, and the only way to change it is
//! to append a record that negates the latest one. These functions hold that
//! logic so every storage backend applies it the same way.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::{ItemState, StatusEntry, StatusRecord};

/// Returns the `marked` value for the next toggle of an item.
///
/// `previous` is the latest record for the item across all users.
pub fn next_marked(previous: Option<&StatusRecord>) -> bool {
    !previous.is_some_and(|record| record.marked)
}

/// Returns a creation timestamp strictly after `previous`.
///
/// Uses `now` unless the clock has not moved past the previous record, in
/// which case the previous timestamp is bumped by one microsecond (the
/// precision timestamps are stored with).
pub fn next_timestamp(previous: Option<DateTime<Utc>>, now: DateTime<Utc>) -> DateTime<Utc> {
    match previous {
        Some(prev) if prev >= now => prev + Duration::microseconds(1),
        _ => now,
    }
}

/// Builds the record appended by a toggle.
pub fn new_status_record(
    item_id: Uuid,
    user_id: Uuid,
    previous: Option<&StatusRecord>,
    now: DateTime<Utc>,
) -> StatusRecord {
    StatusRecord {
        id: Uuid::new_v4(),
        item_id,
        user_id,
        marked: next_marked(previous),
        created_at: next_timestamp(previous.map(|r| r.created_at), now),
    }
}

/// Returns the latest record of a history given in insertion order.
///
/// The maximum creation timestamp wins; on ties the later-inserted record wins.
pub fn latest<'a, I>(records: I) -> Option<&'a StatusRecord>
where
    I: IntoIterator<Item = &'a StatusRecord>,
{
    // `max_by` yields the last of equal elements.
    records
        .into_iter()
        .max_by(|a, b| a.created_at.cmp(&b.created_at))
}

/// Projects the latest entry of a history (insertion order) into an [`ItemState`].
///
/// An empty history, or a latest record that is an unmark, yields no marker
/// and no timestamp.
pub fn current_state(entries: &[StatusEntry]) -> ItemState {
    let latest = entries
        .iter()
        .max_by(|a, b| a.record.created_at.cmp(&b.record.created_at));

    match latest {
        Some(entry) => state_from_latest(entry),
        None => ItemState::default(),
    }
}

/// Projects a known-latest entry into an [`ItemState`].
pub fn state_from_latest(entry: &StatusEntry) -> ItemState {
    if entry.record.marked {
        ItemState {
            is_marked: true,
            marked_by: entry.user_name.clone(),
            marked_at: Some(entry.record.created_at),
        }
    } else {
        ItemState::default()
    }
}

/// Orders a history given in insertion order newest first.
pub fn newest_first(mut entries: Vec<StatusEntry>) -> Vec<StatusEntry> {
    // Reverse first so the stable sort keeps later inserts ahead on ties.
    entries.reverse();
    entries.sort_by(|a, b| b.record.created_at.cmp(&a.record.created_at));
    entries
}
