//! SQLite repository implementation.
//!
//! Implements the repository traits from `wishlist_core::storage` using SQLite.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{OptionalExtension, TransactionBehavior};
use tokio_rusqlite::Connection;
use uuid::Uuid;

use wishlist_core::storage::{
    ItemRepository, RepositoryError, Result, StatusLedger, UserRepository, WishListRepository,
};
use wishlist_core::wishlist::{
    ledger, ItemState, ItemView, StatusEntry, StatusRecord, User, WishItem, WishList,
    WishListDetail, WishListView,
};

use super::conversions::{
    format_datetime, row_to_item, row_to_item_view, row_to_status_entry, row_to_status_record,
    row_to_user, row_to_wishlist, row_to_wishlist_view, row_to_wishlist_with_owner,
};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Runs an `EXISTS` query taking a single ID parameter.
fn exists(conn: &rusqlite::Connection, sql: &str, id: &str) -> tokio_rusqlite::Result<bool> {
    conn.query_row(sql, [id], |row| row.get(0)).map_err(wrap_err)
}

/// SQLite-based repository implementation.
///
/// All statements run on the single connection owned by `tokio_rusqlite`,
/// so each `call` closure executes without interleaving with other calls.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::PRAGMAS).map_err(wrap_err)?;
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

// ============================================================================
// UserRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_USER_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_user) {
                    Ok(user) => Ok(Some(user)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", id))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_USER_BY_EMAIL)
                    .map_err(wrap_err)?;
                match stmt.query_row([&email], row_to_user) {
                    Ok(user) => Ok(Some(user)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User"))
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let id = user.id.to_string();
        let email = user.email.clone();
        let full_name = user.full_name.clone();
        let password_hash = user.password_hash.clone();
        let created_at = format_datetime(&user.created_at);
        let user_email = user.email.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_USER,
                    rusqlite::params![id, email, full_name, password_hash, created_at],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", user_email))
    }
}

// ============================================================================
// WishListRepository implementation
// ============================================================================

#[async_trait]
impl WishListRepository for SqliteRepository {
    async fn create_wishlist(&self, wishlist: &WishList) -> Result<()> {
        let id = wishlist.id.to_string();
        let title = wishlist.title.clone();
        let description = wishlist.description.clone();
        let user_id = wishlist.user_id.to_string();
        let created_at = format_datetime(&wishlist.created_at);
        let owner = wishlist.user_id;

        let created = self
            .conn
            .call(move |conn| {
                if !exists(conn, schema::USER_EXISTS, &user_id)? {
                    return Ok(false);
                }
                conn.execute(
                    schema::INSERT_WISHLIST,
                    rusqlite::params![id, title, description, user_id, created_at],
                )
                .map_err(wrap_err)?;
                Ok(true)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "WishList", wishlist.id))?;

        if created {
            Ok(())
        } else {
            Err(RepositoryError::not_found("User", owner))
        }
    }

    async fn get_wishlist(&self, id: Uuid) -> Result<Option<WishList>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_WISHLIST_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_wishlist) {
                    Ok(wishlist) => Ok(Some(wishlist)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "WishList", id))
    }

    async fn get_wishlist_detail(&self, id: Uuid) -> Result<Option<WishListDetail>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let header = conn
                    .query_row(
                        schema::SELECT_WISHLIST_WITH_OWNER,
                        [&id_str],
                        row_to_wishlist_with_owner,
                    )
                    .optional()
                    .map_err(wrap_err)?;

                let Some((wishlist, owner_name)) = header else {
                    return Ok(None);
                };

                let mut stmt = conn
                    .prepare(schema::SELECT_ITEM_VIEWS_BY_WISHLIST)
                    .map_err(wrap_err)?;
                let items = stmt
                    .query_map([&id_str], row_to_item_view)
                    .map_err(wrap_err)?
                    .collect::<rusqlite::Result<Vec<ItemView>>>()
                    .map_err(wrap_err)?;

                Ok(Some(WishListDetail::new(wishlist, owner_name, items)))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "WishList", id))
    }

    async fn list_wishlists(&self) -> Result<Vec<WishListView>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_ALL_WISHLIST_VIEWS)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([], row_to_wishlist_view)
                    .map_err(wrap_err)?;

                let mut views = Vec::new();
                for row_result in rows {
                    views.push(row_result.map_err(wrap_err)?);
                }
                Ok(views)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "WishList"))
    }

    async fn list_wishlists_by_owner(&self, user_id: Uuid) -> Result<Vec<WishListView>> {
        let user_id_str = user_id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_WISHLIST_VIEWS_BY_OWNER)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([&user_id_str], row_to_wishlist_view)
                    .map_err(wrap_err)?;

                let mut views = Vec::new();
                for row_result in rows {
                    views.push(row_result.map_err(wrap_err)?);
                }
                Ok(views)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "WishList"))
    }

    async fn delete_wishlist(&self, id: Uuid) -> Result<Vec<Uuid>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let tx = conn
                    .transaction_with_behavior(TransactionBehavior::Immediate)
                    .map_err(wrap_err)?;

                let item_ids = {
                    let mut stmt = tx
                        .prepare(schema::SELECT_ITEM_IDS_BY_WISHLIST)
                        .map_err(wrap_err)?;
                    let rows = stmt
                        .query_map([&id_str], |row| row.get::<_, String>(0))
                        .map_err(wrap_err)?;

                    let mut ids = Vec::new();
                    for row_result in rows {
                        let raw = row_result.map_err(wrap_err)?;
                        let parsed = Uuid::parse_str(&raw)
                            .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))?;
                        ids.push(parsed);
                    }
                    ids
                };

                // Items and their status records go with the list via ON DELETE CASCADE.
                let rows = tx
                    .execute(schema::DELETE_WISHLIST, [&id_str])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }

                tx.commit().map_err(wrap_err)?;
                Ok(item_ids)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "WishList", id))
    }
}

// ============================================================================
// ItemRepository implementation
// ============================================================================

#[async_trait]
impl ItemRepository for SqliteRepository {
    async fn add_item(&self, item: &WishItem) -> Result<()> {
        let id = item.id.to_string();
        let title = item.title.clone();
        let description = item.description.clone();
        let priority = item.priority;
        let wishlist_id = item.wishlist_id.to_string();
        let created_at = format_datetime(&item.created_at);
        let list = item.wishlist_id;

        let added = self
            .conn
            .call(move |conn| {
                if !exists(conn, schema::WISHLIST_EXISTS, &wishlist_id)? {
                    return Ok(false);
                }
                conn.execute(
                    schema::INSERT_ITEM,
                    rusqlite::params![id, title, description, priority, wishlist_id, created_at],
                )
                .map_err(wrap_err)?;
                Ok(true)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "WishItem", item.id))?;

        if added {
            Ok(())
        } else {
            Err(RepositoryError::not_found("WishList", list))
        }
    }

    async fn get_item(&self, id: Uuid) -> Result<Option<WishItem>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_ITEM_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_item) {
                    Ok(item) => Ok(Some(item)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "WishItem", id))
    }

    async fn delete_item(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_ITEM, [&id_str])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "WishItem", id))
    }

    async fn list_items(&self, wishlist_id: Uuid) -> Result<Vec<ItemView>> {
        let wishlist_id_str = wishlist_id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_ITEM_VIEWS_BY_WISHLIST)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([&wishlist_id_str], row_to_item_view)
                    .map_err(wrap_err)?;

                let mut items = Vec::new();
                for row_result in rows {
                    items.push(row_result.map_err(wrap_err)?);
                }
                Ok(items)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "WishItem"))
    }
}

// ============================================================================
// StatusLedger implementation
// ============================================================================

#[async_trait]
impl StatusLedger for SqliteRepository {
    async fn toggle(&self, item_id: Uuid, user_id: Uuid) -> Result<StatusRecord> {
        let item_id_str = item_id.to_string();
        let user_id_str = user_id.to_string();

        self.conn
            .call(move |conn| {
                // IMMEDIATE takes the write lock before reading the latest record.
                let tx = conn
                    .transaction_with_behavior(TransactionBehavior::Immediate)
                    .map_err(wrap_err)?;

                if !exists(&tx, schema::ITEM_EXISTS, &item_id_str)? {
                    return Ok(Err(RepositoryError::not_found("WishItem", item_id)));
                }
                if !exists(&tx, schema::USER_EXISTS, &user_id_str)? {
                    return Ok(Err(RepositoryError::not_found("User", user_id)));
                }

                let previous = tx
                    .query_row(
                        schema::SELECT_LATEST_STATUS,
                        [&item_id_str],
                        row_to_status_record,
                    )
                    .optional()
                    .map_err(wrap_err)?;

                let record =
                    ledger::new_status_record(item_id, user_id, previous.as_ref(), Utc::now());

                tx.execute(
                    schema::INSERT_STATUS,
                    rusqlite::params![
                        record.id.to_string(),
                        item_id_str,
                        user_id_str,
                        record.marked,
                        format_datetime(&record.created_at)
                    ],
                )
                .map_err(wrap_err)?;

                tx.commit().map_err(wrap_err)?;
                Ok(Ok(record))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "StatusRecord", item_id))?
    }

    async fn current_state(&self, item_id: Uuid) -> Result<ItemState> {
        let item_id_str = item_id.to_string();

        self.conn
            .call(move |conn| {
                let latest = conn
                    .query_row(
                        schema::SELECT_LATEST_STATUS_ENTRY,
                        [&item_id_str],
                        row_to_status_entry,
                    )
                    .optional()
                    .map_err(wrap_err)?;

                Ok(latest
                    .as_ref()
                    .map(ledger::state_from_latest)
                    .unwrap_or_default())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "StatusRecord", item_id))
    }

    async fn history(&self, item_id: Uuid) -> Result<Vec<StatusEntry>> {
        let item_id_str = item_id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_STATUS_HISTORY)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([&item_id_str], row_to_status_entry)
                    .map_err(wrap_err)?;

                let mut entries = Vec::new();
                for row_result in rows {
                    entries.push(row_result.map_err(wrap_err)?);
                }
                Ok(entries)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "StatusRecord", item_id))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    async fn repo() -> SqliteRepository {
        SqliteRepository::new_in_memory()
            .await
            .expect("in-memory database should open")
    }

    async fn seed_user(repo: &SqliteRepository, email: &str, name: Option<&str>) -> User {
        let mut user = User::new(email, "$2b$hash");
        if let Some(name) = name {
            user = user.with_full_name(name);
        }
        repo.create_user(&user).await.unwrap();
        user
    }

    async fn seed_list(repo: &SqliteRepository, owner: &User, title: &str) -> WishList {
        let list = WishList::new(owner.id, title);
        repo.create_wishlist(&list).await.unwrap();
        list
    }

    async fn seed_item(repo: &SqliteRepository, list: &WishList, title: &str) -> WishItem {
        let item = WishItem::new(list.id, title);
        repo.add_item(&item).await.unwrap();
        item
    }

    #[tokio::test]
    async fn test_user_round_trip_and_lookup_by_email() {
        let repo = repo().await;
        let user = seed_user(&repo, "alice@example.com", Some("Alice")).await;

        let by_id = repo.get_user(user.id).await.unwrap().unwrap();
        let by_email = repo
            .get_user_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(by_id, user);
        assert_eq!(by_email.password_hash, "$2b$hash");
        assert!(repo.get_user(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_already_exists() {
        let repo = repo().await;
        seed_user(&repo, "alice@example.com", None).await;

        let result = repo
            .create_user(&User::new("alice@example.com", "other"))
            .await;

        assert!(matches!(
            result,
            Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_create_wishlist_requires_owner() {
        let repo = repo().await;
        let orphan = WishList::new(Uuid::new_v4(), "Orphan");

        let result = repo.create_wishlist(&orphan).await;

        assert_eq!(result, Err(RepositoryError::not_found("User", orphan.user_id)));
    }

    #[tokio::test]
    async fn test_listings_are_oldest_first_with_owner_and_count() {
        let repo = repo().await;
        let alice = seed_user(&repo, "alice@example.com", Some("Alice")).await;
        let bob = seed_user(&repo, "bob@example.com", None).await;

        let first = seed_list(&repo, &alice, "Birthday").await;
        let second = seed_list(&repo, &bob, "Holidays").await;
        seed_item(&repo, &first, "Bike").await;
        seed_item(&repo, &first, "Book").await;

        let all = repo.list_wishlists().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].wishlist.id, first.id);
        assert_eq!(all[0].owner_name.as_deref(), Some("Alice"));
        assert_eq!(all[0].items_count, 2);
        assert_eq!(all[1].wishlist.id, second.id);
        assert_eq!(all[1].owner_name.as_deref(), Some("bob"));
        assert_eq!(all[1].items_count, 0);

        let bobs = repo.list_wishlists_by_owner(bob.id).await.unwrap();
        assert_eq!(bobs.len(), 1);
        assert_eq!(bobs[0].wishlist.title, "Holidays");
    }

    #[tokio::test]
    async fn test_add_item_requires_wishlist() {
        let repo = repo().await;
        let item = WishItem::new(Uuid::new_v4(), "Ghost");

        let result = repo.add_item(&item).await;

        assert_eq!(result, Err(RepositoryError::not_found("WishList", item.wishlist_id)));
    }

    #[tokio::test]
    async fn test_toggle_alternates_across_users() {
        let repo = repo().await;
        let owner = seed_user(&repo, "owner@example.com", None).await;
        let alice = seed_user(&repo, "alice@example.com", Some("Alice")).await;
        let bob = seed_user(&repo, "bob@example.com", Some("Bob")).await;
        let list = seed_list(&repo, &owner, "Birthday").await;
        let item = seed_item(&repo, &list, "Bike").await;

        assert_eq!(repo.current_state(item.id).await.unwrap(), ItemState::default());

        let first = repo.toggle(item.id, alice.id).await.unwrap();
        assert!(first.marked);
        let state = repo.current_state(item.id).await.unwrap();
        assert!(state.is_marked);
        assert_eq!(state.marked_by.as_deref(), Some("Alice"));
        assert_eq!(state.marked_at, Some(first.created_at));

        let second = repo.toggle(item.id, bob.id).await.unwrap();
        assert!(!second.marked);
        assert!(second.created_at > first.created_at);
        let state = repo.current_state(item.id).await.unwrap();
        assert!(!state.is_marked);
        assert!(state.marked_by.is_none());
        assert!(state.marked_at.is_none());
    }

    #[tokio::test]
    async fn test_history_is_newest_first_with_names() {
        let repo = repo().await;
        let owner = seed_user(&repo, "owner@example.com", None).await;
        let alice = seed_user(&repo, "alice@example.com", Some("Alice")).await;
        let list = seed_list(&repo, &owner, "Birthday").await;
        let item = seed_item(&repo, &list, "Bike").await;

        repo.toggle(item.id, alice.id).await.unwrap();
        repo.toggle(item.id, owner.id).await.unwrap();
        repo.toggle(item.id, alice.id).await.unwrap();

        let history = repo.history(item.id).await.unwrap();
        let marks: Vec<bool> = history.iter().map(|e| e.record.marked).collect();
        let names: Vec<&str> = history
            .iter()
            .map(|e| e.user_name.as_deref().unwrap())
            .collect();

        assert_eq!(marks, vec![true, false, true]);
        assert_eq!(names, vec!["Alice", "owner", "Alice"]);
    }

    #[tokio::test]
    async fn test_item_views_carry_latest_state() {
        let repo = repo().await;
        let owner = seed_user(&repo, "owner@example.com", Some("Olive")).await;
        let list = seed_list(&repo, &owner, "Birthday").await;
        let bike = seed_item(&repo, &list, "Bike").await;
        let book = seed_item(&repo, &list, "Book").await;

        repo.toggle(bike.id, owner.id).await.unwrap();

        let items = repo.list_items(list.id).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].item.id, bike.id);
        assert!(items[0].state.is_marked);
        assert_eq!(items[0].state.marked_by.as_deref(), Some("Olive"));
        assert_eq!(items[1].item.id, book.id);
        assert!(!items[1].state.is_marked);

        let detail = repo.get_wishlist_detail(list.id).await.unwrap().unwrap();
        assert_eq!(detail.items_count, 2);
        assert_eq!(detail.owner_name.as_deref(), Some("Olive"));
        assert_eq!(detail.items, items);
    }

    #[tokio::test]
    async fn test_toggle_unknown_item_is_not_found() {
        let repo = repo().await;
        let user = seed_user(&repo, "alice@example.com", None).await;
        let missing = Uuid::new_v4();

        let result = repo.toggle(missing, user.id).await;

        assert_eq!(result, Err(RepositoryError::not_found("WishItem", missing)));
    }

    #[tokio::test]
    async fn test_delete_wishlist_cascades() {
        let repo = repo().await;
        let owner = seed_user(&repo, "owner@example.com", None).await;
        let list = seed_list(&repo, &owner, "Birthday").await;
        let bike = seed_item(&repo, &list, "Bike").await;
        let book = seed_item(&repo, &list, "Book").await;
        repo.toggle(bike.id, owner.id).await.unwrap();

        let mut removed = repo.delete_wishlist(list.id).await.unwrap();
        removed.sort();
        let mut expected = vec![bike.id, book.id];
        expected.sort();

        assert_eq!(removed, expected);
        assert!(repo.get_wishlist(list.id).await.unwrap().is_none());
        assert!(repo.get_item(bike.id).await.unwrap().is_none());
        assert!(repo.history(bike.id).await.unwrap().is_empty());
        assert_eq!(
            repo.delete_wishlist(list.id).await,
            Err(RepositoryError::not_found("WishList", list.id))
        );
    }

    #[tokio::test]
    async fn test_delete_item_removes_history() {
        let repo = repo().await;
        let owner = seed_user(&repo, "owner@example.com", None).await;
        let list = seed_list(&repo, &owner, "Birthday").await;
        let bike = seed_item(&repo, &list, "Bike").await;
        repo.toggle(bike.id, owner.id).await.unwrap();

        repo.delete_item(bike.id).await.unwrap();

        assert!(repo.history(bike.id).await.unwrap().is_empty());
        assert!(repo.list_items(list.id).await.unwrap().is_empty());
        assert_eq!(
            repo.delete_item(bike.id).await,
            Err(RepositoryError::not_found("WishItem", bike.id))
        );
    }

    #[tokio::test]
    async fn test_concurrent_toggles_keep_alternation() {
        let repo = Arc::new(repo().await);
        let owner = seed_user(&repo, "owner@example.com", None).await;
        let list = seed_list(&repo, &owner, "Birthday").await;
        let item = seed_item(&repo, &list, "Bike").await;

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.toggle(item.id, owner.id).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let history = repo.history(item.id).await.unwrap();
        assert_eq!(history.len(), 10);
        // Newest first, so the latest of an even count is an unmark.
        for (i, entry) in history.iter().enumerate() {
            assert_eq!(entry.record.marked, i % 2 == 1);
        }
        assert!(!repo.current_state(item.id).await.unwrap().is_marked);
    }
}
