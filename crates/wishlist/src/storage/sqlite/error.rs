//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `RepositoryError`.
//! Constraint violations become semantic variants; lock contention and
//! closed connections become `ConnectionFailed`.

use rusqlite::ffi;
use rusqlite::ErrorCode;
use wishlist_core::storage::RepositoryError;

/// Maps a rusqlite error to a RepositoryError.
///
/// # Error Mapping
///
/// - UNIQUE / PRIMARY KEY constraint → `RepositoryError::AlreadyExists`
/// - FOREIGN KEY constraint → `RepositoryError::InvalidData`
/// - Cannot open, busy, locked → `RepositoryError::ConnectionFailed`
/// - `QueryReturnedNoRows` → `RepositoryError::NotFound`
/// - All other errors → `RepositoryError::QueryFailed`
fn map_rusqlite_error(
    err: &rusqlite::Error,
    entity_type: &'static str,
    id: Option<&str>,
) -> RepositoryError {
    let id = || id.unwrap_or("unknown").to_string();

    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if matches!(
                sqlite_err.extended_code,
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY
            ) =>
        {
            RepositoryError::already_exists(entity_type, id())
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
        {
            RepositoryError::InvalidData(format!(
                "Foreign key constraint violation for {entity_type}"
            ))
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if matches!(
                sqlite_err.code,
                ErrorCode::CannotOpen | ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked
            ) =>
        {
            RepositoryError::ConnectionFailed(err.to_string())
        }

        rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
            entity_type,
            id: id(),
        },

        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

fn map_error(
    err: tokio_rusqlite::Error,
    entity_type: &'static str,
    id: Option<&str>,
) -> RepositoryError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => {
            map_rusqlite_error(rusqlite_err, entity_type, id)
        }
        tokio_rusqlite::Error::ConnectionClosed | tokio_rusqlite::Error::Close(_) => {
            RepositoryError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error to a RepositoryError.
pub fn map_tokio_rusqlite_error(
    err: tokio_rusqlite::Error,
    entity_type: &'static str,
) -> RepositoryError {
    map_error(err, entity_type, None)
}

/// Maps a tokio_rusqlite error when the entity ID is known at the call site.
pub fn map_tokio_rusqlite_error_with_id(
    err: tokio_rusqlite::Error,
    entity_type: &'static str,
    id: impl ToString,
) -> RepositoryError {
    map_error(err, entity_type, Some(&id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(code: ErrorCode, extended_code: i32) -> tokio_rusqlite::Error {
        let sqlite_err = ffi::Error {
            code,
            extended_code,
        };
        tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(sqlite_err, None))
    }

    #[test]
    fn test_unique_constraint_maps_to_already_exists() {
        let err = failure(ErrorCode::ConstraintViolation, ffi::SQLITE_CONSTRAINT_UNIQUE);

        let result = map_tokio_rusqlite_error_with_id(err, "User", "alice@example.com");

        assert_eq!(
            result,
            RepositoryError::AlreadyExists {
                entity_type: "User",
                id: "alice@example.com".to_string(),
            }
        );
    }

    #[test]
    fn test_foreign_key_maps_to_invalid_data() {
        let err = failure(ErrorCode::ConstraintViolation, ffi::SQLITE_CONSTRAINT_FOREIGNKEY);

        let result = map_tokio_rusqlite_error(err, "WishItem");

        assert!(matches!(result, RepositoryError::InvalidData(_)));
    }

    #[test]
    fn test_busy_maps_to_connection_failed() {
        let err = failure(ErrorCode::DatabaseBusy, ffi::SQLITE_BUSY);

        let result = map_tokio_rusqlite_error(err, "StatusRecord");

        assert!(matches!(result, RepositoryError::ConnectionFailed(_)));
    }

    #[test]
    fn test_no_rows_maps_to_not_found() {
        let err = tokio_rusqlite::Error::Rusqlite(rusqlite::Error::QueryReturnedNoRows);

        let result = map_tokio_rusqlite_error(err, "WishList");

        assert_eq!(result, RepositoryError::not_found("WishList", "unknown"));
    }

    #[test]
    fn test_error_with_id_preserves_id() {
        let err = tokio_rusqlite::Error::Rusqlite(rusqlite::Error::QueryReturnedNoRows);

        let result = map_tokio_rusqlite_error_with_id(err, "WishItem", "abc-123");

        assert_eq!(result, RepositoryError::not_found("WishItem", "abc-123"));
    }

    #[test]
    fn test_closed_connection_maps_to_connection_failed() {
        let result = map_tokio_rusqlite_error(tokio_rusqlite::Error::ConnectionClosed, "User");

        assert!(matches!(result, RepositoryError::ConnectionFailed(_)));
    }

    #[test]
    fn test_other_error_maps_to_query_failed() {
        let err = tokio_rusqlite::Error::Other(Box::new(std::io::Error::other("test error")));

        let result = map_tokio_rusqlite_error(err, "User");

        assert!(matches!(result, RepositoryError::QueryFailed(_)));
    }
}
