//! HTTP status codes for store failures.

use super::RepositoryError;

/// Status code a handler should answer with for `error`.
///
/// A duplicate is a client mistake (400, e.g. an email that is already
/// registered); an unreachable store is 503 so clients may retry; decoding
/// and query failures are 500.
///
/// ```
/// use wishlist_core::storage::{repository_error_to_status_code, RepositoryError};
///
/// let error = RepositoryError::not_found("WishList", "abc-123");
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } | RepositoryError::InvalidData(_) => 400,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) | RepositoryError::Serialization(_) => 500,
    }
}
