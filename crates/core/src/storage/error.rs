use thiserror::Error;

/// Failures reported by a store backend.
///
/// `entity_type` is one of `"User"`, `"WishList"`, `"WishItem"` or
/// `"StatusRecord"`; handlers pick their response message from it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    /// The store could not be reached, or stayed locked past the busy timeout.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    /// A stored value could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// A write was rejected by a constraint other than uniqueness.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        RepositoryError::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    pub fn already_exists(entity_type: &'static str, id: impl ToString) -> Self {
        RepositoryError::AlreadyExists {
            entity_type,
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
