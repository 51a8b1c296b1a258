use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Cache operation failed: {0}")]
    OperationFailed(String),
    #[error("Cache operation timed out after {0}ms")]
    Timeout(u64),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid cache configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

impl From<super::serialization::SerializationError> for CacheError {
    fn from(err: super::serialization::SerializationError) -> Self {
        CacheError::Serialization(err.to_string())
    }
}
