use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("incorrect email or password")]
    InvalidCredentials,

    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token expired")]
    TokenExpired,

    #[error("user not found")]
    UserNotFound,

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("token encoding failed: {0}")]
    Encoding(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl AuthError {
    /// Whether the error is the caller's fault (401) rather than ours (500).
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials
                | AuthError::MissingToken
                | AuthError::InvalidToken(_)
                | AuthError::TokenExpired
                | AuthError::UserNotFound
        )
    }
}
