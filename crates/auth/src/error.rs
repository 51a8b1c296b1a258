use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use wishlist_core::auth::ValidationError;
use wishlist_core::storage::RepositoryError;

/// Auth errors for the wishlist_auth crate.
///
/// This wraps the core `AuthError` and adds variants for the registration
/// and request-handling paths.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Error from the core auth module (credentials, tokens, hashing).
    #[error(transparent)]
    Core(#[from] wishlist_core::auth::AuthError),

    /// Rejected registration input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The email is already taken.
    #[error("Email already registered")]
    EmailTaken,

    /// Failure reading or writing users.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl AuthError {
    fn status_and_detail(&self) -> (StatusCode, String) {
        use wishlist_core::auth::AuthError as CoreError;

        match self {
            AuthError::Core(CoreError::InvalidCredentials) => (
                StatusCode::UNAUTHORIZED,
                "Incorrect email or password".to_string(),
            ),
            AuthError::Core(core_err) if core_err.is_unauthorized() => (
                StatusCode::UNAUTHORIZED,
                "Could not validate credentials".to_string(),
            ),
            AuthError::Core(_) => {
                tracing::error!(error = %self, "Auth error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AuthError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AuthError::EmailTaken => (StatusCode::BAD_REQUEST, self.to_string()),
            AuthError::Repository(RepositoryError::ConnectionFailed(_)) => {
                tracing::error!(error = %self, "User store unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Service temporarily unavailable".to_string(),
                )
            }
            AuthError::Repository(_) => {
                tracing::error!(error = %self, "User store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();
        let mut response = (status, Json(json!({ "detail": detail }))).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}
