use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use wishlist_core::auth::{AuthError, ValidationError};
use wishlist_core::storage::{repository_error_to_status_code, RepositoryError};

/// Errors returned by the wish list handlers, rendered as `{"detail": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("Not enough permissions")]
    Forbidden,

    #[error("{0}")]
    Conflict(String),

    #[error("Could not validate credentials")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    /// Malformed path segment or request body, with the extractor's status.
    #[error("{1}")]
    Rejected(StatusCode, String),

    #[error("Service temporarily unavailable")]
    ServiceDegraded,

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    pub fn wishlist_not_found() -> Self {
        ApiError::NotFound("Wishlist not found".to_string())
    }

    pub fn item_not_found() -> Self {
        ApiError::NotFound("Item not found".to_string())
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Rejected(status, _) => *status,
            ApiError::ServiceDegraded => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Internal(err) = &self {
            tracing::error!(error = ?err, "Request failed");
        }

        let mut response = (status, Json(json!({ "detail": self.to_string() }))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match (&err, repository_error_to_status_code(&err)) {
            (RepositoryError::NotFound { entity_type, .. }, _) => match *entity_type {
                "WishList" => ApiError::wishlist_not_found(),
                "WishItem" => ApiError::item_not_found(),
                other => ApiError::NotFound(format!("{other} not found")),
            },
            (RepositoryError::AlreadyExists { .. }, _) => ApiError::Conflict(err.to_string()),
            (_, 400) => ApiError::BadRequest(err.to_string()),
            (_, 503) => {
                tracing::error!(error = %err, "Store unavailable");
                ApiError::ServiceDegraded
            }
            _ => ApiError::Internal(err.into()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        if err.is_unauthorized() {
            ApiError::Unauthorized
        } else {
            ApiError::Internal(err.into())
        }
    }
}
