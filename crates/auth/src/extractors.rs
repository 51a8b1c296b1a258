//! Axum extractors for authentication.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use wishlist_core::auth::{parse_bearer, AuthError as CoreError};
use wishlist_core::wishlist::User;

use crate::{AuthError, AuthState};

/// Extractor for the user named by the request's bearer token.
///
/// Rejects with 401 and `WWW-Authenticate: Bearer` when the header is
/// missing, malformed, expired, or names an unknown user.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(CoreError::MissingToken)?
            .to_str()
            .map_err(|_| CoreError::InvalidToken("non-ASCII authorization header".to_string()))?;

        let token = parse_bearer(header).ok_or(CoreError::MissingToken)?;

        let user = auth_state.user_for_token(token).await?;

        Ok(CurrentUser(user))
    }
}
