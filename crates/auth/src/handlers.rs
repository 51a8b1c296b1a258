//! HTTP handlers for auth routes.

use axum::{
    extract::State,
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use wishlist_core::auth::AccessToken;
use wishlist_core::serde::deserialize_optional_string;
use wishlist_core::wishlist::User;

use crate::error::AuthError;
use crate::extractors::CurrentUser;
use crate::AuthState;

/// Body of `POST /register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub full_name: Option<String>,
    pub password: String,
}

/// OAuth2 password-grant form accepted by `POST /token`.
#[derive(Debug, Deserialize)]
pub struct TokenForm {
    /// The user's email.
    pub username: String,
    pub password: String,
}

/// Creates the auth router.
///
/// Routes:
/// - `POST /register` - Create a user from JSON `{email, full_name?, password}`
/// - `POST /token` - Exchange form `username`/`password` for a bearer token
/// - `GET /users/me` - Get the current authenticated user
pub fn auth_routes() -> Router<AuthState> {
    Router::new()
        .route("/register", post(register))
        .route("/token", post(token))
        .route("/users/me", get(me))
}

#[axum::debug_handler(state = AuthState)]
async fn register(
    State(state): State<AuthState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<User>, AuthError> {
    let user = state
        .register(&request.email, &request.password, request.full_name)
        .await?;
    Ok(Json(user))
}

#[axum::debug_handler(state = AuthState)]
async fn token(
    State(state): State<AuthState>,
    Form(form): Form<TokenForm>,
) -> Result<Json<AccessToken>, AuthError> {
    let user = state.authenticate(&form.username, &form.password).await?;
    let token = state.issue_token(&user)?;

    tracing::debug!(user_id = %user.id, "Issued access token");
    Ok(Json(token))
}

async fn me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}
