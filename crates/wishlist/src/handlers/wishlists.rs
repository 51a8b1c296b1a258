//! Wish list handlers.

use axum::{extract::State, Json};
use uuid::Uuid;

use wishlist_auth::CurrentUser;
use wishlist_core::wishlist::{WishListDetail, WishListView};

use super::authz::require_owner;
use super::extract::{ApiJson, ApiPath};
use crate::{handlers::ApiError, models::CreateWishList, state::AppState};

/// Create a wish list owned by the caller (POST /wishlists).
pub async fn create_wishlist(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateWishList>,
) -> Result<Json<WishListView>, ApiError> {
    let wishlist = payload.into_wishlist(user.id)?;

    state.store.create_wishlist(&wishlist).await?;

    tracing::info!(wishlist_id = %wishlist.id, user_id = %user.id, "Created wish list");

    Ok(Json(WishListView {
        wishlist,
        owner_name: Some(user.display_name()),
        items_count: 0,
    }))
}

/// List every wish list (GET /wishlists).
pub async fn list_wishlists(
    State(state): State<AppState>,
) -> Result<Json<Vec<WishListView>>, ApiError> {
    Ok(Json(state.store.list_wishlists().await?))
}

/// List the caller's wish lists (GET /my-wishlists).
pub async fn list_my_wishlists(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<WishListView>>, ApiError> {
    Ok(Json(state.store.list_wishlists_by_owner(user.id).await?))
}

/// Get one wish list with its items (GET /wishlists/{id}).
pub async fn get_wishlist(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<WishListDetail>, ApiError> {
    state
        .store
        .get_wishlist_detail(id)
        .await?
        .map(Json)
        .ok_or_else(ApiError::wishlist_not_found)
}

/// Delete a wish list with its items and history (DELETE /wishlists/{id}).
pub async fn delete_wishlist(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<WishListView>, ApiError> {
    let wishlist = require_owner(state.store.as_ref(), id, user.id).await?;

    let removed = state.store.delete_wishlist(id).await?;

    tracing::info!(wishlist_id = %id, items = removed.len(), "Deleted wish list");

    Ok(Json(WishListView {
        wishlist,
        owner_name: Some(user.display_name()),
        items_count: removed.len(),
    }))
}
