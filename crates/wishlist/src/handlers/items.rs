//! Item handlers.

use axum::{extract::State, Json};
use uuid::Uuid;

use wishlist_auth::CurrentUser;
use wishlist_core::wishlist::ItemView;

use super::authz::{find_wishlist, require_item_in, require_owner};
use super::extract::{ApiJson, ApiPath};
use crate::{
    handlers::ApiError,
    models::{CreateItem, MarkResponse},
    state::AppState,
};

/// Add an item to one of the caller's wish lists (POST /wishlists/{id}/items).
pub async fn add_item(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiPath(wishlist_id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<CreateItem>,
) -> Result<Json<ItemView>, ApiError> {
    require_owner(state.store.as_ref(), wishlist_id, user.id).await?;
    let item = payload.into_item(wishlist_id)?;

    state.store.add_item(&item).await?;

    tracing::info!(item_id = %item.id, wishlist_id = %wishlist_id, "Added item");

    Ok(Json(ItemView::unmarked(item)))
}

/// Delete an item from one of the caller's wish lists
/// (DELETE /wishlists/{id}/items/{item_id}).
///
/// Returns the item as it was before deletion.
pub async fn delete_item(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiPath((wishlist_id, item_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<ItemView>, ApiError> {
    require_owner(state.store.as_ref(), wishlist_id, user.id).await?;
    let item = require_item_in(state.store.as_ref(), wishlist_id, item_id).await?;
    let item_state = state.store.current_state(item_id).await?;

    state.store.delete_item(item_id).await?;

    tracing::info!(item_id = %item_id, wishlist_id = %wishlist_id, "Deleted item");

    Ok(Json(ItemView::new(item, item_state)))
}

/// List the items of a wish list with their marked state
/// (GET /wishlists/{id}/items).
pub async fn list_items(
    State(state): State<AppState>,
    ApiPath(wishlist_id): ApiPath<Uuid>,
) -> Result<Json<Vec<ItemView>>, ApiError> {
    find_wishlist(state.store.as_ref(), wishlist_id).await?;
    Ok(Json(state.store.list_items(wishlist_id).await?))
}

/// Toggle an item's marked state (POST /wishlists/{id}/items/{item_id}/mark).
///
/// Any authenticated user may toggle, including the owner.
pub async fn mark_item(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiPath((wishlist_id, item_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<MarkResponse>, ApiError> {
    find_wishlist(state.store.as_ref(), wishlist_id).await?;
    require_item_in(state.store.as_ref(), wishlist_id, item_id).await?;

    let record = state.store.toggle(item_id, user.id).await?;

    tracing::info!(
        item_id = %item_id,
        user_id = %user.id,
        marked = record.marked,
        "Toggled item status"
    );

    Ok(Json(MarkResponse::new(record.marked)))
}
