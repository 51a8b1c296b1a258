use axum::{extract::State, Json};
use uuid::Uuid;

use wishlist_auth::CurrentUser;
use wishlist_core::wishlist::StatusEntry;

use super::authz::{require_item_in, require_owner};
use super::extract::ApiPath;
use crate::{handlers::ApiError, state::AppState};

/// Status history of an item, newest first; owner only
/// (GET /wishlists/{id}/items/{item_id}/statuses).
pub async fn item_history(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiPath((wishlist_id, item_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<Vec<StatusEntry>>, ApiError> {
    require_owner(state.store.as_ref(), wishlist_id, user.id).await?;
    require_item_in(state.store.as_ref(), wishlist_id, item_id).await?;

    Ok(Json(state.store.history(item_id).await?))
}
