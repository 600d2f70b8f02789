use super::{ApiError, body::ItemBody, state::AppState};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use wishlist_core::{Item, ItemPatch, ItemSpec};

pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, ApiError> {
    Ok(Json(state.core.items.list()?))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Item>, ApiError> {
    Ok(Json(state.core.items.get(&key)?))
}

pub async fn create_item(
    State(state): State<AppState>,
    Path(key): Path<String>,
    ItemBody(spec): ItemBody<ItemSpec>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let item = state.core.items.create(&key, spec)?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(key): Path<String>,
    ItemBody(patch): ItemBody<ItemPatch>,
) -> Result<Json<Item>, ApiError> {
    Ok(Json(state.core.items.update(&key, &patch)?))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.core.items.delete(&key)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_owned(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Item>, ApiError> {
    Ok(Json(state.core.items.toggle_owned(&key)?))
}

pub async fn random_item(State(state): State<AppState>) -> Result<Json<Item>, ApiError> {
    Ok(Json(state.core.items.pick_random_unowned()?))
}
