//! Store catalog and layout routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use scene::Store;
use scene::model::StoreListItem;

use crate::services::layout::{self, LayoutUpdate};
use crate::state::{AppState, LayoutResponse};

/// `GET /api/stores`: catalog summaries in id order.
pub async fn list_stores(State(state): State<AppState>) -> Json<Vec<StoreListItem>> {
    Json(state.catalog.list())
}

/// `GET /api/stores/:id`: the full store document.
pub async fn get_store(State(state): State<AppState>, Path(store_id): Path<String>) -> Result<Json<Store>, StatusCode> {
    state.catalog.get(&store_id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// `GET /api/stores/:id/layout`: the saved grid layout.
pub async fn get_layout(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<Json<LayoutResponse>, StatusCode> {
    let layout = layout::get_layout(&state, &store_id).await.map_err(layout_error_to_status)?;
    Ok(Json(layout.into()))
}

/// `PUT /api/stores/:id/layout`: create or replace the grid layout.
pub async fn put_layout(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    Json(body): Json<LayoutUpdate>,
) -> Result<Json<LayoutResponse>, StatusCode> {
    let layout = layout::save_layout(&state, &store_id, body).await.map_err(layout_error_to_status)?;
    Ok(Json(layout.into()))
}

/// `DELETE /api/stores/:id/layout`: remove the layout if present.
pub async fn delete_layout(State(state): State<AppState>, Path(store_id): Path<String>) -> StatusCode {
    layout::delete_layout(&state, &store_id).await;
    StatusCode::NO_CONTENT
}

pub(crate) fn layout_error_to_status(err: layout::LayoutError) -> StatusCode {
    match err {
        layout::LayoutError::NotFound(_) => StatusCode::NOT_FOUND,
        layout::LayoutError::InvalidGrid(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

#[cfg(test)]
#[path = "stores_test.rs"]
mod tests;
