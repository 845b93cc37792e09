//! Layout service: per-store key-value storage of grid layouts.
//!
//! DESIGN
//! ======
//! One layout per store id, upserted whole. A save that omits `gridConfig`
//! keeps the stored config. Store ids are not checked against the catalog, so
//! layouts can be staged before a store is seeded.
//!
//! ERROR HANDLING
//! ==============
//! Reads of a missing layout return `NotFound`. Saves are rejected with
//! `InvalidGrid` when the grid disagrees with the effective config; nothing
//! is written in that case. Deletes are idempotent.

use time::OffsetDateTime;
use tracing::{debug, info};

use crate::state::{AppState, GridConfig, GridLayout, StoreLayout};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("layout not found: {0}")]
    NotFound(String),
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
}

/// Body of a layout save.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutUpdate {
    pub grid_layout: GridLayout,
    #[serde(default)]
    pub grid_config: Option<GridConfig>,
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Fetch the saved layout for `store_id`.
///
/// # Errors
///
/// Returns `NotFound` if no layout has been saved.
pub async fn get_layout(state: &AppState, store_id: &str) -> Result<StoreLayout, LayoutError> {
    let layouts = state.layouts.read().await;
    layouts.get(store_id).cloned().ok_or_else(|| LayoutError::NotFound(store_id.to_owned()))
}

/// Create or replace the layout for `store_id`.
///
/// # Errors
///
/// Returns `InvalidGrid` if the grid does not match the config that would be
/// stored.
pub async fn save_layout(state: &AppState, store_id: &str, update: LayoutUpdate) -> Result<StoreLayout, LayoutError> {
    let now = OffsetDateTime::now_utc();
    let mut layouts = state.layouts.write().await;
    let existing = layouts.get(store_id);

    let grid_config = update.grid_config.or_else(|| existing.and_then(|l| l.grid_config));
    validate_grid(&update.grid_layout, grid_config)?;

    let created_at = existing.map_or(now, |l| l.created_at);
    let layout = StoreLayout {
        store_id: store_id.to_owned(),
        grid_layout: update.grid_layout,
        grid_config,
        created_at,
        updated_at: now,
    };
    let replaced = layouts.insert(store_id.to_owned(), layout.clone()).is_some();
    info!(%store_id, replaced, "layout saved");
    Ok(layout)
}

/// Remove the layout for `store_id`. Returns whether one existed.
pub async fn delete_layout(state: &AppState, store_id: &str) -> bool {
    let removed = state.layouts.write().await.remove(store_id).is_some();
    debug!(%store_id, removed, "layout delete");
    removed
}

/// Check that `grid` is `rows` × `cols` and the cell size is positive. A grid
/// with no config is only required to be rectangular.
pub(crate) fn validate_grid(grid: &GridLayout, config: Option<GridConfig>) -> Result<(), LayoutError> {
    let width = grid.first().map_or(0, Vec::len);
    if grid.iter().any(|row| row.len() != width) {
        return Err(LayoutError::InvalidGrid("rows have different lengths".into()));
    }
    let Some(config) = config else {
        return Ok(());
    };
    if config.cell_size <= 0.0 || !config.cell_size.is_finite() {
        return Err(LayoutError::InvalidGrid(format!("cell size {} must be positive", config.cell_size)));
    }
    if grid.len() != config.rows || width != config.cols {
        return Err(LayoutError::InvalidGrid(format!(
            "grid is {}x{}, config is {}x{}",
            grid.len(),
            width,
            config.rows,
            config.cols
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod tests;
