//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the read-only store catalog loaded at startup and an in-memory map of
//! saved grid layouts keyed by store id. Layouts are opaque to the server
//! beyond their grid shape; nothing is persisted across restarts.

use std::collections::HashMap;
use std::sync::Arc;

use scene::StoreCatalog;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::sync::RwLock;

// =============================================================================
// LAYOUT RECORD
// =============================================================================

/// Grid dimensions for a saved layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    /// Cell edge length in meters.
    pub cell_size: f64,
    pub cols: usize,
    pub rows: usize,
}

/// Row-major grid of fixture ids; `None` marks an empty cell.
pub type GridLayout = Vec<Vec<Option<String>>>;

/// A saved layout for one store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreLayout {
    pub store_id: String,
    pub grid_layout: GridLayout,
    pub grid_config: Option<GridConfig>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Layout as returned by the layout routes. Creation time stays server-side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResponse {
    pub store_id: String,
    pub grid_layout: GridLayout,
    pub grid_config: Option<GridConfig>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<StoreLayout> for LayoutResponse {
    fn from(layout: StoreLayout) -> Self {
        Self {
            store_id: layout.store_id,
            grid_layout: layout.grid_layout,
            grid_config: layout.grid_config,
            updated_at: layout.updated_at,
        }
    }
}

// =============================================================================
// APP STATE
// =============================================================================

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<StoreCatalog>,
    pub layouts: Arc<RwLock<HashMap<String, StoreLayout>>>,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: StoreCatalog) -> Self {
        Self { catalog: Arc::new(catalog), layouts: Arc::new(RwLock::new(HashMap::new())) }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use std::path::PathBuf;

    use super::*;

    /// State over the bundled sample catalog in `data/stores`.
    #[must_use]
    pub fn test_app_state() -> AppState {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/stores");
        let catalog = StoreCatalog::load_dir(&dir).expect("bundled catalog should load");
        AppState::new(catalog)
    }

    /// Id of a store present in the bundled catalog.
    #[must_use]
    pub fn sample_store_id(state: &AppState) -> String {
        state.catalog.ids().first().map(|id| (*id).to_owned()).expect("bundled catalog is not empty")
    }

    /// A `rows` × `cols` grid with every cell empty.
    #[must_use]
    pub fn empty_grid(rows: usize, cols: usize) -> GridLayout {
        vec![vec![None; cols]; rows]
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
