//! Static store registry.
//!
//! DESIGN
//! ======
//! Stores are seeded from JSON files, one store per file, and kept in a
//! `BTreeMap` so listings come out in id order. The scene core trusts whatever
//! it is handed, so loading runs `lint_store` over each store and logs what it
//! finds without rejecting anything.
//!
//! ERROR HANDLING
//! ==============
//! Only I/O failures, malformed JSON, and duplicate store ids fail a load.
//! Layout problems (overlaps, walls cutting through fixtures, bad shelf data)
//! are reported as `StoreIssue`s.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::bounds::{fixture_bounds, wall_bounds};
use crate::model::{Store, StoreListItem};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate store id: {0}")]
    DuplicateStore(String),
}

/// A layout problem found by `lint_store`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreIssue {
    NonPositiveDimensions { fixture_id: String },
    /// Shelf count and heights disagree, or a shelf sits outside the frame.
    InconsistentStructure { fixture_id: String },
    FixtureOverlap { first: String, second: String },
    WallPenetration { fixture_id: String, wall_id: String },
    UnknownCategory { fixture_id: String, category_id: String },
}

impl fmt::Display for StoreIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveDimensions { fixture_id } => {
                write!(f, "fixture {fixture_id} has a non-positive dimension")
            }
            Self::InconsistentStructure { fixture_id } => {
                write!(f, "fixture {fixture_id} has inconsistent shelf data")
            }
            Self::FixtureOverlap { first, second } => write!(f, "fixtures {first} and {second} overlap"),
            Self::WallPenetration { fixture_id, wall_id } => {
                write!(f, "fixture {fixture_id} intersects wall {wall_id}")
            }
            Self::UnknownCategory { fixture_id, category_id } => {
                write!(f, "fixture {fixture_id} references unknown category {category_id}")
            }
        }
    }
}

// =============================================================================
// CATALOG
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct StoreCatalog {
    stores: BTreeMap<String, Store>,
}

impl StoreCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a store, replacing any store with the same id. Returns the
    /// replaced store.
    pub fn insert(&mut self, store: Store) -> Option<Store> {
        self.stores.insert(store.meta.id.clone(), store)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Store> {
        self.stores.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.stores.contains_key(id)
    }

    /// Store ids in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.stores.keys().map(String::as_str).collect()
    }

    /// Listing entries in id order.
    #[must_use]
    pub fn list(&self) -> Vec<StoreListItem> {
        self.stores.values().map(Store::summary).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Build a catalog from a JSON array of stores.
    ///
    /// # Errors
    ///
    /// Returns `Parse` for malformed JSON and `DuplicateStore` when two
    /// entries share an id.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let stores: Vec<Store> = serde_json::from_str(json).map_err(|source| CatalogError::Parse {
            origin: "inline catalog".to_owned(),
            source,
        })?;
        let mut catalog = Self::new();
        for store in stores {
            catalog.add_new(store)?;
        }
        Ok(catalog)
    }

    /// Load every `*.json` file in `dir`, one store per file, in file-name
    /// order.
    ///
    /// # Errors
    ///
    /// Returns `Io` when the directory or a file cannot be read, `Parse` when
    /// a file is not a valid store, and `DuplicateStore` when two files
    /// declare the same id.
    pub fn load_dir(dir: &Path) -> Result<Self, CatalogError> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_error(dir))? {
            let path = entry.map_err(io_error(dir))?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();

        let mut catalog = Self::new();
        for path in &files {
            let json = fs::read_to_string(path).map_err(io_error(path))?;
            let store: Store = serde_json::from_str(&json).map_err(|source| CatalogError::Parse {
                origin: path.display().to_string(),
                source,
            })?;
            for issue in lint_store(&store) {
                warn!(store_id = %store.meta.id, file = %path.display(), %issue, "store lint");
            }
            catalog.add_new(store)?;
        }

        info!(dir = %dir.display(), stores = catalog.len(), "store catalog loaded");
        Ok(catalog)
    }

    fn add_new(&mut self, store: Store) -> Result<(), CatalogError> {
        if self.contains(&store.meta.id) {
            return Err(CatalogError::DuplicateStore(store.meta.id));
        }
        self.insert(store);
        Ok(())
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> CatalogError {
    let path = path.to_path_buf();
    move |source| CatalogError::Io { path, source }
}

// =============================================================================
// LINT
// =============================================================================

/// Report layout problems in `store`. Never fails; an empty result means the
/// store is clean.
#[must_use]
pub fn lint_store(store: &Store) -> Vec<StoreIssue> {
    let mut issues = Vec::new();
    let categories: HashSet<&str> = store.product_categories.iter().map(|c| c.id.as_str()).collect();

    for fixture in &store.fixtures {
        let d = fixture.dimensions;
        if d.width <= 0.0 || d.height <= 0.0 || d.depth <= 0.0 {
            issues.push(StoreIssue::NonPositiveDimensions { fixture_id: fixture.id.clone() });
        }
        if !fixture.structure.is_consistent(d.height) {
            issues.push(StoreIssue::InconsistentStructure { fixture_id: fixture.id.clone() });
        }
        if let Some(category_id) = &fixture.category_id
            && !categories.contains(category_id.as_str())
        {
            issues.push(StoreIssue::UnknownCategory {
                fixture_id: fixture.id.clone(),
                category_id: category_id.clone(),
            });
        }
    }

    let bounds: Vec<_> = store.fixtures.iter().map(fixture_bounds).collect();
    for (i, first) in store.fixtures.iter().enumerate() {
        for (j, second) in store.fixtures.iter().enumerate().skip(i + 1) {
            if bounds[i].overlaps(&bounds[j]) {
                issues.push(StoreIssue::FixtureOverlap {
                    first: first.id.clone(),
                    second: second.id.clone(),
                });
            }
        }
        for wall in &store.walls {
            if bounds[i].overlaps_wall(&wall_bounds(wall)) {
                issues.push(StoreIssue::WallPenetration {
                    fixture_id: first.id.clone(),
                    wall_id: wall.id.clone(),
                });
            }
        }
    }

    issues
}
