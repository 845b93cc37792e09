//! Scene state store: navigation, selection, edit mode and the live fixture list.
//!
//! DESIGN
//! ======
//! `SceneStore` is an ordinary value. The host owns one per editing session and
//! passes it by reference to interaction handlers and the camera controller;
//! tests build as many as they like. Every command either applies completely or
//! leaves the store untouched.
//!
//! The fixture list is a working copy taken from the store on load. Mutations
//! change the working copy only; `current_store().fixtures` keeps the loaded
//! snapshot.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here fails. Unknown ids and out-of-state commands are no-ops that
//! leave a `trace` event behind. Collision checks are the caller's job:
//! `move_fixture` and `rotate_fixture_to` overwrite unconditionally.
//!
//! OBSERVATION
//! ===========
//! `snapshot()` captures the slices the camera reacts to. `SliceWatcher` keeps
//! the previous snapshot and reports a `SceneChange` only when one of them
//! moved.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::consts::ROTATION_STEP_DEG;
use crate::model::{
    CameraConfig, Column, Dimensions3D, Fixture, FixtureStructure, FixtureStyle, Point3D, ProductCategory, Store,
    Wall,
};

/// Which level of the store the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationLevel {
    /// No store loaded.
    #[default]
    Select,
    /// Top-down planning view of a loaded store.
    Store,
    /// VMD view framing one fixture.
    Fixture,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    #[default]
    View,
    Edit,
}

/// Which gizmo edit mode shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformMode {
    #[default]
    Move,
    Rotate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VmdDirection {
    Prev,
    Next,
}

/// Neighbours of a fixture by list index, not by floor position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AdjacentFixtures<'a> {
    pub prev: Option<&'a Fixture>,
    pub next: Option<&'a Fixture>,
}

/// Floor footprint of the loaded store in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreDimensions {
    pub width: f64,
    pub depth: f64,
}

impl StoreDimensions {
    /// The larger of width and depth.
    #[must_use]
    pub fn max_dimension(self) -> f64 {
        self.width.max(self.depth)
    }
}

/// The scene slices the camera reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SceneSnapshot {
    pub navigation_level: NavigationLevel,
    pub is_vmd_mode: bool,
    pub vmd_fixture_index: usize,
    /// Id of the framed fixture while in VMD. Removing the framed fixture can
    /// frame its successor without moving the index.
    pub vmd_fixture_id: Option<String>,
    pub edit_mode: EditMode,
    /// Bumped on every `load_store`; a change means a different store.
    pub store_generation: u64,
}

/// A transition between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneChange {
    pub prev: SceneSnapshot,
    pub next: SceneSnapshot,
}

impl SceneChange {
    #[must_use]
    pub fn store_changed(&self) -> bool {
        self.prev.store_generation != self.next.store_generation
    }

    #[must_use]
    pub fn level_changed(&self) -> bool {
        self.prev.navigation_level != self.next.navigation_level
    }

    /// A different fixture is framed. Index shifts that keep the same fixture
    /// in frame do not count.
    #[must_use]
    pub fn framed_changed(&self) -> bool {
        self.prev.vmd_fixture_id != self.next.vmd_fixture_id
    }
}

/// Normalize degrees into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round a tiny negative input up to exactly 360.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Round to the nearest rotation step, then normalize.
#[must_use]
pub fn snap_rotation(degrees: f64) -> f64 {
    normalize_degrees((degrees / ROTATION_STEP_DEG).round() * ROTATION_STEP_DEG)
}

// =============================================================================
// SCENE STORE
// =============================================================================

/// Authoritative editing state for one session.
#[derive(Debug, Clone, Default)]
pub struct SceneStore {
    current_store: Option<Store>,
    fixtures: Vec<Fixture>,
    product_categories: Vec<ProductCategory>,

    navigation_level: NavigationLevel,
    is_vmd_mode: bool,
    vmd_fixture_index: usize,
    selected_fixture_id: Option<String>,

    edit_mode: EditMode,
    transform_mode: TransformMode,
    is_dragging: bool,
    dragged_fixture_id: Option<String>,

    store_generation: u64,
}

impl SceneStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Store lifecycle ---

    /// Replace everything with `store` and reset navigation to the store view.
    pub fn load_store(&mut self, store: Store) {
        info!(store_id = %store.meta.id, fixtures = store.fixtures.len(), "store loaded");
        self.fixtures.clone_from(&store.fixtures);
        self.product_categories.clone_from(&store.product_categories);
        self.current_store = Some(store);
        self.reset_transient();
        self.navigation_level = NavigationLevel::Store;
        self.store_generation += 1;
    }

    /// Drop the store and go back to store selection.
    pub fn clear_store(&mut self) {
        debug!("store cleared");
        self.current_store = None;
        self.fixtures.clear();
        self.product_categories.clear();
        self.reset_transient();
        self.navigation_level = NavigationLevel::Select;
    }

    fn reset_transient(&mut self) {
        self.is_vmd_mode = false;
        self.vmd_fixture_index = 0;
        self.selected_fixture_id = None;
        self.edit_mode = EditMode::View;
        self.transform_mode = TransformMode::Move;
        self.is_dragging = false;
        self.dragged_fixture_id = None;
    }

    // --- Selection and VMD ---

    /// Select a fixture, or clear the selection with `None`.
    pub fn set_selected_fixture(&mut self, id: Option<&str>) {
        self.selected_fixture_id = id.map(str::to_owned);
    }

    /// Frame the fixture `id` in VMD view.
    pub fn enter_vmd_mode(&mut self, id: &str) {
        let Some(index) = self.index_of(id) else {
            trace!(fixture_id = %id, "enter_vmd_mode: unknown fixture");
            return;
        };
        debug!(fixture_id = %id, index, "entered vmd mode");
        self.navigation_level = NavigationLevel::Fixture;
        self.is_vmd_mode = true;
        self.vmd_fixture_index = index;
        self.selected_fixture_id = Some(id.to_owned());
    }

    /// Leave VMD view for the store view. Ignored when no store is loaded.
    pub fn exit_vmd_mode(&mut self) {
        if self.current_store.is_none() {
            trace!("exit_vmd_mode: no store loaded");
            return;
        }
        debug!("exited vmd mode");
        self.navigation_level = NavigationLevel::Store;
        self.is_vmd_mode = false;
        self.selected_fixture_id = None;
    }

    /// Step to the previous or next fixture in list order. Clamped at both ends.
    /// Outside VMD this only moves the index and selection, so a later entry
    /// starts from there.
    pub fn navigate_vmd(&mut self, direction: VmdDirection) {
        if self.fixtures.is_empty() {
            trace!(?direction, "navigate_vmd: no fixtures");
            return;
        }
        let last = self.fixtures.len() - 1;
        let index = match direction {
            VmdDirection::Prev => self.vmd_fixture_index.saturating_sub(1),
            VmdDirection::Next => (self.vmd_fixture_index + 1).min(last),
        };
        if index == self.vmd_fixture_index {
            trace!(?direction, index, "navigate_vmd: at boundary");
            return;
        }
        self.vmd_fixture_index = index;
        self.selected_fixture_id = Some(self.fixtures[index].id.clone());
        debug!(?direction, index, "vmd navigated");
    }

    // --- Edit mode ---

    /// Switch between view and edit. Only meaningful at store level; leaving
    /// edit mode ends any drag.
    pub fn set_edit_mode(&mut self, mode: EditMode) {
        if self.navigation_level != NavigationLevel::Store {
            trace!(?mode, level = ?self.navigation_level, "set_edit_mode: not at store level");
            return;
        }
        self.edit_mode = mode;
        if mode == EditMode::View {
            self.is_dragging = false;
            self.dragged_fixture_id = None;
        }
        debug!(?mode, "edit mode set");
    }

    pub fn toggle_edit_mode(&mut self) {
        let mode = match self.edit_mode {
            EditMode::View => EditMode::Edit,
            EditMode::Edit => EditMode::View,
        };
        self.set_edit_mode(mode);
    }

    pub fn set_transform_mode(&mut self, mode: TransformMode) {
        if self.navigation_level != NavigationLevel::Store {
            trace!(?mode, level = ?self.navigation_level, "set_transform_mode: not at store level");
            return;
        }
        self.transform_mode = mode;
        debug!(?mode, "transform mode set");
    }

    // --- Dragging ---

    /// Mark `id` as being dragged and select it.
    pub fn start_dragging(&mut self, id: &str) {
        if self.index_of(id).is_none() {
            trace!(fixture_id = %id, "start_dragging: unknown fixture");
            return;
        }
        self.is_dragging = true;
        self.dragged_fixture_id = Some(id.to_owned());
        self.selected_fixture_id = Some(id.to_owned());
    }

    pub fn stop_dragging(&mut self) {
        self.is_dragging = false;
        self.dragged_fixture_id = None;
    }

    // --- Fixture mutations ---

    /// Overwrite a fixture's position. No collision check.
    pub fn move_fixture(&mut self, id: &str, position: Point3D) {
        if let Some(fixture) = self.fixture_mut(id) {
            fixture.position = position;
            trace!(fixture_id = %id, x = position.x, z = position.z, "fixture moved");
        }
    }

    pub fn update_fixture_dimensions(&mut self, id: &str, dimensions: Dimensions3D) {
        if let Some(fixture) = self.fixture_mut(id) {
            fixture.dimensions = dimensions;
            debug!(fixture_id = %id, "fixture dimensions updated");
        }
    }

    pub fn update_fixture_style(&mut self, id: &str, style: FixtureStyle) {
        if let Some(fixture) = self.fixture_mut(id) {
            fixture.style = Some(style);
            debug!(fixture_id = %id, ?style, "fixture style updated");
        }
    }

    /// Overwrite the shelf structure as given; consistency is the caller's job.
    pub fn update_fixture_structure(&mut self, id: &str, structure: FixtureStructure) {
        if let Some(fixture) = self.fixture_mut(id) {
            fixture.structure = structure;
            debug!(fixture_id = %id, "fixture structure updated");
        }
    }

    /// Add `delta` degrees to the rotation, normalized into `[0, 360)`.
    pub fn rotate_fixture(&mut self, id: &str, delta: f64) {
        if let Some(fixture) = self.fixture_mut(id) {
            fixture.rotation = normalize_degrees(fixture.rotation + delta);
            debug!(fixture_id = %id, rotation = fixture.rotation, "fixture rotated");
        }
    }

    /// Set the rotation to `angle` rounded to 15°. No collision check.
    pub fn rotate_fixture_to(&mut self, id: &str, angle: f64) {
        if let Some(fixture) = self.fixture_mut(id) {
            fixture.rotation = snap_rotation(angle);
            debug!(fixture_id = %id, rotation = fixture.rotation, "fixture rotated");
        }
    }

    /// Remove a fixture. Selection and drag that pointed at it are cleared and
    /// the VMD index is kept on a valid fixture.
    pub fn remove_fixture(&mut self, id: &str) {
        let Some(index) = self.index_of(id) else {
            trace!(fixture_id = %id, "remove_fixture: unknown fixture");
            return;
        };
        self.fixtures.remove(index);
        debug!(fixture_id = %id, "fixture removed");

        if self.selected_fixture_id.as_deref() == Some(id) {
            self.selected_fixture_id = None;
        }
        if self.dragged_fixture_id.as_deref() == Some(id) {
            self.stop_dragging();
        }

        if !self.is_vmd_mode {
            self.vmd_fixture_index = self.vmd_fixture_index.min(self.fixtures.len().saturating_sub(1));
            return;
        }
        if self.fixtures.is_empty() {
            self.navigation_level = NavigationLevel::Store;
            self.is_vmd_mode = false;
            self.vmd_fixture_index = 0;
            return;
        }
        // Follow the framed fixture to its new index, or frame the one that
        // slid into the removed slot.
        let framed = self.selected_fixture_id.as_deref().and_then(|sel| self.index_of(sel));
        self.vmd_fixture_index = framed.unwrap_or_else(|| index.min(self.fixtures.len() - 1));
        self.selected_fixture_id = Some(self.fixtures[self.vmd_fixture_index].id.clone());
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.fixtures.iter().position(|f| f.id == id)
    }

    fn fixture_mut(&mut self, id: &str) -> Option<&mut Fixture> {
        let found = self.fixtures.iter_mut().find(|f| f.id == id);
        if found.is_none() {
            trace!(fixture_id = %id, "unknown fixture");
        }
        found
    }

    // --- Queries ---

    #[must_use]
    pub fn selected_fixture(&self) -> Option<&Fixture> {
        self.selected_fixture_id.as_deref().and_then(|id| self.fixture(id))
    }

    /// The fixtures before and after `id` in list order.
    #[must_use]
    pub fn adjacent_fixtures(&self, id: &str) -> AdjacentFixtures<'_> {
        let Some(index) = self.index_of(id) else {
            return AdjacentFixtures::default();
        };
        AdjacentFixtures {
            prev: index.checked_sub(1).and_then(|i| self.fixtures.get(i)),
            next: self.fixtures.get(index + 1),
        }
    }

    /// Center of the floor plan at floor level.
    #[must_use]
    pub fn store_center(&self) -> Option<Point3D> {
        self.store_dimensions().map(|d| Point3D::new(d.width / 2.0, 0.0, d.depth / 2.0))
    }

    #[must_use]
    pub fn store_dimensions(&self) -> Option<StoreDimensions> {
        self.current_store.as_ref().map(|s| StoreDimensions {
            width: s.floor_plan.width_meters,
            depth: s.floor_plan.depth_meters,
        })
    }

    /// The loaded store's camera config, or the default without a store.
    #[must_use]
    pub fn camera_config(&self) -> CameraConfig {
        self.current_store.as_ref().map(|s| s.camera_config).unwrap_or_default()
    }

    #[must_use]
    pub fn fixture(&self, id: &str) -> Option<&Fixture> {
        self.fixtures.iter().find(|f| f.id == id)
    }

    #[must_use]
    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    #[must_use]
    pub fn walls(&self) -> &[Wall] {
        self.current_store.as_ref().map(|s| s.walls.as_slice()).unwrap_or_default()
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        self.current_store.as_ref().map(|s| s.columns.as_slice()).unwrap_or_default()
    }

    #[must_use]
    pub fn current_store(&self) -> Option<&Store> {
        self.current_store.as_ref()
    }

    #[must_use]
    pub fn product_categories(&self) -> &[ProductCategory] {
        &self.product_categories
    }

    /// Zone colour for a category id.
    #[must_use]
    pub fn category_color(&self, category_id: &str) -> Option<&str> {
        self.product_categories
            .iter()
            .find(|c| c.id == category_id)
            .map(|c| c.color.as_str())
    }

    #[must_use]
    pub fn navigation_level(&self) -> NavigationLevel {
        self.navigation_level
    }

    #[must_use]
    pub fn is_vmd_mode(&self) -> bool {
        self.is_vmd_mode
    }

    #[must_use]
    pub fn vmd_fixture_index(&self) -> usize {
        self.vmd_fixture_index
    }

    /// The fixture framed in VMD view.
    #[must_use]
    pub fn vmd_fixture(&self) -> Option<&Fixture> {
        if self.is_vmd_mode { self.fixtures.get(self.vmd_fixture_index) } else { None }
    }

    #[must_use]
    pub fn selected_fixture_id(&self) -> Option<&str> {
        self.selected_fixture_id.as_deref()
    }

    #[must_use]
    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    #[must_use]
    pub fn transform_mode(&self) -> TransformMode {
        self.transform_mode
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    #[must_use]
    pub fn dragged_fixture_id(&self) -> Option<&str> {
        self.dragged_fixture_id.as_deref()
    }

    #[must_use]
    pub fn store_generation(&self) -> u64 {
        self.store_generation
    }

    #[must_use]
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            navigation_level: self.navigation_level,
            is_vmd_mode: self.is_vmd_mode,
            vmd_fixture_index: self.vmd_fixture_index,
            vmd_fixture_id: self.vmd_fixture().map(|f| f.id.clone()),
            edit_mode: self.edit_mode,
            store_generation: self.store_generation,
        }
    }
}

// =============================================================================
// SLICE WATCHER
// =============================================================================

/// Remembers the last observed snapshot and reports transitions.
#[derive(Debug, Clone, Default)]
pub struct SliceWatcher {
    last: SceneSnapshot,
}

impl SliceWatcher {
    /// A watcher whose baseline is the empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A watcher that treats the current state of `scene` as already seen.
    #[must_use]
    pub fn observing(scene: &SceneStore) -> Self {
        Self { last: scene.snapshot() }
    }

    /// The change since the previous poll, if any observed slice moved.
    pub fn poll(&mut self, scene: &SceneStore) -> Option<SceneChange> {
        let next = scene.snapshot();
        if next == self.last {
            return None;
        }
        let prev = std::mem::replace(&mut self.last, next.clone());
        Some(SceneChange { prev, next })
    }

    #[must_use]
    pub fn last(&self) -> &SceneSnapshot {
        &self.last
    }
}
