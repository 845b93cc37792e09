//! Pointer gesture handlers for moving and rotating fixtures in edit mode.
//!
//! The presentation layer ray-casts pointer events onto the floor plane and
//! feeds the resulting points in here. Each controller tracks one gesture
//! between pointer-down and pointer-up and commits to the `SceneStore` only
//! when the candidate placement is collision-free.
//!
//! Two policies live side by side:
//!
//! - Free drag (`DragController`) snaps against fixtures and walls, falls back
//!   to the grid, and skips the commit when the result still collides. The
//!   fixture then stays where the last accepted move put it.
//! - Gizmos (`GizmoController`) constrain motion to one local axis or to
//!   rotation. Moves only wall-snap; any collision rejects the step.

#[cfg(test)]
#[path = "interaction_test.rs"]
mod interaction_test;

use tracing::{debug, trace};

use crate::consts::SNAP_DISTANCE;
use crate::model::{Point2D, Point3D};
use crate::scene::{EditMode, NavigationLevel, SceneStore, TransformMode, snap_rotation};
use crate::snap::{SnapResult, check_collision, check_wall_collision, snap_to_fixtures_and_walls, snap_to_walls};

/// Angle in degrees of `point` around `center`, measured from +Z toward +X.
#[must_use]
pub fn pointer_angle(center: Point2D, point: Point2D) -> f64 {
    (point.x - center.x).atan2(point.z - center.z).to_degrees()
}

/// World-space unit vectors of a fixture's local X (left/right) and local Z
/// (front/back) axes for a rotation in degrees about +Y.
#[must_use]
pub fn local_axes(rotation_deg: f64) -> (Point2D, Point2D) {
    let (sin, cos) = rotation_deg.to_radians().sin_cos();
    (Point2D::new(cos, -sin), Point2D::new(sin, cos))
}

/// Component of `delta` along the unit vector `axis`, in world space.
fn project(delta: Point2D, axis: Point2D) -> Point2D {
    let along = delta.x * axis.x + delta.z * axis.z;
    Point2D::new(axis.x * along, axis.z * along)
}

fn editing_with(scene: &SceneStore, mode: TransformMode) -> bool {
    scene.navigation_level() == NavigationLevel::Store
        && scene.edit_mode() == EditMode::Edit
        && scene.transform_mode() == mode
}

// =============================================================================
// FREE DRAG
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
enum DragState {
    Idle,
    Dragging {
        fixture_id: String,
        /// Fixture center minus the pointer's floor point at pointer-down.
        offset: Point2D,
    },
}

/// Drag-to-move gesture with magnetic snapping.
#[derive(Debug, Clone)]
pub struct DragController {
    state: DragState,
    snap_distance: f64,
}

impl Default for DragController {
    fn default() -> Self {
        Self { state: DragState::Idle, snap_distance: SNAP_DISTANCE }
    }
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_snap_distance(snap_distance: f64) -> Self {
        Self { snap_distance, ..Self::default() }
    }

    /// Id of the fixture under the pointer, if a drag is in progress.
    #[must_use]
    pub fn active_fixture(&self) -> Option<&str> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging { fixture_id, .. } => Some(fixture_id),
        }
    }

    /// Start dragging `fixture_id`, grabbed at `floor_point`.
    ///
    /// Only accepted in edit mode with the move transform. A drag left over
    /// from a lost pointer-up is replaced.
    pub fn pointer_down(&mut self, scene: &mut SceneStore, fixture_id: &str, floor_point: Point2D) -> bool {
        if !editing_with(scene, TransformMode::Move) {
            trace!(fixture_id = %fixture_id, "pointer_down: not in move edit mode");
            return false;
        }
        let Some(fixture) = scene.fixture(fixture_id) else {
            trace!(fixture_id = %fixture_id, "pointer_down: unknown fixture");
            return false;
        };
        let offset = Point2D::new(fixture.position.x - floor_point.x, fixture.position.z - floor_point.z);

        if let Some(stale) = self.active_fixture() {
            debug!(stale_id = %stale, fixture_id = %fixture_id, "recapturing stale drag");
            scene.stop_dragging();
        }

        self.state = DragState::Dragging { fixture_id: fixture_id.to_owned(), offset };
        scene.start_dragging(fixture_id);
        debug!(fixture_id = %fixture_id, "drag started");
        true
    }

    /// Follow the pointer. Returns the snap outcome when the move was committed.
    pub fn pointer_move(&mut self, scene: &mut SceneStore, floor_point: Point2D) -> Option<SnapResult> {
        let DragState::Dragging { fixture_id, offset } = &self.state else {
            return None;
        };
        if scene.dragged_fixture_id() != Some(fixture_id.as_str()) {
            // The scene ended the drag on its own, e.g. by leaving edit mode.
            trace!(fixture_id = %fixture_id, "pointer_move: drag no longer active");
            self.state = DragState::Idle;
            return None;
        }
        let fixture_id = fixture_id.clone();
        let fixture = scene.fixture(&fixture_id)?;

        let raw = Point3D::new(floor_point.x + offset.x, fixture.position.y, floor_point.z + offset.z);
        let result = snap_to_fixtures_and_walls(raw, fixture, scene.fixtures(), scene.walls(), self.snap_distance);

        if check_collision(fixture, result.position, scene.fixtures())
            || check_wall_collision(fixture, result.position, scene.walls())
        {
            trace!(fixture_id = %fixture_id, "drag step rejected: collision");
            return None;
        }

        scene.move_fixture(&fixture_id, result.position);
        Some(result)
    }

    /// Finish the drag.
    pub fn pointer_up(&mut self, scene: &mut SceneStore) {
        if self.active_fixture().is_some() {
            scene.stop_dragging();
        }
        self.state = DragState::Idle;
    }
}

// =============================================================================
// GIZMOS
// =============================================================================

/// Local axis a move-gizmo arrow drags along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoAxis {
    /// Left/right.
    X,
    /// Front/back.
    Z,
}

#[derive(Debug, Clone, PartialEq)]
enum GizmoState {
    Idle,
    Moving {
        fixture_id: String,
        axis: GizmoAxis,
        /// Floor point of the previous pointer event.
        last_point: Point2D,
    },
    Rotating {
        fixture_id: String,
        /// Pointer angle minus fixture rotation at grab time.
        start_offset: f64,
    },
}

/// Axis-constrained move and rotate handles.
#[derive(Debug, Clone)]
pub struct GizmoController {
    state: GizmoState,
    /// Store generation the held handle was grabbed in.
    generation: u64,
    snap_distance: f64,
}

impl Default for GizmoController {
    fn default() -> Self {
        Self { state: GizmoState::Idle, generation: 0, snap_distance: SNAP_DISTANCE }
    }
}

impl GizmoController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state != GizmoState::Idle
    }

    /// Grab a move arrow of `fixture_id` at `floor_point`.
    pub fn begin_move(&mut self, scene: &SceneStore, fixture_id: &str, axis: GizmoAxis, floor_point: Point2D) -> bool {
        if !editing_with(scene, TransformMode::Move) || scene.fixture(fixture_id).is_none() {
            trace!(fixture_id = %fixture_id, ?axis, "begin_move ignored");
            return false;
        }
        self.state = GizmoState::Moving { fixture_id: fixture_id.to_owned(), axis, last_point: floor_point };
        self.generation = scene.store_generation();
        debug!(fixture_id = %fixture_id, ?axis, "gizmo move started");
        true
    }

    /// Move along the grabbed axis by the pointer delta since the last event.
    ///
    /// The delta is consumed whether or not the step commits, so a rejected
    /// step does not accumulate.
    pub fn drag_move(&mut self, scene: &mut SceneStore, floor_point: Point2D) -> bool {
        if !matches!(self.state, GizmoState::Moving { .. }) || !self.still_editing(scene, TransformMode::Move) {
            return false;
        }
        let GizmoState::Moving { fixture_id, axis, last_point } = &mut self.state else {
            return false;
        };
        let delta = Point2D::new(floor_point.x - last_point.x, floor_point.z - last_point.z);
        *last_point = floor_point;

        let Some(fixture) = scene.fixture(fixture_id) else {
            return false;
        };
        let (local_x, local_z) = local_axes(fixture.rotation);
        let step = project(delta, if *axis == GizmoAxis::X { local_x } else { local_z });
        let candidate = Point3D::new(fixture.position.x + step.x, fixture.position.y, fixture.position.z + step.z);

        let wall_snap = snap_to_walls(candidate, fixture, scene.walls(), self.snap_distance);
        let position = if wall_snap.snapped_to_wall_id.is_some() { wall_snap.position } else { candidate };

        if check_wall_collision(fixture, position, scene.walls()) || check_collision(fixture, position, scene.fixtures())
        {
            trace!(fixture_id = %fixture_id, "gizmo move rejected: collision");
            return false;
        }

        let fixture_id = fixture_id.clone();
        scene.move_fixture(&fixture_id, position);
        true
    }

    /// Grab the rotate ring of `fixture_id` at `floor_point`.
    pub fn begin_rotate(&mut self, scene: &SceneStore, fixture_id: &str, floor_point: Point2D) -> bool {
        if !editing_with(scene, TransformMode::Rotate) {
            trace!(fixture_id = %fixture_id, "begin_rotate: not in rotate edit mode");
            return false;
        }
        let Some(fixture) = scene.fixture(fixture_id) else {
            trace!(fixture_id = %fixture_id, "begin_rotate: unknown fixture");
            return false;
        };
        let start_offset = pointer_angle(fixture.position.floor(), floor_point) - fixture.rotation;
        self.state = GizmoState::Rotating { fixture_id: fixture_id.to_owned(), start_offset };
        self.generation = scene.store_generation();
        debug!(fixture_id = %fixture_id, "gizmo rotate started");
        true
    }

    /// Rotate to follow the pointer, on 15° steps, if the turned footprint is
    /// clear of fixtures and walls.
    pub fn drag_rotate(&mut self, scene: &mut SceneStore, floor_point: Point2D) -> bool {
        if !matches!(self.state, GizmoState::Rotating { .. }) || !self.still_editing(scene, TransformMode::Rotate) {
            return false;
        }
        let GizmoState::Rotating { fixture_id, start_offset } = &self.state else {
            return false;
        };
        let Some(fixture) = scene.fixture(fixture_id) else {
            return false;
        };

        let angle = pointer_angle(fixture.position.floor(), floor_point) - start_offset;
        let mut turned = fixture.clone();
        turned.rotation = snap_rotation(angle);
        if (turned.rotation - fixture.rotation).abs() < f64::EPSILON {
            return false;
        }

        if check_collision(&turned, turned.position, scene.fixtures())
            || check_wall_collision(&turned, turned.position, scene.walls())
        {
            trace!(fixture_id = %fixture_id, rotation = turned.rotation, "gizmo rotate rejected: collision");
            return false;
        }

        let fixture_id = fixture_id.clone();
        scene.rotate_fixture_to(&fixture_id, angle);
        true
    }

    /// Release whichever handle is held.
    pub fn end(&mut self) {
        self.state = GizmoState::Idle;
    }

    /// Drops the held handle once the scene has left `mode` editing or
    /// loaded another store since the grab.
    fn still_editing(&mut self, scene: &SceneStore, mode: TransformMode) -> bool {
        if editing_with(scene, mode) && scene.store_generation() == self.generation {
            return true;
        }
        trace!(?mode, "gizmo released: edit mode ended");
        self.state = GizmoState::Idle;
        false
    }
}
