//! Collision tests and magnetic snapping for fixtures being moved.
//!
//! Everything here is a pure function of its inputs: the moving fixture, a
//! candidate center position, and the full set of obstacles. Drag handlers
//! call these on every pointer move, so they allocate nothing beyond the
//! returned ids.
//!
//! Snap resolution keeps the single closest candidate across all obstacles.
//! Ties go to whichever candidate was found first, iterating obstacles in input
//! order and, per fixture, checking right, left, front, back, center-X, then
//! center-Z.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use serde::{Deserialize, Serialize};

use crate::bounds::{FixtureBounds, fixture_bounds, fixture_bounds_at, wall_bounds};
use crate::consts::{GRID_SIZE, WALL_CLAMP_MARGIN};
use crate::model::{Fixture, Point3D, Wall};

/// Which edge of the moving fixture ended up flush against something.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapEdge {
    /// Min-X face.
    Left,
    /// Max-X face.
    Right,
    /// Max-Z face.
    Front,
    /// Min-Z face.
    Back,
}

/// Outcome of a snap query.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    pub position: Point3D,
    pub snapped_to_fixture_id: Option<String>,
    pub snapped_to_wall_id: Option<String>,
    pub snapped_edge: Option<SnapEdge>,
}

impl SnapResult {
    fn unsnapped(position: Point3D) -> Self {
        Self { position, snapped_to_fixture_id: None, snapped_to_wall_id: None, snapped_edge: None }
    }

    fn to_fixture(position: Point3D, fixture_id: &str, edge: SnapEdge) -> Self {
        Self {
            position,
            snapped_to_fixture_id: Some(fixture_id.to_owned()),
            snapped_to_wall_id: None,
            snapped_edge: Some(edge),
        }
    }

    fn to_wall(position: Point3D, wall_id: &str, edge: SnapEdge) -> Self {
        Self {
            position,
            snapped_to_fixture_id: None,
            snapped_to_wall_id: Some(wall_id.to_owned()),
            snapped_edge: Some(edge),
        }
    }

    /// Whether any magnetic snap applied.
    #[must_use]
    pub fn is_snapped(&self) -> bool {
        self.snapped_to_fixture_id.is_some() || self.snapped_to_wall_id.is_some()
    }
}

/// Round `value` to the nearest multiple of `grid_size`.
#[must_use]
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    (value / grid_size).round() * grid_size
}

// =============================================================================
// COLLISION
// =============================================================================

/// Whether `fixture` centered at `position` overlaps any other fixture.
/// The fixture itself is skipped by id.
#[must_use]
pub fn check_collision(fixture: &Fixture, position: Point3D, others: &[Fixture]) -> bool {
    let target = fixture_bounds_at(fixture, position);
    others
        .iter()
        .filter(|other| other.id != fixture.id)
        .any(|other| target.overlaps(&fixture_bounds(other)))
}

/// Whether `fixture` centered at `position` overlaps any wall, diagonal
/// walls included.
#[must_use]
pub fn check_wall_collision(fixture: &Fixture, position: Point3D, walls: &[Wall]) -> bool {
    let target = fixture_bounds_at(fixture, position);
    walls.iter().any(|wall| target.overlaps_wall(&wall_bounds(wall)))
}

// =============================================================================
// FIXTURE SNAPPING
// =============================================================================

/// Centers are within one row of each other along Z.
fn aligned_in_row(a: &FixtureBounds, b: &FixtureBounds, tolerance: f64) -> bool {
    (a.center_z - b.center_z).abs() < a.depth.max(b.depth) / 2.0 + tolerance
}

/// Centers are within one column of each other along X.
fn aligned_in_column(a: &FixtureBounds, b: &FixtureBounds, tolerance: f64) -> bool {
    (a.center_x - b.center_x).abs() < a.width.max(b.width) / 2.0 + tolerance
}

fn near_touching_z(a: &FixtureBounds, b: &FixtureBounds, tolerance: f64) -> bool {
    (a.max_z - b.min_z).abs() < tolerance || (a.min_z - b.max_z).abs() < tolerance
}

fn near_touching_x(a: &FixtureBounds, b: &FixtureBounds, tolerance: f64) -> bool {
    (a.max_x - b.min_x).abs() < tolerance || (a.min_x - b.max_x).abs() < tolerance
}

/// Snap `target` (about to be placed at `target_position`) against the other
/// fixtures.
///
/// Edge candidates pull a face flush with a neighbour's opposite face when the
/// gap is under `snap_distance` and the two sit in the same row or column.
/// Center candidates line up centers on one axis when the difference is under
/// half of `snap_distance` and the boxes nearly touch on the other axis; they
/// adjust the best position found so far rather than the raw one, and keep its
/// edge label. When nothing snaps, both axes fall back to the 0.1 m grid.
#[must_use]
pub fn snap_to_fixtures(
    target_position: Point3D,
    target: &Fixture,
    others: &[Fixture],
    snap_distance: f64,
) -> SnapResult {
    let t = fixture_bounds_at(target, target_position);
    let center_threshold = snap_distance / 2.0;

    let mut best = SnapResult::unsnapped(target_position);
    let mut min_distance = f64::INFINITY;

    for other in others.iter().filter(|other| other.id != target.id) {
        let o = fixture_bounds(other);

        let right_to_left = (t.max_x - o.min_x).abs();
        if right_to_left < snap_distance && right_to_left < min_distance && aligned_in_row(&t, &o, snap_distance) {
            min_distance = right_to_left;
            let position = Point3D { x: o.min_x - t.width / 2.0, ..target_position };
            best = SnapResult::to_fixture(position, &other.id, SnapEdge::Right);
        }

        let left_to_right = (t.min_x - o.max_x).abs();
        if left_to_right < snap_distance && left_to_right < min_distance && aligned_in_row(&t, &o, snap_distance) {
            min_distance = left_to_right;
            let position = Point3D { x: o.max_x + t.width / 2.0, ..target_position };
            best = SnapResult::to_fixture(position, &other.id, SnapEdge::Left);
        }

        let front_to_back = (t.max_z - o.min_z).abs();
        if front_to_back < snap_distance
            && front_to_back < min_distance
            && aligned_in_column(&t, &o, snap_distance)
        {
            min_distance = front_to_back;
            let position = Point3D { z: o.min_z - t.depth / 2.0, ..target_position };
            best = SnapResult::to_fixture(position, &other.id, SnapEdge::Front);
        }

        let back_to_front = (t.min_z - o.max_z).abs();
        if back_to_front < snap_distance
            && back_to_front < min_distance
            && aligned_in_column(&t, &o, snap_distance)
        {
            min_distance = back_to_front;
            let position = Point3D { z: o.max_z + t.depth / 2.0, ..target_position };
            best = SnapResult::to_fixture(position, &other.id, SnapEdge::Back);
        }

        let center_x = (t.center_x - o.center_x).abs();
        if center_x < center_threshold && center_x < min_distance && near_touching_z(&t, &o, snap_distance) {
            min_distance = center_x;
            best.position.x = o.center_x;
            best.snapped_to_fixture_id = Some(other.id.clone());
        }

        let center_z = (t.center_z - o.center_z).abs();
        if center_z < center_threshold && center_z < min_distance && near_touching_x(&t, &o, snap_distance) {
            min_distance = center_z;
            best.position.z = o.center_z;
            best.snapped_to_fixture_id = Some(other.id.clone());
        }
    }

    if best.snapped_to_fixture_id.is_none() {
        best.position = Point3D {
            x: snap_to_grid(target_position.x, GRID_SIZE),
            y: target_position.y,
            z: snap_to_grid(target_position.z, GRID_SIZE),
        };
    }

    best
}

// =============================================================================
// WALL SNAPPING
// =============================================================================

/// Snap `target` flush against the nearest axis-aligned wall face.
///
/// Vertical walls pull along X and only when the fixture's Z span overlaps the
/// wall; horizontal walls pull along Z when the X spans overlap. Diagonal walls
/// are ignored. With no wall in range the position comes back unchanged.
#[must_use]
pub fn snap_to_walls(target_position: Point3D, target: &Fixture, walls: &[Wall], snap_distance: f64) -> SnapResult {
    let t = fixture_bounds_at(target, target_position);

    let mut best = SnapResult::unsnapped(target_position);
    let mut min_distance = f64::INFINITY;

    for wall in walls {
        let w = wall_bounds(wall);

        if w.is_vertical && t.overlaps_z(w.min_z, w.max_z) {
            let right_to_wall = (t.max_x - w.min_x).abs();
            if right_to_wall < snap_distance && right_to_wall < min_distance {
                min_distance = right_to_wall;
                let position = Point3D { x: w.min_x - t.width / 2.0, ..target_position };
                best = SnapResult::to_wall(position, &wall.id, SnapEdge::Right);
            }

            let left_to_wall = (t.min_x - w.max_x).abs();
            if left_to_wall < snap_distance && left_to_wall < min_distance {
                min_distance = left_to_wall;
                let position = Point3D { x: w.max_x + t.width / 2.0, ..target_position };
                best = SnapResult::to_wall(position, &wall.id, SnapEdge::Left);
            }
        }

        if w.is_horizontal && t.overlaps_x(w.min_x, w.max_x) {
            let front_to_wall = (t.max_z - w.min_z).abs();
            if front_to_wall < snap_distance && front_to_wall < min_distance {
                min_distance = front_to_wall;
                let position = Point3D { z: w.min_z - t.depth / 2.0, ..target_position };
                best = SnapResult::to_wall(position, &wall.id, SnapEdge::Front);
            }

            let back_to_wall = (t.min_z - w.max_z).abs();
            if back_to_wall < snap_distance && back_to_wall < min_distance {
                min_distance = back_to_wall;
                let position = Point3D { z: w.max_z + t.depth / 2.0, ..target_position };
                best = SnapResult::to_wall(position, &wall.id, SnapEdge::Back);
            }
        }
    }

    best
}

/// Fixture snap, then wall snap on its result; a wall snap wins when present.
///
/// If the composed position still penetrates a wall, the whole move is
/// abandoned and the fixture's current (pre-drag) position is returned. Snap
/// ids and edge are reported either way.
#[must_use]
pub fn snap_to_fixtures_and_walls(
    target_position: Point3D,
    target: &Fixture,
    others: &[Fixture],
    walls: &[Wall],
    snap_distance: f64,
) -> SnapResult {
    let fixture_snap = snap_to_fixtures(target_position, target, others, snap_distance);
    let wall_snap = snap_to_walls(fixture_snap.position, target, walls, snap_distance);

    let mut position = if wall_snap.snapped_to_wall_id.is_some() { wall_snap.position } else { fixture_snap.position };

    if check_wall_collision(target, position, walls) {
        tracing::trace!(fixture_id = %target.id, "snapped position penetrates a wall; keeping current position");
        position = target.position;
    }

    SnapResult {
        position,
        snapped_to_fixture_id: fixture_snap.snapped_to_fixture_id,
        snapped_to_wall_id: wall_snap.snapped_to_wall_id,
        snapped_edge: wall_snap.snapped_edge.or(fixture_snap.snapped_edge),
    }
}

// =============================================================================
// WALL CLAMPING
// =============================================================================

/// Push `position` out of every axis-aligned wall the fixture overlaps.
///
/// Each overlapping wall moves the fixture toward whichever wall face needs
/// the smaller shift, plus a 0.01 m margin. Overlaps are measured at the input
/// position, so several walls add their pushes together. Diagonal walls are
/// left alone.
#[must_use]
pub fn clamp_to_wall_bounds(position: Point3D, fixture: &Fixture, walls: &[Wall]) -> Point3D {
    let b = fixture_bounds_at(fixture, position);
    let mut clamped = position;

    for wall in walls {
        let w = wall_bounds(wall);
        if !b.overlaps_wall(&w) {
            continue;
        }

        if w.is_vertical {
            let push_left = w.min_x - b.max_x;
            let push_right = w.max_x - b.min_x;
            if push_left.abs() < push_right.abs() {
                clamped.x += push_left - WALL_CLAMP_MARGIN;
            } else {
                clamped.x += push_right + WALL_CLAMP_MARGIN;
            }
        }

        if w.is_horizontal {
            let push_front = w.min_z - b.max_z;
            let push_back = w.max_z - b.min_z;
            if push_front.abs() < push_back.abs() {
                clamped.z += push_front - WALL_CLAMP_MARGIN;
            } else {
                clamped.z += push_back + WALL_CLAMP_MARGIN;
            }
        }
    }

    clamped
}
