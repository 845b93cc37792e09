//! Axis-aligned bounds for fixtures and walls on the floor plane.
//!
//! A rotated fixture is approximated by the axis-aligned box that
//! circumscribes its footprint. For quarter-turn rotations this is exact; for
//! anything in between it is larger than the footprint, so collision checks can
//! report false positives but never miss a real overlap.

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;

use crate::consts::WALL_AXIS_TOLERANCE;
use crate::model::{Fixture, Point3D, Wall};

/// World-space box around a fixture's footprint, with its center and the
/// effective extents after rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixtureBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
    pub center_x: f64,
    pub center_z: f64,
    /// Extent along world X after rotation.
    pub width: f64,
    /// Extent along world Z after rotation.
    pub depth: f64,
}

/// World-space box around a wall, grown by half its thickness on every side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
    /// Runs along X (|ΔZ| below tolerance).
    pub is_horizontal: bool,
    /// Runs along Z (|ΔX| below tolerance).
    pub is_vertical: bool,
}

/// Bounds of `fixture` at its stored position.
#[must_use]
pub fn fixture_bounds(fixture: &Fixture) -> FixtureBounds {
    fixture_bounds_at(fixture, fixture.position)
}

/// Bounds of `fixture` if it were centered on `position`, keeping its own
/// rotation and dimensions.
#[must_use]
pub fn fixture_bounds_at(fixture: &Fixture, position: Point3D) -> FixtureBounds {
    let (width, depth) = effective_extents(fixture.dimensions.width, fixture.dimensions.depth, fixture.rotation);
    FixtureBounds {
        min_x: position.x - width / 2.0,
        max_x: position.x + width / 2.0,
        min_z: position.z - depth / 2.0,
        max_z: position.z + depth / 2.0,
        center_x: position.x,
        center_z: position.z,
        width,
        depth,
    }
}

/// Extents along world X and Z of a `width` × `depth` rectangle rotated by
/// `rotation_deg` about its center.
#[must_use]
pub fn effective_extents(width: f64, depth: f64, rotation_deg: f64) -> (f64, f64) {
    let rad = rotation_deg.to_radians();
    let cos = rad.cos().abs();
    let sin = rad.sin().abs();
    (width * cos + depth * sin, width * sin + depth * cos)
}

#[must_use]
pub fn wall_bounds(wall: &Wall) -> WallBounds {
    let half = wall.thickness / 2.0;
    WallBounds {
        min_x: wall.start.x.min(wall.end.x) - half,
        max_x: wall.start.x.max(wall.end.x) + half,
        min_z: wall.start.z.min(wall.end.z) - half,
        max_z: wall.start.z.max(wall.end.z) + half,
        is_horizontal: (wall.end.z - wall.start.z).abs() < WALL_AXIS_TOLERANCE,
        is_vertical: (wall.end.x - wall.start.x).abs() < WALL_AXIS_TOLERANCE,
    }
}

/// Spans overlap only when their intersection has positive length, so touching
/// edges and degenerate spans never count.
fn spans_overlap(a_min: f64, a_max: f64, b_min: f64, b_max: f64) -> bool {
    a_max.min(b_max) - a_min.max(b_min) > 0.0
}

impl FixtureBounds {
    /// Whether the two boxes share a region of non-zero area.
    #[must_use]
    pub fn overlaps(&self, other: &FixtureBounds) -> bool {
        self.overlaps_x(other.min_x, other.max_x) && self.overlaps_z(other.min_z, other.max_z)
    }

    #[must_use]
    pub fn overlaps_wall(&self, wall: &WallBounds) -> bool {
        self.overlaps_x(wall.min_x, wall.max_x) && self.overlaps_z(wall.min_z, wall.max_z)
    }

    /// Whether this box's X span strictly overlaps `[min, max]`.
    #[must_use]
    pub fn overlaps_x(&self, min: f64, max: f64) -> bool {
        spans_overlap(self.min_x, self.max_x, min, max)
    }

    /// Whether this box's Z span strictly overlaps `[min, max]`.
    #[must_use]
    pub fn overlaps_z(&self, min: f64, max: f64) -> bool {
        spans_overlap(self.min_z, self.max_z, min, max)
    }
}

impl WallBounds {
    /// Walls that run along neither axis get collision but no snapping.
    #[must_use]
    pub fn is_diagonal(&self) -> bool {
        !self.is_horizontal && !self.is_vertical
    }
}
