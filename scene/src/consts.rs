//! Shared numeric constants for the scene crate.

// ── Snapping ────────────────────────────────────────────────────

/// Distance in meters within which an edge snaps to a neighbour or wall.
pub const SNAP_DISTANCE: f64 = 0.3;

/// Grid pitch in meters used when no magnetic snap applies.
pub const GRID_SIZE: f64 = 0.1;

/// A wall is horizontal/vertical when its orthogonal delta is below this, in meters.
pub const WALL_AXIS_TOLERANCE: f64 = 0.01;

/// Extra clearance added when pushing a fixture out of a wall, in meters.
pub const WALL_CLAMP_MARGIN: f64 = 0.01;

/// Wall thickness assumed when a catalog omits it, in meters.
pub const DEFAULT_WALL_THICKNESS: f64 = 0.15;

// ── Rotation ────────────────────────────────────────────────────

/// Angular step of the rotate gizmo, in degrees.
pub const ROTATION_STEP_DEG: f64 = 15.0;

// ── Structure ───────────────────────────────────────────────────

/// Shelf count bounds accepted by the edit panel.
pub const MIN_SHELF_COUNT: u32 = 1;
pub const MAX_SHELF_COUNT: u32 = 10;

/// Headroom left above the top shelf when shelves are re-spaced, in meters.
pub const SHELF_TOP_CLEARANCE: f64 = 0.1;

// ── Camera ──────────────────────────────────────────────────────

/// Vertical field of view of the perspective camera, in degrees.
pub const CAMERA_FOV_DEG: f64 = 50.0;

/// Multiplier applied to the fitted overview height so walls are not cropped.
pub const STORE_FIT_MARGIN: f64 = 1.25;

/// Duration of the store → fixture camera flight, in milliseconds.
pub const ENTER_VMD_MS: f64 = 600.0;

/// Duration of the fixture → fixture slide while in VMD, in milliseconds.
pub const STEP_VMD_MS: f64 = 400.0;

/// Duration of the fixture → store flight, in milliseconds.
pub const EXIT_VMD_MS: f64 = 800.0;
