//! Spatial editing core for the planogram editor.
//!
//! This crate owns everything that has real geometry or state-machine content:
//! rotated footprint bounds, collision tests, magnetic snapping against other
//! fixtures and walls, the scene store that holds navigation/edit state and the
//! live fixture list, the free-drag and gizmo interaction handlers, and the
//! camera controller that animates between the store overview and the
//! fixture-level VMD view. Rendering is left to the host: it reads state from
//! [`scene::SceneStore`], feeds floor-plane pointer points into
//! [`interaction`], and draws whatever [`camera::CameraController::tick`]
//! returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`model`] | Store, fixture, wall and column data types (JSON wire format) |
//! | [`bounds`] | Rotated fixture bounds and wall bounds |
//! | [`snap`] | Collision checks, grid/fixture/wall snapping, wall clamping |
//! | [`scene`] | The scene store: navigation, selection, VMD, fixture mutations |
//! | [`interaction`] | Free-drag and gizmo state machines |
//! | [`tween`] | Cancellable eased interpolation |
//! | [`camera`] | Camera controller reacting to scene transitions |
//! | [`catalog`] | Static store registry, JSON loading and store linting |
//! | [`consts`] | Shared numeric constants (snap distances, grid, durations) |

pub mod bounds;
pub mod camera;
pub mod catalog;
pub mod consts;
pub mod interaction;
pub mod model;
pub mod scene;
pub mod snap;
pub mod tween;

pub use catalog::{CatalogError, StoreCatalog};
pub use model::{Fixture, Point2D, Point3D, Store, Wall};
pub use scene::SceneStore;
