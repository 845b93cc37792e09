//! Camera controller: reacts to navigation changes with eased camera moves.
//!
//! The controller owns no scene data. Each frame the host calls `sync` with the
//! current `SceneStore`; a `SliceWatcher` diffs the observed slices against the
//! previous frame and decides whether to snap, start a tween, or do nothing.
//! `tick` then advances the running tween and yields the pose to render.
//!
//! | Transition                        | Camera                          |
//! |-----------------------------------|---------------------------------|
//! | new store loaded                  | snap to overview, no animation  |
//! | new store, fixture already framed | snap to overview, then enter    |
//! | store → fixture (enter VMD)       | tween to fixture front, 600 ms  |
//! | fixture → fixture (VMD step)      | tween position only, 400 ms     |
//! | framed fixture removed            | step to its successor           |
//! | fixture → store (exit VMD)        | tween to overview, 800 ms       |
//! | store cleared                     | cancel tween, keep pose         |
//!
//! Edit-mode toggles and other store-level changes leave the camera alone.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4};

use tracing::debug;

use crate::consts::{CAMERA_FOV_DEG, ENTER_VMD_MS, EXIT_VMD_MS, STEP_VMD_MS, STORE_FIT_MARGIN};
use crate::model::{Fixture, Point3D};
use crate::scene::{NavigationLevel, SceneChange, SceneStore, SliceWatcher, StoreDimensions};
use crate::tween::{Easing, Lerp, TweenSlot};

/// Where the camera sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraPose {
    pub position: Point3D,
    pub target: Point3D,
}

impl Lerp for CameraPose {
    fn lerp(self, to: Self, t: f64) -> Self {
        Self { position: self.position.lerp(to.position, t), target: self.target.lerp(to.target, t) }
    }
}

/// Field of view, framing margin and transition timings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// Vertical field of view in degrees.
    pub fov_deg: f64,
    /// Extra room around the floor plan in the overview.
    pub fit_margin: f64,
    pub enter_vmd_ms: f64,
    pub step_vmd_ms: f64,
    pub exit_vmd_ms: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_deg: CAMERA_FOV_DEG,
            fit_margin: STORE_FIT_MARGIN,
            enter_vmd_ms: ENTER_VMD_MS,
            step_vmd_ms: STEP_VMD_MS,
            exit_vmd_ms: EXIT_VMD_MS,
        }
    }
}

/// Orbit control bounds. Angles are polar angles from straight down, in
/// radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitLimits {
    pub min_polar: f64,
    pub max_polar: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub enable_rotate: bool,
    pub enable_pan: bool,
}

/// What `sync` did with an observed change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraTransition {
    /// Snapped to the overview of a newly loaded store.
    Reset,
    EnterVmd,
    StepVmd,
    ExitVmd,
    /// Store cleared; the running tween was dropped.
    Cancelled,
}

// =============================================================================
// FRAMING
// =============================================================================

/// Height at which a `width` × `depth` floor fits the vertical field of view.
#[must_use]
pub fn store_view_height(width: f64, depth: f64, fov_deg: f64, margin: f64) -> f64 {
    let half_extent = width.max(depth) / 2.0;
    half_extent / (fov_deg.to_radians() / 2.0).tan() * margin
}

/// Straight-down view over the store center.
#[must_use]
pub fn store_overview_pose(center: Point3D, dimensions: StoreDimensions, settings: &CameraSettings) -> CameraPose {
    let height = store_view_height(dimensions.width, dimensions.depth, settings.fov_deg, settings.fit_margin);
    CameraPose {
        position: Point3D::new(center.x, height, center.z),
        target: Point3D::new(center.x, 0.0, center.z),
    }
}

/// Camera in front of `fixture`, `distance` meters out from its front face,
/// looking at its center at mid-height.
#[must_use]
pub fn fixture_front_pose(fixture: &Fixture, distance: f64) -> CameraPose {
    let (sin, cos) = fixture.rotation.to_radians().sin_cos();
    let mid_height = fixture.dimensions.height / 2.0;
    let standoff = fixture.dimensions.depth / 2.0 + distance;
    let p = fixture.position;
    CameraPose {
        position: Point3D::new(p.x + sin * standoff, mid_height, p.z + cos * standoff),
        target: Point3D::new(p.x, mid_height, p.z),
    }
}

/// Orbit bounds for the scene's navigation level.
#[must_use]
pub fn orbit_limits(scene: &SceneStore) -> OrbitLimits {
    match (scene.navigation_level(), scene.store_dimensions()) {
        (NavigationLevel::Fixture, _) => OrbitLimits {
            min_polar: FRAC_PI_4,
            max_polar: FRAC_PI_2,
            min_distance: 2.0,
            max_distance: 10.0,
            enable_rotate: false,
            enable_pan: false,
        },
        (NavigationLevel::Store, Some(dimensions)) => {
            let max_dim = dimensions.max_dimension();
            OrbitLimits {
                min_polar: 0.0,
                max_polar: FRAC_PI_3,
                min_distance: (0.2 * max_dim).max(5.0),
                max_distance: 2.5 * max_dim,
                enable_rotate: true,
                enable_pan: true,
            }
        }
        _ => OrbitLimits {
            min_polar: 0.0,
            max_polar: FRAC_PI_2,
            min_distance: 5.0,
            max_distance: 100.0,
            enable_rotate: true,
            enable_pan: true,
        },
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct CameraController {
    settings: CameraSettings,
    watcher: SliceWatcher,
    pose: CameraPose,
    tween: TweenSlot<CameraPose>,
}

impl CameraController {
    #[must_use]
    pub fn new(settings: CameraSettings) -> Self {
        Self { settings, ..Self::default() }
    }

    #[must_use]
    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Last pose produced by `sync` or `tick`.
    #[must_use]
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.tween.is_running()
    }

    /// Pose the running tween is heading to.
    #[must_use]
    pub fn destination(&self) -> Option<CameraPose> {
        self.tween.active().map(|t| t.target())
    }

    /// React to whatever changed in `scene` since the previous call.
    pub fn sync(&mut self, scene: &SceneStore, now_ms: f64) -> Option<CameraTransition> {
        let change = self.watcher.poll(scene)?;
        let transition = self.transition_for(scene, &change, now_ms);
        if let Some(transition) = transition {
            debug!(?transition, level = ?change.next.navigation_level, "camera transition");
        }
        transition
    }

    fn transition_for(&mut self, scene: &SceneStore, change: &SceneChange, now_ms: f64) -> Option<CameraTransition> {
        let next = &change.next;

        if next.navigation_level == NavigationLevel::Select {
            if !change.level_changed() {
                return None;
            }
            self.tween.cancel();
            return Some(CameraTransition::Cancelled);
        }

        if change.store_changed() {
            let overview = overview(scene, &self.settings)?;
            self.tween.cancel();
            self.pose = overview;
            // A fixture framed since the load still gets its entry glide.
            if next.navigation_level != NavigationLevel::Fixture {
                return Some(CameraTransition::Reset);
            }
            let front = self.vmd_pose(scene)?;
            self.tween.start(self.pose, front, now_ms, self.settings.enter_vmd_ms, Easing::EaseOutQuad);
            return Some(CameraTransition::EnterVmd);
        }

        match (change.prev.navigation_level, next.navigation_level) {
            (NavigationLevel::Fixture, NavigationLevel::Fixture) => {
                if !change.framed_changed() {
                    return None;
                }
                let front = self.vmd_pose(scene)?;
                // Re-aim at once; only the position glides.
                let from = CameraPose { position: self.pose.position, target: front.target };
                self.tween.start(from, front, now_ms, self.settings.step_vmd_ms, Easing::EaseOutQuad);
                Some(CameraTransition::StepVmd)
            }
            (_, NavigationLevel::Fixture) => {
                let front = self.vmd_pose(scene)?;
                self.tween.start(self.pose, front, now_ms, self.settings.enter_vmd_ms, Easing::EaseOutQuad);
                Some(CameraTransition::EnterVmd)
            }
            (NavigationLevel::Fixture, NavigationLevel::Store) => {
                let overview = overview(scene, &self.settings)?;
                self.tween.start(self.pose, overview, now_ms, self.settings.exit_vmd_ms, Easing::EaseInOutQuad);
                Some(CameraTransition::ExitVmd)
            }
            _ => None,
        }
    }

    fn vmd_pose(&self, scene: &SceneStore) -> Option<CameraPose> {
        let fixture = scene.vmd_fixture()?;
        Some(fixture_front_pose(fixture, scene.camera_config().fixture_view_distance))
    }

    /// Advance the running tween to `now_ms` and return the pose to render.
    pub fn tick(&mut self, now_ms: f64) -> CameraPose {
        if let Some(pose) = self.tween.tick(now_ms) {
            self.pose = pose;
        }
        self.pose
    }
}

fn overview(scene: &SceneStore, settings: &CameraSettings) -> Option<CameraPose> {
    Some(store_overview_pose(scene.store_center()?, scene.store_dimensions()?, settings))
}
