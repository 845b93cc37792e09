//! Store data model: fixtures, walls, columns, categories and the store itself.
//!
//! Coordinates follow a Y-up convention: `x` runs east/west, `y` is height and
//! `z` runs north/south. Every length is in meters. Types serialize to the
//! catalog's camelCase JSON so a store file can be loaded without a mapping
//! layer.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_WALL_THICKNESS, MAX_SHELF_COUNT, MIN_SHELF_COUNT, SHELF_TOP_CLEARANCE};

/// A point on the floor plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub z: f64,
}

impl Point2D {
    #[must_use]
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }
}

/// A point in world space. `y` is the vertical axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Projection onto the floor plane.
    #[must_use]
    pub fn floor(self) -> Point2D {
        Point2D { x: self.x, z: self.z }
    }
}

/// Box extents of a fixture. Width runs along local X, depth along local Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions3D {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Dimensions3D {
    #[must_use]
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self { width, height, depth }
    }
}

// =============================================================================
// FIXTURE CLASSIFICATION
// =============================================================================

/// What kind of furniture a fixture is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FixtureType {
    /// Double-sided freestanding shelving.
    Gondola,
    WallShelf,
    /// Caps the end of a gondola aisle.
    Endcap,
    Island,
    Refrigerator,
    Freezer,
    Checkout,
    Promotional,
}

impl FixtureType {
    pub const ALL: [Self; 8] = [
        Self::Gondola,
        Self::WallShelf,
        Self::Endcap,
        Self::Island,
        Self::Refrigerator,
        Self::Freezer,
        Self::Checkout,
        Self::Promotional,
    ];

    /// Style used when a fixture does not carry one explicitly.
    #[must_use]
    pub fn default_style(self) -> FixtureStyle {
        match self {
            Self::Refrigerator => FixtureStyle::Chilled,
            Self::Freezer => FixtureStyle::Frozen,
            Self::Island | Self::Promotional => FixtureStyle::Open,
            Self::Gondola | Self::WallShelf | Self::Endcap | Self::Checkout => FixtureStyle::Standard,
        }
    }

    /// Catalog footprint for a freshly placed fixture of this type.
    #[must_use]
    pub fn default_dimensions(self) -> Dimensions3D {
        match self {
            Self::Gondola => Dimensions3D::new(1.2, 1.8, 0.9),
            Self::WallShelf => Dimensions3D::new(1.2, 2.0, 0.5),
            Self::Endcap => Dimensions3D::new(1.2, 1.8, 0.6),
            Self::Island => Dimensions3D::new(1.5, 1.0, 1.5),
            Self::Refrigerator => Dimensions3D::new(1.5, 2.0, 0.8),
            Self::Freezer => Dimensions3D::new(2.0, 1.0, 1.2),
            Self::Checkout => Dimensions3D::new(1.0, 1.0, 0.6),
            Self::Promotional => Dimensions3D::new(1.2, 1.2, 0.6),
        }
    }
}

/// Visual style of a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureStyle {
    /// Tall shelving, five or six levels.
    Standard,
    /// Low table-style display.
    Open,
    Chilled,
    Frozen,
}

/// Frame, shelf and accent colours for a style, as CSS hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StylePalette {
    pub frame: &'static str,
    pub shelf: &'static str,
    pub accent: &'static str,
}

impl FixtureStyle {
    pub const ALL: [Self; 4] = [Self::Standard, Self::Open, Self::Chilled, Self::Frozen];

    /// Shelf layout applied when the style is picked in the edit panel.
    #[must_use]
    pub fn default_structure(self) -> FixtureStructure {
        match self {
            Self::Standard => FixtureStructure::new(vec![0.3, 0.6, 0.9, 1.2, 1.5], 0.15),
            Self::Open => FixtureStructure::new(vec![0.4, 0.7], 0.1),
            Self::Chilled => FixtureStructure::new(vec![0.4, 0.8, 1.2, 1.6], 0.2),
            Self::Frozen => FixtureStructure::new(vec![0.3, 0.6, 0.9], 0.3),
        }
    }

    #[must_use]
    pub fn palette(self) -> StylePalette {
        match self {
            Self::Standard => StylePalette { frame: "#8B7355", shelf: "#f5f5f5", accent: "#a3a3a3" },
            Self::Open => StylePalette { frame: "#696969", shelf: "#d4d4d4", accent: "#525252" },
            Self::Chilled => StylePalette { frame: "#60a5fa", shelf: "#dbeafe", accent: "#3b82f6" },
            Self::Frozen => StylePalette { frame: "#93c5fd", shelf: "#e0f2fe", accent: "#2563eb" },
        }
    }
}

/// Shelf layout inside a fixture.
///
/// `shelf_heights.len()` should equal `shelf_count` and every height should sit
/// strictly between `base_height` and the fixture height. Nothing in the store
/// enforces this; callers that edit structure keep it consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureStructure {
    pub shelf_count: u32,
    /// Shelf heights measured from the floor.
    pub shelf_heights: Vec<f64>,
    pub base_height: f64,
}

impl FixtureStructure {
    /// Build a structure whose count matches the given heights.
    #[must_use]
    pub fn new(shelf_heights: Vec<f64>, base_height: f64) -> Self {
        let shelf_count = u32::try_from(shelf_heights.len()).unwrap_or(u32::MAX);
        Self { shelf_count, shelf_heights, base_height }
    }

    /// Re-space `count` shelves evenly between the base and the top of a
    /// fixture of `fixture_height`. `count` is clamped to the edit panel's range.
    #[must_use]
    pub fn evenly_spaced(count: u32, base_height: f64, fixture_height: f64) -> Self {
        let count = count.clamp(MIN_SHELF_COUNT, MAX_SHELF_COUNT);
        let spacing = (fixture_height - base_height - SHELF_TOP_CLEARANCE) / f64::from(count + 1);
        let shelf_heights = (1..=count).map(|i| base_height + spacing * f64::from(i)).collect();
        Self { shelf_count: count, shelf_heights, base_height }
    }

    /// Whether the count matches the heights and every shelf lies strictly
    /// between the base and `fixture_height`.
    #[must_use]
    pub fn is_consistent(&self, fixture_height: f64) -> bool {
        usize::try_from(self.shelf_count).is_ok_and(|n| n == self.shelf_heights.len())
            && self
                .shelf_heights
                .iter()
                .all(|&h| h > self.base_height && h < fixture_height)
    }
}

// =============================================================================
// FIXTURE
// =============================================================================

/// A placeable store furniture unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    pub id: String,
    pub name: String,
    /// Center of the footprint. `y` stays at floor level unless lifted.
    pub position: Point3D,
    /// Rotation about the vertical axis in degrees. The rotate gizmo keeps it
    /// on 15° steps but storage accepts any value.
    pub rotation: f64,
    pub dimensions: Dimensions3D,
    #[serde(rename = "type")]
    pub kind: FixtureType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<FixtureStyle>,
    pub structure: FixtureStructure,
    /// Product category used to tint the fixture.
    #[serde(default)]
    pub category_id: Option<String>,
}

impl Fixture {
    /// The stored style, or the type's default when none is stored.
    #[must_use]
    pub fn effective_style(&self) -> FixtureStyle {
        self.style.unwrap_or_else(|| self.kind.default_style())
    }

    /// A copy of this fixture placed at `position`.
    #[must_use]
    pub fn placed_at(&self, position: Point3D) -> Self {
        Self { position, ..self.clone() }
    }
}

// =============================================================================
// STRUCTURE: WALLS AND COLUMNS
// =============================================================================

/// A straight wall segment. Walls never change during a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: String,
    pub start: Point2D,
    pub end: Point2D,
    pub height: f64,
    #[serde(default = "default_wall_thickness")]
    pub thickness: f64,
}

fn default_wall_thickness() -> f64 {
    DEFAULT_WALL_THICKNESS
}

/// A structural column. Rendered only; not part of collision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub position: Point2D,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
}

// =============================================================================
// STORE
// =============================================================================

/// A product category that fixtures may be assigned to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCategory {
    pub id: String,
    pub name: String,
    /// Zone colour as a CSS hex string.
    pub color: String,
    #[serde(default)]
    pub is_refrigerated: bool,
    /// Parent category for two-level groupings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// Floor plan backdrop and the real-world size it covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlan {
    #[serde(default)]
    pub image_url: String,
    pub width_meters: f64,
    pub depth_meters: f64,
}

/// Camera heights and distances configured per store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraConfig {
    pub store_view_height: f64,
    pub zone_view_min_height: f64,
    pub zone_view_max_height: f64,
    /// Standoff between a fixture's front face and the VMD camera.
    pub fixture_view_distance: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            store_view_height: 25.0,
            zone_view_min_height: 8.0,
            zone_view_max_height: 15.0,
            fixture_view_distance: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreMeta {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Everything known about one store, loaded wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub meta: StoreMeta,
    pub floor_plan: FloorPlan,
    #[serde(default)]
    pub walls: Vec<Wall>,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub fixtures: Vec<Fixture>,
    #[serde(default)]
    pub product_categories: Vec<ProductCategory>,
    #[serde(default)]
    pub camera_config: CameraConfig,
}

impl Store {
    /// Listing entry for store pickers.
    #[must_use]
    pub fn summary(&self) -> StoreListItem {
        StoreListItem {
            id: self.meta.id.clone(),
            name: self.meta.name.clone(),
            address: self.meta.address.clone(),
            thumbnail: self.meta.thumbnail.clone(),
            fixture_count: self.fixtures.len(),
            updated_at: self.meta.updated_at.clone(),
        }
    }
}

/// Condensed store information for listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreListItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub fixture_count: usize,
    pub updated_at: String,
}
