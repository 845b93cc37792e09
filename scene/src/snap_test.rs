#![allow(clippy::float_cmp)]

use proptest::prelude::*;

use super::*;
use crate::consts::SNAP_DISTANCE;
use crate::model::test_helpers::{fixture, rotated, wall};

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn at(x: f64, z: f64) -> Point3D {
    Point3D::new(x, 0.0, z)
}

// --- snap_to_grid ---

#[test]
fn grid_rounds_to_nearest_step() {
    assert!(approx_eq(snap_to_grid(3.14, 0.1), 3.1));
    assert!(approx_eq(snap_to_grid(3.16, 0.1), 3.2));
    assert!(approx_eq(snap_to_grid(-0.04, 0.1), 0.0));
    assert!(approx_eq(snap_to_grid(7.3, 0.5), 7.5));
}

// --- snap_to_fixtures ---

#[test]
fn left_edge_snaps_to_neighbour_right_face() {
    let first = fixture("first", 10.0, 5.0, 1.25, 0.5);
    let second = fixture("second", 11.3, 5.0, 1.25, 0.5);
    let others = vec![first, second.clone()];

    let result = snap_to_fixtures(at(11.35, 5.0), &second, &others, SNAP_DISTANCE);

    assert_eq!(result.snapped_edge, Some(SnapEdge::Left));
    assert_eq!(result.snapped_to_fixture_id.as_deref(), Some("first"));
    assert!(approx_eq(result.position.x, 11.25));
    assert!(approx_eq(result.position.z, 5.0));
}

#[test]
fn right_edge_snaps_to_neighbour_left_face() {
    let a = fixture("a", 10.0, 5.0, 1.0, 0.5);
    let target = fixture("t", 0.0, 0.0, 1.0, 0.5);

    let result = snap_to_fixtures(at(8.875, 5.0), &target, &[a], SNAP_DISTANCE);

    assert_eq!(result.snapped_edge, Some(SnapEdge::Right));
    assert!(approx_eq(result.position.x, 9.0));
}

#[test]
fn front_edge_snaps_to_neighbour_back_face() {
    let a = fixture("a", 10.0, 10.0, 1.0, 0.5);
    let target = fixture("t", 0.0, 0.0, 1.0, 0.5);

    let result = snap_to_fixtures(at(10.0, 9.375), &target, &[a], SNAP_DISTANCE);

    assert_eq!(result.snapped_edge, Some(SnapEdge::Front));
    assert!(approx_eq(result.position.z, 9.5));
    assert!(approx_eq(result.position.x, 10.0));
}

#[test]
fn edge_snap_requires_same_row() {
    let a = fixture("a", 10.0, 5.0, 1.0, 0.5);
    let target = fixture("t", 0.0, 0.0, 1.0, 0.5);

    // Right face is 0.125 from a's left face, but 2 m further down the floor.
    let result = snap_to_fixtures(at(8.875, 7.0), &target, &[a], SNAP_DISTANCE);

    assert_eq!(result.snapped_to_fixture_id, None);
    assert_eq!(result.snapped_edge, None);
}

#[test]
fn center_snap_composes_onto_edge_snap() {
    let a = fixture("a", 10.0, 5.0, 1.2, 0.6);
    let target = fixture("t", 0.0, 0.0, 1.2, 0.6);

    let result = snap_to_fixtures(at(10.04, 5.65), &target, &[a], SNAP_DISTANCE);

    assert_eq!(result.snapped_edge, Some(SnapEdge::Back));
    assert_eq!(result.snapped_to_fixture_id.as_deref(), Some("a"));
    assert!(approx_eq(result.position.x, 10.0));
    assert!(approx_eq(result.position.z, 5.6));
}

#[test]
fn closer_neighbour_wins() {
    let near = fixture("near", 10.0, 5.0, 1.0, 0.5);
    let far = fixture("far", 3.0, 5.0, 1.0, 0.5);
    let target = fixture("t", 0.0, 0.0, 1.0, 0.5);

    // 0.05 from near's left face, 0.2 from far's right face.
    let result = snap_to_fixtures(at(8.95, 5.0), &target, &[far, near], 1.0);

    assert_eq!(result.snapped_to_fixture_id.as_deref(), Some("near"));
    assert!(approx_eq(result.position.x, 9.0));
}

#[test]
fn rotated_neighbour_uses_effective_extents() {
    // A 90° turn makes the neighbour 0.5 wide along X.
    let a = rotated(fixture("a", 10.0, 5.0, 1.25, 0.5), 90.0);
    let target = fixture("t", 0.0, 0.0, 1.0, 0.5);

    let result = snap_to_fixtures(at(9.3, 5.0), &target, &[a], SNAP_DISTANCE);

    assert_eq!(result.snapped_edge, Some(SnapEdge::Right));
    assert!(approx_eq(result.position.x, 9.25));
}

#[test]
fn no_neighbour_falls_back_to_grid() {
    let target = fixture("t", 0.0, 0.0, 1.0, 0.5);

    let result = snap_to_fixtures(Point3D::new(3.14, 0.2, 7.77), &target, &[], SNAP_DISTANCE);

    assert!(!result.is_snapped());
    assert!(approx_eq(result.position.x, 3.1));
    assert!(approx_eq(result.position.z, 7.8));
    assert_eq!(result.position.y, 0.2);
}

#[test]
fn target_ignores_itself() {
    let target = fixture("t", 5.0, 5.0, 1.0, 0.5);
    let others = vec![target.clone()];

    let result = snap_to_fixtures(at(5.04, 5.0), &target, &others, SNAP_DISTANCE);

    assert_eq!(result.snapped_to_fixture_id, None);
    assert!(approx_eq(result.position.x, 5.0));
}

#[test]
fn snapped_position_snaps_to_itself() {
    let first = fixture("first", 10.0, 5.0, 1.25, 0.5);
    let second = fixture("second", 11.3, 5.0, 1.25, 0.5);
    let others = vec![first, second.clone()];

    let once = snap_to_fixtures(at(11.35, 5.0), &second, &others, SNAP_DISTANCE);
    let twice = snap_to_fixtures(once.position, &second, &others, SNAP_DISTANCE);

    assert!(approx_eq(once.position.x, twice.position.x));
    assert!(approx_eq(once.position.z, twice.position.z));
    assert_eq!(once.snapped_to_fixture_id, twice.snapped_to_fixture_id);
}

// --- snap_to_walls ---

#[test]
fn left_edge_snaps_to_vertical_wall() {
    let w = wall("w", 0.0, 0.0, 0.0, 20.0, 0.2);
    let target = fixture("t", 0.0, 0.0, 1.2, 0.6);

    let result = snap_to_walls(at(0.8, 5.0), &target, &[w], SNAP_DISTANCE);

    assert_eq!(result.snapped_edge, Some(SnapEdge::Left));
    assert_eq!(result.snapped_to_wall_id.as_deref(), Some("w"));
    assert!(approx_eq(result.position.x, 0.7));
}

#[test]
fn front_edge_snaps_to_horizontal_wall() {
    let w = wall("w", 0.0, 10.0, 20.0, 10.0, 0.2);
    let target = fixture("t", 0.0, 0.0, 1.2, 0.6);

    let result = snap_to_walls(at(5.0, 9.5), &target, &[w], SNAP_DISTANCE);

    assert_eq!(result.snapped_edge, Some(SnapEdge::Front));
    assert!(approx_eq(result.position.z, 9.6));
    assert!(approx_eq(result.position.x, 5.0));
}

#[test]
fn wall_outside_span_is_ignored() {
    let w = wall("w", 0.0, 10.0, 0.0, 20.0, 0.2);
    let target = fixture("t", 0.0, 0.0, 1.2, 0.6);

    let result = snap_to_walls(at(0.8, 5.0), &target, &[w], SNAP_DISTANCE);

    assert!(!result.is_snapped());
    assert_eq!(result.position, at(0.8, 5.0));
}

#[test]
fn diagonal_wall_never_snaps() {
    let w = wall("w", 0.0, 0.0, 10.0, 10.0, 0.2);
    let target = fixture("t", 0.0, 0.0, 1.0, 0.5);

    let result = snap_to_walls(at(5.0, 4.2), &target, &[w], SNAP_DISTANCE);

    assert_eq!(result.snapped_to_wall_id, None);
    assert_eq!(result.position, at(5.0, 4.2));
}

// --- snap_to_fixtures_and_walls ---

#[test]
fn wall_snap_overrides_fixture_snap() {
    let a = fixture("a", 5.0, 5.0, 1.0, 0.5);
    let w = wall("w", 7.0, 0.0, 7.0, 10.0, 0.5);
    let target = fixture("t", 2.0, 5.0, 1.0, 0.5);

    let result = snap_to_fixtures_and_walls(at(6.125, 5.0), &target, &[a], &[w], SNAP_DISTANCE);

    assert_eq!(result.snapped_to_fixture_id.as_deref(), Some("a"));
    assert_eq!(result.snapped_to_wall_id.as_deref(), Some("w"));
    assert_eq!(result.snapped_edge, Some(SnapEdge::Right));
    assert!(approx_eq(result.position.x, 6.25));
    assert!(approx_eq(result.position.z, 5.0));
}

#[test]
fn fixture_snap_kept_without_wall() {
    let first = fixture("first", 10.0, 5.0, 1.25, 0.5);
    let second = fixture("second", 11.3, 5.0, 1.25, 0.5);
    let others = vec![first, second.clone()];

    let result = snap_to_fixtures_and_walls(at(11.35, 5.0), &second, &others, &[], SNAP_DISTANCE);

    assert_eq!(result.snapped_edge, Some(SnapEdge::Left));
    assert_eq!(result.snapped_to_wall_id, None);
    assert!(approx_eq(result.position.x, 11.25));
}

#[test]
fn penetrating_wall_rolls_back_to_current_position() {
    let w = wall("w", 7.0, 0.0, 7.0, 10.0, 0.5);
    let target = fixture("t", 2.0, 5.0, 1.0, 0.5);

    let result = snap_to_fixtures_and_walls(at(7.0, 5.0), &target, &[], &[w], SNAP_DISTANCE);

    assert_eq!(result.position, target.position);
}

#[test]
fn diagonal_wall_still_blocks() {
    let w = wall("w", 0.0, 0.0, 10.0, 10.0, 0.2);
    let target = fixture("t", 2.0, 8.0, 1.0, 0.5);

    let result = snap_to_fixtures_and_walls(at(5.0, 5.0), &target, &[], &[w], SNAP_DISTANCE);

    assert_eq!(result.position, target.position);
}

// --- collision ---

#[test]
fn collision_detects_overlap() {
    let a = fixture("a", 5.0, 5.0, 1.0, 0.5);
    let target = fixture("t", 0.0, 0.0, 1.0, 0.5);
    assert!(check_collision(&target, at(5.5, 5.0), std::slice::from_ref(&a)));
    assert!(!check_collision(&target, at(6.0, 5.0), &[a]));
}

#[test]
fn collision_skips_self() {
    let target = fixture("t", 5.0, 5.0, 1.0, 0.5);
    assert!(!check_collision(&target, at(5.0, 5.0), std::slice::from_ref(&target)));
}

#[test]
fn zero_size_fixture_never_collides() {
    let target = fixture("t", 0.0, 0.0, 0.0, 0.0);
    let a = fixture("a", 5.0, 5.0, 4.0, 4.0);
    let w = wall("w", 5.0, 0.0, 5.0, 10.0, 0.5);
    assert!(!check_collision(&target, at(5.0, 5.0), &[a]));
    assert!(!check_wall_collision(&target, at(5.0, 5.0), &[w]));
}

#[test]
fn wall_collision_detects_overlap() {
    let w = wall("w", 7.0, 0.0, 7.0, 10.0, 0.5);
    let target = fixture("t", 0.0, 0.0, 1.0, 0.5);
    assert!(check_wall_collision(&target, at(6.5, 5.0), std::slice::from_ref(&w)));
    assert!(!check_wall_collision(&target, at(6.25, 5.0), &[w]));
}

// --- clamp_to_wall_bounds ---

#[test]
fn clamp_pushes_out_of_vertical_wall() {
    let w = wall("w", 7.0, 0.0, 7.0, 10.0, 0.5);
    let target = fixture("t", 0.0, 0.0, 1.0, 0.5);

    let clamped = clamp_to_wall_bounds(at(6.5, 5.0), &target, std::slice::from_ref(&w));

    assert!(approx_eq(clamped.x, 6.24));
    assert_eq!(clamped.z, 5.0);
    assert!(!check_wall_collision(&target, clamped, &[w]));
}

#[test]
fn clamp_pushes_out_of_horizontal_wall() {
    let w = wall("w", 0.0, 10.0, 20.0, 10.0, 0.5);
    let target = fixture("t", 0.0, 0.0, 1.0, 0.5);

    let clamped = clamp_to_wall_bounds(at(5.0, 10.2), &target, std::slice::from_ref(&w));

    assert!(approx_eq(clamped.z, 10.51));
    assert_eq!(clamped.x, 5.0);
    assert!(!check_wall_collision(&target, clamped, &[w]));
}

#[test]
fn clamp_leaves_clear_position() {
    let w = wall("w", 7.0, 0.0, 7.0, 10.0, 0.5);
    let target = fixture("t", 0.0, 0.0, 1.0, 0.5);
    assert_eq!(clamp_to_wall_bounds(at(3.0, 5.0), &target, &[w]), at(3.0, 5.0));
}

#[test]
fn clamp_ignores_diagonal_wall() {
    let w = wall("w", 0.0, 0.0, 10.0, 10.0, 0.2);
    let target = fixture("t", 0.0, 0.0, 1.0, 0.5);
    assert_eq!(clamp_to_wall_bounds(at(5.0, 5.0), &target, &[w]), at(5.0, 5.0));
}

// --- properties ---

proptest! {
    #[test]
    fn grid_snap_is_idempotent(value in -100.0f64..100.0) {
        let once = snap_to_grid(value, GRID_SIZE);
        let twice = snap_to_grid(once, GRID_SIZE);
        prop_assert!((once - twice).abs() < 1e-9);
        prop_assert!((once - value).abs() <= GRID_SIZE / 2.0 + 1e-9);
    }

    #[test]
    fn lone_fixture_lands_on_grid(x in -50.0f64..50.0, z in -50.0f64..50.0) {
        let target = fixture("t", 0.0, 0.0, 1.0, 0.5);
        let result = snap_to_fixtures(at(x, z), &target, &[], SNAP_DISTANCE);
        prop_assert!(!result.is_snapped());
        prop_assert!((result.position.x - snap_to_grid(x, GRID_SIZE)).abs() < 1e-9);
        prop_assert!((result.position.z - snap_to_grid(z, GRID_SIZE)).abs() < 1e-9);
    }

    #[test]
    fn combined_snap_never_ends_inside_a_wall(x in 0.0f64..14.0, z in 0.0f64..10.0) {
        let walls = vec![
            wall("v", 7.0, 0.0, 7.0, 10.0, 0.5),
            wall("h", 0.0, 10.0, 14.0, 10.0, 0.5),
        ];
        let target = fixture("t", 2.0, 5.0, 1.0, 0.5);
        let result = snap_to_fixtures_and_walls(at(x, z), &target, &[], &walls, SNAP_DISTANCE);
        prop_assert!(!check_wall_collision(&target, result.position, &walls));
    }
}
