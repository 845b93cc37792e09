#![allow(clippy::float_cmp)]

use proptest::prelude::*;

use super::*;
use crate::model::Point2D;
use crate::model::test_helpers::{fixture, rotated, wall};

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// --- fixture_bounds ---

#[test]
fn unrotated_bounds_are_centered() {
    let b = fixture_bounds(&fixture("a", 5.0, 5.0, 1.2, 0.5));
    assert!(approx_eq(b.min_x, 4.4));
    assert!(approx_eq(b.max_x, 5.6));
    assert!(approx_eq(b.min_z, 4.75));
    assert!(approx_eq(b.max_z, 5.25));
    assert_eq!(b.center_x, 5.0);
    assert_eq!(b.center_z, 5.0);
}

#[test]
fn quarter_turn_swaps_axes() {
    let b = fixture_bounds(&rotated(fixture("a", 5.0, 5.0, 1.2, 0.5), 90.0));
    assert!(approx_eq(b.width, 0.5));
    assert!(approx_eq(b.depth, 1.2));
    assert!(approx_eq(b.min_x, 4.75));
    assert!(approx_eq(b.max_z, 5.6));
}

#[test]
fn forty_five_degrees_over_approximates() {
    let (w, d) = effective_extents(1.0, 1.0, 45.0);
    let expected = std::f64::consts::SQRT_2;
    assert!(approx_eq(w, expected));
    assert!(approx_eq(d, expected));
}

#[test]
fn bounds_at_uses_candidate_position() {
    let f = fixture("a", 0.0, 0.0, 2.0, 1.0);
    let b = fixture_bounds_at(&f, Point3D::new(10.0, 0.0, -3.0));
    assert!(approx_eq(b.min_x, 9.0));
    assert!(approx_eq(b.max_z, -2.5));
}

#[test]
fn zero_size_fixture_has_degenerate_box() {
    let b = fixture_bounds(&fixture("a", 1.0, 1.0, 0.0, 0.0));
    assert_eq!(b.min_x, b.max_x);
    assert_eq!(b.min_z, b.max_z);
}

// --- wall_bounds ---

#[test]
fn horizontal_wall_grows_by_half_thickness() {
    let b = wall_bounds(&wall("w", 0.0, 10.0, 20.0, 10.0, 0.2));
    assert!(b.is_horizontal);
    assert!(!b.is_vertical);
    assert!(approx_eq(b.min_x, -0.1));
    assert!(approx_eq(b.max_x, 20.1));
    assert!(approx_eq(b.min_z, 9.9));
    assert!(approx_eq(b.max_z, 10.1));
}

#[test]
fn vertical_wall_classified_with_reversed_endpoints() {
    let b = wall_bounds(&wall("w", 3.0, 8.0, 3.005, 0.0, 0.25));
    assert!(b.is_vertical);
    assert!(!b.is_horizontal);
    assert!(approx_eq(b.min_z, -0.125));
    assert!(approx_eq(b.max_z, 8.125));
}

#[test]
fn diagonal_wall_is_neither() {
    let b = wall_bounds(&wall("w", 0.0, 0.0, 5.0, 5.0, 0.2));
    assert!(b.is_diagonal());
    assert!(approx_eq(b.min_x, -0.1));
    assert!(approx_eq(b.max_z, 5.1));
}

#[test]
fn wall_start_and_end_carry_through() {
    let w = wall("w", 1.0, 2.0, 1.0, 6.0, 0.1);
    assert_eq!(w.start, Point2D::new(1.0, 2.0));
    assert!(wall_bounds(&w).is_vertical);
}

// --- overlap ---

#[test]
fn touching_boxes_do_not_overlap() {
    let a = fixture_bounds(&fixture("a", 0.0, 0.0, 1.0, 1.0));
    let b = fixture_bounds(&fixture("b", 1.0, 0.0, 1.0, 1.0));
    assert!(!a.overlaps(&b));
    assert!(!b.overlaps(&a));
}

#[test]
fn intersecting_boxes_overlap() {
    let a = fixture_bounds(&fixture("a", 0.0, 0.0, 1.0, 1.0));
    let b = fixture_bounds(&fixture("b", 0.9, 0.9, 1.0, 1.0));
    assert!(a.overlaps(&b));
}

#[test]
fn zero_size_box_never_overlaps() {
    let dot = fixture_bounds(&fixture("a", 0.0, 0.0, 0.0, 0.0));
    let big = fixture_bounds(&fixture("b", 0.0, 0.0, 10.0, 10.0));
    assert!(!dot.overlaps(&big));
    assert!(!big.overlaps(&dot));
}

#[test]
fn fixture_overlaps_wall_box() {
    let w = wall_bounds(&wall("w", 0.0, 0.0, 10.0, 0.0, 0.2));
    let inside = fixture_bounds(&fixture("a", 5.0, 0.2, 1.0, 0.5));
    let clear = fixture_bounds(&fixture("b", 5.0, 0.5, 1.0, 0.5));
    assert!(inside.overlaps_wall(&w));
    assert!(!clear.overlaps_wall(&w));
}

// --- properties ---

proptest! {
    #[test]
    fn half_turn_preserves_extents(
        width in 0.1f64..5.0,
        depth in 0.1f64..5.0,
        rotation in 0.0f64..360.0,
    ) {
        let (w1, d1) = effective_extents(width, depth, rotation);
        let (w2, d2) = effective_extents(width, depth, rotation + 180.0);
        prop_assert!((w1 - w2).abs() < 1e-9);
        prop_assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn rotated_box_contains_footprint(
        width in 0.1f64..5.0,
        depth in 0.1f64..5.0,
        rotation in 0.0f64..360.0,
    ) {
        let (w, d) = effective_extents(width, depth, rotation);
        prop_assert!(w + 1e-9 >= width.min(depth));
        prop_assert!(d + 1e-9 >= width.min(depth));
    }

    #[test]
    fn overlap_is_symmetric(
        ax in -10.0f64..10.0, az in -10.0f64..10.0,
        bx in -10.0f64..10.0, bz in -10.0f64..10.0,
    ) {
        let a = fixture_bounds(&fixture("a", ax, az, 2.0, 1.0));
        let b = fixture_bounds(&fixture("b", bx, bz, 1.5, 0.5));
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }
}
