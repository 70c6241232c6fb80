use glam::DVec3;

use super::*;

const UNIT_HALF: DVec3 = DVec3::ONE;

fn v(x: f64, y: f64, z: f64) -> DVec3 {
  DVec3::new(x, y, z)
}

// =============================================================================
// Batch 1: Basic overlap
// =============================================================================

#[test]
fn test_triangle_inside_box_overlaps() {
  assert!(triangle_intersects_aabb(
    v(-0.5, -0.5, 0.0),
    v(0.5, -0.5, 0.0),
    v(0.0, 0.5, 0.0),
    DVec3::ZERO,
    UNIT_HALF,
  ));
}

#[test]
fn test_box_inside_large_triangle_overlaps() {
  // No triangle vertex lies inside the box, but the plane cuts through it.
  assert!(triangle_intersects_aabb(
    v(-10.0, -10.0, 0.0),
    v(10.0, -10.0, 0.0),
    v(0.0, 10.0, 0.0),
    DVec3::ZERO,
    UNIT_HALF,
  ));
}

#[test]
fn test_far_triangle_is_separated() {
  assert!(!triangle_intersects_aabb(
    v(5.0, 5.0, 5.0),
    v(6.0, 5.0, 5.0),
    v(5.0, 6.0, 5.0),
    DVec3::ZERO,
    UNIT_HALF,
  ));
}

// =============================================================================
// Batch 2: Touching counts as overlap
// =============================================================================

/// A triangle with a vertex exactly on a box face overlaps the box.
#[test]
fn test_vertex_on_box_face_overlaps() {
  assert!(triangle_intersects_aabb(
    v(1.0, 0.0, 0.0),
    v(2.0, 0.5, 0.0),
    v(2.0, -0.5, 0.3),
    DVec3::ZERO,
    UNIT_HALF,
  ));
}

#[test]
fn test_triangle_lying_on_box_face_overlaps() {
  assert!(triangle_intersects_aabb(
    v(1.0, -0.5, -0.5),
    v(1.0, 0.5, -0.5),
    v(1.0, 0.0, 0.5),
    DVec3::ZERO,
    UNIT_HALF,
  ));
}

#[test]
fn test_plane_touching_box_corner_overlaps() {
  // Plane x + y + z = 3 passes exactly through the (1, 1, 1) corner.
  assert!(triangle_intersects_aabb(
    v(3.0, 0.0, 0.0),
    v(0.0, 3.0, 0.0),
    v(0.0, 0.0, 3.0),
    DVec3::ZERO,
    UNIT_HALF,
  ));
}

// =============================================================================
// Batch 3: Individual separating axes
// =============================================================================

#[test]
fn test_separated_by_triangle_plane() {
  // Triangle AABB overlaps the box, but the plane x + y + z = 4 misses it.
  assert!(!triangle_intersects_aabb(
    v(4.0, 0.0, 0.0),
    v(0.0, 4.0, 0.0),
    v(0.0, 0.0, 4.0),
    DVec3::ZERO,
    UNIT_HALF,
  ));
}

#[test]
fn test_separated_by_edge_cross_axis() {
  // Triangle AABB and plane both overlap the box; only the hypotenuse
  // (x + y = 2.5) separates the triangle from the (1, 1) corner.
  assert!(!triangle_intersects_aabb(
    v(-0.5, 3.0, 0.0),
    v(3.0, -0.5, 0.0),
    v(3.0, 3.0, 0.0),
    DVec3::ZERO,
    UNIT_HALF,
  ));
}

#[test]
fn test_separated_on_single_axis_range() {
  assert!(!triangle_intersects_aabb(
    v(-0.5, -0.5, 1.5),
    v(0.5, -0.5, 1.5),
    v(0.0, 0.5, 2.0),
    DVec3::ZERO,
    UNIT_HALF,
  ));
}

#[test]
fn test_offset_box_centre() {
  let centre = v(10.0, 10.0, 10.0);
  let half = DVec3::splat(0.5);
  assert!(triangle_intersects_aabb(
    v(9.0, 10.0, 10.0),
    v(11.0, 10.0, 10.0),
    v(10.0, 11.0, 10.0),
    centre,
    half,
  ));
  assert!(!triangle_intersects_aabb(
    v(9.0, 10.0, 12.0),
    v(11.0, 10.0, 12.0),
    v(10.0, 11.0, 12.0),
    centre,
    half,
  ));
}

// =============================================================================
// Batch 4: Degenerate input
// =============================================================================

#[test]
fn test_zero_area_triangle_never_overlaps() {
  assert!(!triangle_intersects_aabb(
    v(0.0, 0.0, 0.0),
    v(0.5, 0.0, 0.0),
    v(0.25, 0.0, 0.0),
    DVec3::ZERO,
    UNIT_HALF,
  ));
  assert!(!triangle_intersects_aabb(
    DVec3::ZERO,
    DVec3::ZERO,
    DVec3::ZERO,
    DVec3::ZERO,
    UNIT_HALF,
  ));
}

#[test]
fn test_zero_volume_box_inside_triangle() {
  assert!(triangle_intersects_aabb(
    v(-10.0, -10.0, 0.0),
    v(10.0, -10.0, 0.0),
    v(0.0, 10.0, 0.0),
    v(0.1, 0.1, 0.0),
    DVec3::ZERO,
  ));
  assert!(!triangle_intersects_aabb(
    v(-10.0, -10.0, 0.0),
    v(10.0, -10.0, 0.0),
    v(0.0, 10.0, 0.0),
    v(0.1, 0.1, 0.5),
    DVec3::ZERO,
  ));
}
