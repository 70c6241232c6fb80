//! Exact triangle / box overlap via the separating axis theorem.
//!
//! Thirteen candidate axes separate a triangle from an axis-aligned box:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │ (a) 3 box face normals      X, Y, Z  (triangle AABB range test)  │
//! │ (b) 1 triangle normal       e0 × e1  (plane / box test)          │
//! │ (c) 9 edge cross products   e_n × {X, Y, Z} for n = 0, 1, 2      │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any axis on which the projections are disjoint proves separation. Equal
//! projection bounds are not a separation, so a triangle touching the box
//! surface overlaps it.
//!
//! All values are locals of a single call; nothing is shared between calls,
//! so the test is safe to run from any number of threads.

use glam::DVec3;

/// Test whether triangle `(t0, t1, t2)` overlaps the box given by `centre` and
/// `half_size`.
///
/// Zero-area triangles have no plane and never overlap.
pub fn triangle_intersects_aabb(
  t0: DVec3,
  t1: DVec3,
  t2: DVec3,
  centre: DVec3,
  half_size: DVec3,
) -> bool {
  // Move everything so that the box centre is at the origin.
  let v0 = t0 - centre;
  let v1 = t1 - centre;
  let v2 = t2 - centre;

  let e0 = v1 - v0;
  let e1 = v2 - v1;
  let e2 = v0 - v2;

  // (a) triangle AABB against the box, one axis at a time
  for axis in 0..3 {
    if range_separated(v0[axis], v1[axis], v2[axis], half_size[axis]) {
      return false;
    }
  }

  // (b) triangle plane against the box
  let normal = e0.cross(e1);
  if normal.length_squared() == 0.0 {
    return false;
  }
  if !plane_box_overlap(normal, v0, half_size) {
    return false;
  }

  // (c) edge × axis. Two vertices of an edge project to the same value on
  // that edge's cross axes, so only two projections need comparing.
  let (hx, hy, hz) = (half_size.x, half_size.y, half_size.z);
  for (edge, a, b) in [(e0, v0, v2), (e1, v0, v2), (e2, v0, v1)] {
    let f = edge.abs();

    // e × X = (0, e.z, -e.y)
    if axis_separated(
      edge.z * a.y - edge.y * a.z,
      edge.z * b.y - edge.y * b.z,
      f.z * hy + f.y * hz,
    ) {
      return false;
    }

    // e × Y = (-e.z, 0, e.x)
    if axis_separated(
      -edge.z * a.x + edge.x * a.z,
      -edge.z * b.x + edge.x * b.z,
      f.z * hx + f.x * hz,
    ) {
      return false;
    }
  }

  // edge × Z uses a different vertex pair per edge.
  for (edge, a, b) in [(e0, v1, v2), (e1, v0, v1), (e2, v1, v2)] {
    let f = edge.abs();
    if axis_separated(
      edge.y * a.x - edge.x * a.y,
      edge.y * b.x - edge.x * b.y,
      f.y * hx + f.x * hy,
    ) {
      return false;
    }
  }

  true
}

/// Projections `p0`, `p1` of the triangle against box radius `rad`.
#[inline(always)]
fn axis_separated(p0: f64, p1: f64, rad: f64) -> bool {
  let (min, max) = if p0 < p1 { (p0, p1) } else { (p1, p0) };
  min > rad || max < -rad
}

#[inline(always)]
fn range_separated(x0: f64, x1: f64, x2: f64, half: f64) -> bool {
  let min = x0.min(x1).min(x2);
  let max = x0.max(x1).max(x2);
  min > half || max < -half
}

/// Does the plane through `vert` with `normal` cross the box `[-max_box, max_box]`?
fn plane_box_overlap(normal: DVec3, vert: DVec3, max_box: DVec3) -> bool {
  let mut vmin = DVec3::ZERO;
  let mut vmax = DVec3::ZERO;

  for q in 0..3 {
    let v = vert[q];
    if normal[q] > 0.0 {
      vmin[q] = -max_box[q] - v;
      vmax[q] = max_box[q] - v;
    } else {
      vmin[q] = max_box[q] - v;
      vmax[q] = -max_box[q] - v;
    }
  }

  if normal.dot(vmin) > 0.0 {
    return false;
  }
  normal.dot(vmax) >= 0.0
}

#[cfg(test)]
#[path = "triangle_test.rs"]
mod triangle_test;
