//! Test utilities: mesh fixtures shared by the unit tests.

use glam::DVec3;

use crate::types::MeshData;

// =============================================================================
// Mesh fixtures
// =============================================================================

/// Closed axis-aligned box `[min, max]` as 8 vertices and 12 triangles.
pub fn box_mesh(min: DVec3, max: DVec3) -> MeshData {
  let corners = [
    [min.x, min.y, min.z],
    [max.x, min.y, min.z],
    [max.x, max.y, min.z],
    [min.x, max.y, min.z],
    [min.x, min.y, max.z],
    [max.x, min.y, max.z],
    [max.x, max.y, max.z],
    [min.x, max.y, max.z],
  ];
  let vertices = corners.iter().flatten().copied().collect();

  #[rustfmt::skip]
  let triangles = vec![
    0, 2, 1,  0, 3, 2, // -z
    4, 5, 6,  4, 6, 7, // +z
    0, 1, 5,  0, 5, 4, // -y
    3, 7, 6,  3, 6, 2, // +y
    0, 4, 7,  0, 7, 3, // -x
    1, 2, 6,  1, 6, 5, // +x
  ];

  MeshData::new(vertices, triangles).expect("box fixture is a valid mesh")
}

/// Closed unit cube `[0, 1]³`.
pub fn unit_cube() -> MeshData {
  box_mesh(DVec3::ZERO, DVec3::ONE)
}

/// A single triangle `(a, b, c)`.
pub fn single_triangle(a: DVec3, b: DVec3, c: DVec3) -> MeshData {
  let vertices = [a, b, c].iter().flat_map(|v| v.to_array()).collect();
  MeshData::new(vertices, vec![0, 1, 2]).expect("triangle fixture is a valid mesh")
}
