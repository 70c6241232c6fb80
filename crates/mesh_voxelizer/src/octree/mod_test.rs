use glam::DVec3;

use super::*;
use crate::error::VoxelizeError;
use crate::test_utils::{box_mesh, single_triangle, unit_cube};

fn cube_cell(min: DVec3, size: f64) -> Aabb {
  Aabb::from_min_size(min, DVec3::splat(size))
}

// =========================================================================
// Batch 1: Construction
// =========================================================================

/// The root cell is a cube around the mesh centre with the largest extent.
#[test]
fn test_root_is_cube_around_mesh() {
  let mesh = box_mesh(DVec3::ZERO, DVec3::new(4.0, 2.0, 1.0));
  let octree = MeshOctree::from_mesh_with_depth(&mesh, 2).unwrap();

  let root = octree.root_cell();
  assert_eq!(root.min, DVec3::new(0.0, -1.0, -1.5));
  assert_eq!(root.size(), DVec3::splat(4.0));
  assert_eq!(root.center(), mesh.aabb.center());
}

#[test]
fn test_mesh_without_triangles_has_childless_root() {
  let mesh = MeshData::new(vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0], vec![]).unwrap();
  let octree = MeshOctree::from_mesh(&mesh).unwrap();

  assert_eq!(octree.node_count(), 1);
  assert!(octree.nodes()[0].is_leaf());
  assert_eq!(octree.leaf_count(), 0);
  assert!(!octree.intersects_aabb(&mesh.aabb));
  assert!(!octree.intersects_ray(&Ray::new(DVec3::splat(0.5), DVec3::X)));
}

#[test]
fn test_degenerate_triangles_create_no_leaves() {
  let mesh = single_triangle(DVec3::ZERO, DVec3::new(0.5, 0.5, 0.5), DVec3::ONE);
  let octree = MeshOctree::from_mesh(&mesh).unwrap();

  assert_eq!(octree.node_count(), 1);
  assert!(!octree.intersects_aabb(&mesh.aabb));
}

#[test]
fn test_invalid_mesh_is_rejected() {
  let mesh = MeshData::with_aabb(
    vec![0.0; 9],
    vec![0, 1, 7],
    Aabb::new(DVec3::ZERO, DVec3::ONE),
  );
  assert!(matches!(
    MeshOctree::from_mesh(&mesh),
    Err(VoxelizeError::TriangleIndexOutOfRange { index: 7, .. })
  ));
}

/// Every childless node sits at max depth and owns triangles.
#[test]
fn test_leaves_live_at_max_depth() {
  let octree = MeshOctree::from_mesh_with_depth(&unit_cube(), 4).unwrap();
  let leaf_size = octree.root_cell().size().x / 16.0;

  assert!(octree.leaf_count() > 0);
  for (index, node) in octree.nodes().iter().enumerate() {
    if node.is_leaf() {
      assert_eq!(node.size, leaf_size, "node {} is a leaf above max depth", index);
      assert!(node.triangle_count > 0);
      assert!(octree.triangles(index as u32).iter().all(|&t| t < 12));
    } else {
      assert_eq!(node.triangle_count, 0, "interior node {} owns triangles", index);
    }
  }
}

/// Parallel construction must not change the arena layout.
#[test]
fn test_construction_is_deterministic() {
  let mesh = unit_cube();
  let a = MeshOctree::from_mesh_with_depth(&mesh, 5).unwrap();
  let b = MeshOctree::from_mesh_with_depth(&mesh, 5).unwrap();
  assert_eq!(a, b);
}

// =========================================================================
// Batch 2: Surface queries
// =========================================================================

/// One small triangle inside a single leaf: its cell matches, a sibling
/// leaf cell does not.
#[test]
fn test_single_triangle_leaf_and_empty_sibling() {
  // 256³ root with depth 8 gives unit leaf cells.
  let mesh = MeshData::with_aabb(
    vec![0.2, 0.2, 0.5, 0.8, 0.2, 0.5, 0.5, 0.8, 0.5],
    vec![0, 1, 2],
    Aabb::new(DVec3::ZERO, DVec3::splat(256.0)),
  );
  let octree = MeshOctree::from_mesh(&mesh).unwrap();

  assert_eq!(octree.leaf_count(), 1);
  // Root plus one node per level down to the leaf.
  assert_eq!(octree.node_count(), 9);
  assert_eq!(octree.triangles(8), &[0u32]);

  assert!(octree.intersects_aabb(&cube_cell(DVec3::ZERO, 1.0)));
  assert!(!octree.intersects_aabb(&cube_cell(DVec3::new(1.0, 0.0, 0.0), 1.0)));
  assert!(!octree.intersects_aabb(&cube_cell(DVec3::new(0.0, 0.0, 1.0), 1.0)));
}

#[test]
fn test_cube_surface_queries() {
  let octree = MeshOctree::from_mesh_with_depth(&unit_cube(), 5).unwrap();

  // Corner voxel touching three faces.
  assert!(octree.intersects_aabb(&cube_cell(DVec3::ZERO, 0.5)));
  // Box straddling the +x face.
  assert!(octree.intersects_aabb(&cube_cell(DVec3::new(0.9, 0.4, 0.4), 0.2)));
  // Strictly inside.
  assert!(!octree.intersects_aabb(&cube_cell(DVec3::splat(0.25), 0.5)));
  // Far outside.
  assert!(!octree.intersects_aabb(&cube_cell(DVec3::splat(2.0), 1.0)));
}

/// A box resting against the outside of a face only touches the surface.
#[test]
fn test_touching_outside_face_is_not_surface() {
  let octree = MeshOctree::from_mesh_with_depth(&unit_cube(), 5).unwrap();
  assert!(!octree.intersects_aabb(&Aabb::new(
    DVec3::new(1.0, 0.0, 0.0),
    DVec3::new(1.5, 0.5, 0.5),
  )));
}

#[test]
fn test_full_depth_cube_queries() {
  let octree = MeshOctree::from_mesh(&unit_cube()).unwrap();
  assert_eq!(octree.max_depth(), 8);
  assert!(octree.intersects_aabb(&cube_cell(DVec3::new(0.5, 0.5, 0.0), 0.5)));
  assert!(!octree.intersects_aabb(&cube_cell(DVec3::splat(0.4), 0.2)));
}

// =========================================================================
// Batch 3: Ray queries
// =========================================================================

#[test]
fn test_ray_from_inside_hits_surface() {
  let octree = MeshOctree::from_mesh_with_depth(&unit_cube(), 5).unwrap();
  let origin = DVec3::splat(0.5);

  for dir in [
    DVec3::X,
    DVec3::NEG_X,
    DVec3::Y,
    DVec3::NEG_Z,
    DVec3::new(1.0, 2.0, -3.0).normalize(),
  ] {
    assert!(octree.intersects_ray(&Ray::new(origin, dir)), "{:?}", dir);
  }
}

#[test]
fn test_ray_pointing_away_misses() {
  let octree = MeshOctree::from_mesh_with_depth(&unit_cube(), 5).unwrap();
  let origin = DVec3::new(3.0, 0.5, 0.5);

  assert!(!octree.intersects_ray(&Ray::new(origin, DVec3::X)));
  assert!(!octree.intersects_ray(&Ray::new(origin, DVec3::Y)));
  assert!(octree.intersects_ray(&Ray::new(origin, DVec3::NEG_X)));
}

// =========================================================================
// Batch 4: Buffer encoding
// =========================================================================

#[test]
fn test_buffer_roundtrip_preserves_tree() {
  let octree = MeshOctree::from_mesh_with_depth(&unit_cube(), 4).unwrap();
  let buffer = octree.to_buffer();
  let decoded = MeshOctree::from_buffer(&buffer).unwrap();

  assert_eq!(decoded, octree);
  let probe = cube_cell(DVec3::ZERO, 0.25);
  assert_eq!(decoded.intersects_aabb(&probe), octree.intersects_aabb(&probe));
}

#[test]
fn test_buffer_clones_share_bytes() {
  let buffer = MeshOctree::from_mesh_with_depth(&unit_cube(), 2)
    .unwrap()
    .to_buffer();
  let clone = buffer.clone();
  assert_eq!(buffer.as_bytes().as_ptr(), clone.as_bytes().as_ptr());
}

#[test]
fn test_truncated_buffer_is_rejected() {
  let bytes = MeshOctree::from_mesh_with_depth(&unit_cube(), 2)
    .unwrap()
    .to_buffer()
    .as_bytes()
    .to_vec();

  for len in [0, 10, bytes.len() - 1] {
    let result = MeshOctree::from_buffer(&OctreeBuffer::from(bytes[..len].to_vec()));
    assert!(
      matches!(result, Err(VoxelizeError::InvalidOctreeBuffer(_))),
      "length {} should be rejected",
      len
    );
  }
}

#[test]
fn test_bad_magic_is_rejected() {
  let mut bytes = MeshOctree::from_mesh_with_depth(&unit_cube(), 2)
    .unwrap()
    .to_buffer()
    .as_bytes()
    .to_vec();
  bytes[0] ^= 0xFF;

  assert!(matches!(
    MeshOctree::from_buffer(&OctreeBuffer::from(bytes)),
    Err(VoxelizeError::InvalidOctreeBuffer(_))
  ));
}

#[test]
fn test_bad_child_link_is_rejected() {
  let mut octree = MeshOctree::from_mesh_with_depth(&unit_cube(), 2).unwrap();
  // Point the root at itself.
  octree.nodes[0].children[0] = 0;

  assert!(matches!(
    MeshOctree::from_buffer(&octree.to_buffer()),
    Err(VoxelizeError::InvalidOctreeBuffer(_))
  ));
}
