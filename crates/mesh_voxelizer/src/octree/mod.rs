//! Mesh octree - spatial index over the triangles of one mesh.
//!
//! Nodes live in a flat arena ([`NodeRecord`]) with the root at index 0 and
//! children linked by index. Each level halves the cell edge:
//!
//! ```text
//! Cell Size = root_size / 2^depth        depth 0 = root, OCTREE_MAX_DEPTH = leaves
//! ```
//!
//! Octants whose cell no triangle touches are never created, so every
//! childless node below the root is a leaf that owns at least one triangle.
//! The tree is immutable once built and is shared with worker threads as a
//! single [`OctreeBuffer`].
//!
//! # Module Structure
//!
//! - [`node`]: `NodeRecord` - plain-old-data arena entry and octant math
//! - `build`: top-down construction, root octants in parallel
//! - [`buffer`]: `OctreeBuffer` - flat byte encoding for workers

pub mod buffer;
mod build;
pub mod node;

pub use buffer::OctreeBuffer;
pub use node::{NodeRecord, NONE};

use crate::constants::OCTREE_MAX_DEPTH;
use crate::error::Result;
use crate::geometry::{Aabb, Ray};
use crate::types::MeshData;

/// Octree over mesh triangles answering surface overlap and ray queries.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshOctree {
  nodes: Vec<NodeRecord>,
  triangle_ids: Vec<u32>,
  max_depth: u32,
}

impl MeshOctree {
  /// Build the octree for `mesh` down to [`OCTREE_MAX_DEPTH`].
  pub fn from_mesh(mesh: &MeshData) -> Result<Self> {
    Self::from_mesh_with_depth(mesh, OCTREE_MAX_DEPTH)
  }

  /// Build the octree for `mesh` with leaves at `max_depth`.
  #[tracing::instrument(skip_all, name = "octree::from_mesh")]
  pub fn from_mesh_with_depth(mesh: &MeshData, max_depth: u32) -> Result<Self> {
    mesh.validate()?;

    let root = mesh.aabb.to_cube();
    let arena = build::build(mesh, root.min, root.size().x, max_depth);

    tracing::debug!(
      triangles = mesh.triangle_count(),
      nodes = arena.nodes.len(),
      triangle_ids = arena.triangle_ids.len(),
      max_depth,
      "octree built"
    );

    Ok(Self {
      nodes: arena.nodes,
      triangle_ids: arena.triangle_ids,
      max_depth,
    })
  }

  /// Decode an octree previously written with [`MeshOctree::to_buffer`].
  pub fn from_buffer(buffer: &OctreeBuffer) -> Result<Self> {
    buffer::decode(buffer)
  }

  /// Encode the arena into one shareable byte buffer.
  pub fn to_buffer(&self) -> OctreeBuffer {
    buffer::encode(self)
  }

  /// Does the mesh surface pass through `aabb`?
  ///
  /// Cells only sharing a face, edge or corner with `aabb` are skipped, so a
  /// voxel whose neighbour contains the surface is not reported.
  pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
    self.any_leaf(0, &|cell| cell.overlaps_interior(aabb))
  }

  /// Does `ray` reach a cell holding part of the surface?
  pub fn intersects_ray(&self, ray: &Ray) -> bool {
    self.any_leaf(0, &|cell| ray.intersects_aabb(cell))
  }

  /// Depth-first descent, pruning cells rejected by `visit`.
  fn any_leaf(&self, index: u32, visit: &impl Fn(&Aabb) -> bool) -> bool {
    let node = &self.nodes[index as usize];
    if !visit(&node.cell()) {
      return false;
    }
    if node.is_leaf() {
      return node.triangle_count > 0;
    }
    node.child_indices().any(|child| self.any_leaf(child, visit))
  }

  /// Cube covering the whole mesh.
  pub fn root_cell(&self) -> Aabb {
    self.nodes[0].cell()
  }

  pub fn nodes(&self) -> &[NodeRecord] {
    &self.nodes
  }

  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  pub fn max_depth(&self) -> u32 {
    self.max_depth
  }

  /// Triangle ids owned by the node at `index` (empty for interior nodes).
  pub fn triangles(&self, index: u32) -> &[u32] {
    let node = &self.nodes[index as usize];
    let start = node.triangle_start as usize;
    &self.triangle_ids[start..start + node.triangle_count as usize]
  }

  /// Number of leaves holding at least one triangle.
  pub fn leaf_count(&self) -> usize {
    self
      .nodes
      .iter()
      .filter(|n| n.is_leaf() && n.triangle_count > 0)
      .count()
  }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
