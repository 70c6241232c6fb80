//! NodeRecord - one cubic cell of the mesh octree, stored in a flat arena.
//!
//! Records are plain-old-data so the whole arena can be written into a single
//! byte buffer and handed to worker threads without any pointer fix-ups.

use bytemuck::{Pod, Zeroable};
use glam::DVec3;

use crate::geometry::Aabb;

/// Sentinel for an absent child.
pub const NONE: u32 = u32::MAX;

/// Octree node - cube cell plus arena links.
///
/// Children are arena indices, [`NONE`] where the octant holds no triangles.
/// Only leaves reference triangle ids; interior nodes keep an empty range.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct NodeRecord {
  /// Minimum corner of the cell.
  pub min: [f64; 3],
  /// Edge length of the (cubic) cell.
  pub size: f64,
  /// Child arena index per octant.
  pub children: [u32; 8],
  /// First entry in the shared triangle-id array.
  pub triangle_start: u32,
  /// Number of triangle ids owned by this leaf.
  pub triangle_count: u32,
}

impl NodeRecord {
  /// New node with no children and no triangles.
  pub fn new(min: DVec3, size: f64) -> Self {
    Self {
      min: min.to_array(),
      size,
      children: [NONE; 8],
      triangle_start: 0,
      triangle_count: 0,
    }
  }

  /// World-space bounds of this cell.
  #[inline]
  pub fn cell(&self) -> Aabb {
    Aabb::from_min_size(DVec3::from_array(self.min), DVec3::splat(self.size))
  }

  /// Leaves have no children (pruned interior nodes never exist).
  #[inline]
  pub fn is_leaf(&self) -> bool {
    self.children.iter().all(|&c| c == NONE)
  }

  /// Children that exist, in octant order.
  pub fn child_indices(&self) -> impl Iterator<Item = u32> + '_ {
    self.children.iter().copied().filter(|&c| c != NONE)
  }

  /// Minimum corner of the child cell in `octant`.
  ///
  /// Octant: 0-7 where bits represent +X, +Y, +Z offsets:
  /// - bit 0: X offset (0 or 1)
  /// - bit 1: Y offset (0 or 1)
  /// - bit 2: Z offset (0 or 1)
  #[inline]
  pub fn child_min(&self, octant: u8) -> DVec3 {
    octant_min(DVec3::from_array(self.min), self.size, octant)
  }
}

/// Minimum corner of `octant` inside the cube at `min` with edge `size`.
#[inline]
pub fn octant_min(min: DVec3, size: f64, octant: u8) -> DVec3 {
  let half = size * 0.5;
  let offset = DVec3::new(
    (octant & 1) as f64,
    ((octant >> 1) & 1) as f64,
    ((octant >> 2) & 1) as f64,
  );
  min + offset * half
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
