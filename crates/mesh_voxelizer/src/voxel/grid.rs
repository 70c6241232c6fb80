//! ChunkGrid - layout of 16³ chunks over a mesh bounding box.

use glam::{DVec3, UVec3};

use super::ChunkCoord;
use crate::constants::CHUNK_SIZE;
use crate::error::Result;
use crate::geometry::Aabb;
use crate::types::validate_voxel_size;

/// Chunk layout shared by voxelization and meshing.
///
/// ```text
/// chunk_size = CHUNK_SIZE * voxel_size
/// dimensions = ceil(ceil(extent / voxel_size) / CHUNK_SIZE), at least 1
/// ```
///
/// Trailing partial chunks are part of the grid; their voxels past the mesh
/// extent simply classify as Empty.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChunkGrid {
  /// Minimum corner of chunk (0, 0, 0).
  pub origin: DVec3,
  pub voxel_size: DVec3,
  pub chunk_size: DVec3,
  /// Number of chunks per axis.
  pub dimensions: UVec3,
}

impl ChunkGrid {
  /// Lay chunks over `aabb` starting at its minimum corner.
  pub fn new(aabb: &Aabb, voxel_size: DVec3) -> Result<Self> {
    validate_voxel_size(voxel_size)?;

    let voxels = (aabb.size() / voxel_size).ceil();
    let chunks = (voxels / CHUNK_SIZE as f64).ceil().max(DVec3::ONE);

    Ok(Self {
      origin: aabb.min,
      voxel_size,
      chunk_size: voxel_size * CHUNK_SIZE as f64,
      dimensions: chunks.as_uvec3(),
    })
  }

  /// Total chunk count.
  pub fn chunk_count(&self) -> usize {
    self.dimensions.x as usize * self.dimensions.y as usize * self.dimensions.z as usize
  }

  /// Is `coord` inside the grid?
  pub fn contains(&self, coord: ChunkCoord) -> bool {
    coord.x >= 0
      && coord.y >= 0
      && coord.z >= 0
      && (coord.x as u32) < self.dimensions.x
      && (coord.y as u32) < self.dimensions.y
      && (coord.z as u32) < self.dimensions.z
  }

  /// World-space bounds of the chunk at `coord`.
  pub fn chunk_aabb(&self, coord: ChunkCoord) -> Aabb {
    let index = DVec3::new(coord.x as f64, coord.y as f64, coord.z as f64);
    Aabb::from_min_size(self.origin + index * self.chunk_size, self.chunk_size)
  }

  /// Every grid coordinate, x outermost, z innermost (sorted order).
  pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> {
    let dims = self.dimensions.as_ivec3();
    (0..dims.x).flat_map(move |x| {
      (0..dims.y).flat_map(move |y| (0..dims.z).map(move |z| ChunkCoord::new(x, y, z)))
    })
  }
}

/// Bounds of cell `(i, j, k)` in a chunk whose minimum corner is `chunk_min`.
#[inline]
pub fn voxel_aabb(chunk_min: DVec3, voxel_size: DVec3, i: usize, j: usize, k: usize) -> Aabb {
  let offset = DVec3::new(i as f64, j as f64, k as f64) * voxel_size;
  Aabb::from_min_size(chunk_min + offset, voxel_size)
}
