//! VoxelContainer - sparse map from chunk coordinate to chunk.

use std::collections::HashMap;

use glam::UVec3;

use super::grid::voxel_aabb;
use super::{ChunkCoord, ChunkGrid, VoxelChunk, VoxelState};
use crate::constants::{index_to_cell, CHUNK_VOLUME};
use crate::geometry::Aabb;

/// Voxelization result: every chunk of the grid, keyed by coordinate.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VoxelContainer {
  chunks: HashMap<ChunkCoord, VoxelChunk>,
  dimensions: UVec3,
}

impl VoxelContainer {
  /// Empty container for a grid of `dimensions` chunks.
  pub fn new(dimensions: UVec3) -> Self {
    Self {
      chunks: HashMap::new(),
      dimensions,
    }
  }

  /// Chunk-grid dimensions this container was created for.
  pub fn dimensions(&self) -> UVec3 {
    self.dimensions
  }

  /// Store `chunk` at `coord`, returning the chunk it replaced.
  pub fn insert(&mut self, coord: ChunkCoord, chunk: VoxelChunk) -> Option<VoxelChunk> {
    self.chunks.insert(coord, chunk)
  }

  /// Chunk at `coord`; `None` reads as an all-Empty neighbour when meshing.
  pub fn get(&self, coord: &ChunkCoord) -> Option<&VoxelChunk> {
    self.chunks.get(coord)
  }

  pub fn has(&self, coord: &ChunkCoord) -> bool {
    self.chunks.contains_key(coord)
  }

  pub fn len(&self) -> usize {
    self.chunks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.chunks.is_empty()
  }

  /// Chunks in arbitrary order.
  pub fn iter(&self) -> impl Iterator<Item = (&ChunkCoord, &VoxelChunk)> {
    self.chunks.iter()
  }

  /// Stored coordinates in ascending order.
  pub fn coords(&self) -> Vec<ChunkCoord> {
    let mut coords: Vec<_> = self.chunks.keys().copied().collect();
    coords.sort_unstable();
    coords
  }

  /// Total number of voxels holding `state` across all chunks.
  pub fn count(&self, state: VoxelState) -> usize {
    self.chunks.values().map(|c| c.count(state)).sum()
  }

  /// Debug boxes for classified space, in coordinate order.
  ///
  /// A chunk that is Inside everywhere yields its own bounds; other chunks
  /// yield one box per non-Empty voxel.
  pub fn voxel_boxes(&self, grid: &ChunkGrid) -> Vec<Aabb> {
    let mut boxes = Vec::new();
    for coord in self.coords() {
      let Some(chunk) = self.chunks.get(&coord) else {
        continue;
      };
      if chunk.is_empty() {
        continue;
      }

      let chunk_aabb = grid.chunk_aabb(coord);
      if chunk.is_uniform(VoxelState::Inside) {
        boxes.push(chunk_aabb);
        continue;
      }

      for idx in 0..CHUNK_VOLUME {
        let (i, j, k) = index_to_cell(idx);
        if chunk.has_voxel(i, j, k) {
          boxes.push(voxel_aabb(chunk_aabb.min, grid.voxel_size, i, j, k));
        }
      }
    }
    boxes
  }
}
