//! VoxelChunk - 16³ block of voxel states with lazily allocated storage.

use std::sync::Arc;

use super::VoxelState;
use crate::constants::{cell_to_index, CHUNK_VOLUME};

/// Flat cell array, indexed with [`cell_to_index`].
pub type ChunkCells = [VoxelState; CHUNK_VOLUME];

/// One chunk of classified voxels.
///
/// Storage is shared behind an `Arc`: handing a chunk to a meshing worker
/// clones the pointer, and a write after that copies the cells first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VoxelChunk {
  cells: Option<Arc<ChunkCells>>,
}

impl VoxelChunk {
  /// Chunk with no storage; every cell reads as Empty.
  pub fn new() -> Self {
    Self::default()
  }

  /// Wrap existing cell storage.
  pub fn from_cells(cells: Arc<ChunkCells>) -> Self {
    Self { cells: Some(cells) }
  }

  /// Set one cell, allocating storage on the first non-Empty write.
  pub fn add_voxel(&mut self, i: usize, j: usize, k: usize, state: VoxelState) {
    let idx = cell_to_index(i, j, k);
    match &mut self.cells {
      Some(cells) => Arc::make_mut(cells)[idx] = state,
      None if state.is_empty() => {}
      None => {
        let mut cells = Arc::new([VoxelState::Empty; CHUNK_VOLUME]);
        Arc::make_mut(&mut cells)[idx] = state;
        self.cells = Some(cells);
      }
    }
  }

  /// Fill every cell with `state`. Filling with Empty releases the storage.
  pub fn set_all_voxels(&mut self, state: VoxelState) {
    self.cells = match state {
      VoxelState::Empty => None,
      _ => Some(Arc::new([state; CHUNK_VOLUME])),
    };
  }

  /// True when storage was never allocated or every cell is Empty.
  pub fn is_empty(&self) -> bool {
    match &self.cells {
      None => true,
      Some(cells) => cells.iter().all(|s| s.is_empty()),
    }
  }

  /// True for any non-Empty state.
  #[inline]
  pub fn has_voxel(&self, i: usize, j: usize, k: usize) -> bool {
    !self.voxel(i, j, k).is_empty()
  }

  #[inline]
  pub fn voxel(&self, i: usize, j: usize, k: usize) -> VoxelState {
    match &self.cells {
      Some(cells) => cells[cell_to_index(i, j, k)],
      None => VoxelState::Empty,
    }
  }

  /// Number of cells holding `state`.
  pub fn count(&self, state: VoxelState) -> usize {
    match &self.cells {
      Some(cells) => cells.iter().filter(|&&s| s == state).count(),
      None if state.is_empty() => CHUNK_VOLUME,
      None => 0,
    }
  }

  /// True when every cell holds `state`.
  pub fn is_uniform(&self, state: VoxelState) -> bool {
    self.count(state) == CHUNK_VOLUME
  }

  pub fn is_allocated(&self) -> bool {
    self.cells.is_some()
  }

  /// Shared handle to the cell storage, if any.
  pub fn cells(&self) -> Option<&Arc<ChunkCells>> {
    self.cells.as_ref()
  }

  pub fn into_cells(self) -> Option<Arc<ChunkCells>> {
    self.cells
  }
}

#[cfg(test)]
#[path = "chunk_test.rs"]
mod chunk_test;
