use std::sync::Arc;

use super::*;
use crate::constants::MAX_CELL_INDEX;

// =========================================================================
// Batch 1: Lazy storage
// =========================================================================

#[test]
fn test_new_chunk_has_no_storage() {
  let chunk = VoxelChunk::new();
  assert!(!chunk.is_allocated());
  assert!(chunk.is_empty());
  assert_eq!(chunk.voxel(3, 4, 5), VoxelState::Empty);
  assert_eq!(chunk.count(VoxelState::Empty), CHUNK_VOLUME);
}

#[test]
fn test_empty_write_does_not_allocate() {
  let mut chunk = VoxelChunk::new();
  chunk.add_voxel(0, 0, 0, VoxelState::Empty);
  assert!(!chunk.is_allocated());
}

#[test]
fn test_first_write_allocates() {
  let mut chunk = VoxelChunk::new();
  chunk.add_voxel(1, 2, 3, VoxelState::Intersects);

  assert!(chunk.is_allocated());
  assert!(!chunk.is_empty());
  assert!(chunk.has_voxel(1, 2, 3));
  assert_eq!(chunk.voxel(1, 2, 3), VoxelState::Intersects);
  assert!(!chunk.has_voxel(3, 2, 1));
  assert_eq!(chunk.count(VoxelState::Intersects), 1);
}

/// Allocated storage whose cells were all reset still reports empty.
#[test]
fn test_cleared_cells_report_empty() {
  let mut chunk = VoxelChunk::new();
  chunk.add_voxel(7, 7, 7, VoxelState::Inside);
  chunk.add_voxel(7, 7, 7, VoxelState::Empty);

  assert!(chunk.is_allocated());
  assert!(chunk.is_empty());
}

// =========================================================================
// Batch 2: Whole-chunk fills
// =========================================================================

#[test]
fn test_set_all_voxels_inside() {
  let mut chunk = VoxelChunk::new();
  chunk.set_all_voxels(VoxelState::Inside);

  assert!(chunk.is_uniform(VoxelState::Inside));
  assert!(chunk.has_voxel(0, 0, 0));
  assert!(chunk.has_voxel(MAX_CELL_INDEX, MAX_CELL_INDEX, MAX_CELL_INDEX));
}

#[test]
fn test_set_all_voxels_empty_releases_storage() {
  let mut chunk = VoxelChunk::new();
  chunk.add_voxel(0, 0, 0, VoxelState::Intersects);
  chunk.set_all_voxels(VoxelState::Empty);

  assert!(!chunk.is_allocated());
  assert!(chunk.is_empty());
}

// =========================================================================
// Batch 3: Shared storage
// =========================================================================

/// Writing to a chunk whose cells are shared must not affect the other owner.
#[test]
fn test_write_after_share_copies_cells() {
  let mut chunk = VoxelChunk::new();
  chunk.add_voxel(0, 0, 0, VoxelState::Inside);
  let shared = Arc::clone(chunk.cells().unwrap());

  chunk.add_voxel(1, 0, 0, VoxelState::Inside);

  assert_eq!(shared[cell_to_index(1, 0, 0)], VoxelState::Empty);
  assert_eq!(chunk.voxel(1, 0, 0), VoxelState::Inside);
}

#[test]
fn test_from_cells_roundtrip() {
  let mut cells = [VoxelState::Empty; CHUNK_VOLUME];
  cells[cell_to_index(15, 0, 9)] = VoxelState::Intersects;
  let chunk = VoxelChunk::from_cells(Arc::new(cells));

  assert_eq!(chunk.voxel(15, 0, 9), VoxelState::Intersects);
  let back = chunk.into_cells().unwrap();
  assert_eq!(back[cell_to_index(15, 0, 9)], VoxelState::Intersects);
}
