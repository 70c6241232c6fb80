//! Sparse voxel storage.
//!
//! ```text
//! VoxelContainer ── HashMap<ChunkCoord, VoxelChunk>
//!                                        │
//!                                        └─ Option<Arc<[VoxelState; 4096]>>
//!                                           None until the first non-Empty write
//! ```
//!
//! # Module Structure
//!
//! - [`chunk`]: `VoxelChunk` - one 16³ block of classified cells
//! - [`container`]: `VoxelContainer` - chunks keyed by grid coordinate
//! - [`grid`]: `ChunkGrid` - chunk layout over a mesh bounding box

pub mod chunk;
pub mod container;
pub mod grid;

pub use chunk::{ChunkCells, VoxelChunk};
pub use container::VoxelContainer;
pub use grid::ChunkGrid;

/// Classification of one voxel cell relative to the mesh.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VoxelState {
  /// Outside the mesh.
  #[default]
  Empty = 0,
  /// The surface passes through the cell.
  Intersects = 1,
  /// Enclosed by the surface without touching it.
  Inside = 2,
}

impl VoxelState {
  #[inline]
  pub fn is_empty(self) -> bool {
    self == VoxelState::Empty
  }
}

/// Integer chunk position in the grid.
///
/// Compared and hashed by value, so any two equal coordinates address the
/// same chunk.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ChunkCoord {
  pub x: i32,
  pub y: i32,
  pub z: i32,
}

impl ChunkCoord {
  pub const fn new(x: i32, y: i32, z: i32) -> Self {
    Self { x, y, z }
  }

  /// Coordinate shifted by `(dx, dy, dz)`.
  #[inline]
  pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
    Self::new(self.x + dx, self.y + dy, self.z + dz)
  }

  /// Face neighbours in the order -i, +i, -j, +j, -k, +k.
  pub fn face_neighbors(self) -> [Self; 6] {
    [
      self.offset(-1, 0, 0),
      self.offset(1, 0, 0),
      self.offset(0, -1, 0),
      self.offset(0, 1, 0),
      self.offset(0, 0, -1),
      self.offset(0, 0, 1),
    ]
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;

  #[test]
  fn test_voxel_state_discriminants() {
    assert_eq!(VoxelState::Empty as u8, 0);
    assert_eq!(VoxelState::Intersects as u8, 1);
    assert_eq!(VoxelState::Inside as u8, 2);
    assert_eq!(VoxelState::default(), VoxelState::Empty);
  }

  /// Separately constructed coordinates must find the same map entry.
  #[test]
  fn test_chunk_coord_value_keys() {
    let mut map = HashMap::new();
    map.insert(ChunkCoord::new(1, 2, 3), "chunk");

    let probe = ChunkCoord::new(0, 2, 3).offset(1, 0, 0);
    assert_eq!(map.get(&probe), Some(&"chunk"));
    assert_eq!(map.get(&ChunkCoord::new(3, 2, 1)), None);
  }

  #[test]
  fn test_face_neighbors_order() {
    let n = ChunkCoord::new(5, 5, 5).face_neighbors();
    assert_eq!(n[0], ChunkCoord::new(4, 5, 5));
    assert_eq!(n[1], ChunkCoord::new(6, 5, 5));
    assert_eq!(n[2], ChunkCoord::new(5, 4, 5));
    assert_eq!(n[3], ChunkCoord::new(5, 6, 5));
    assert_eq!(n[4], ChunkCoord::new(5, 5, 4));
    assert_eq!(n[5], ChunkCoord::new(5, 5, 6));
  }

  #[test]
  fn test_chunk_coord_ordering_is_lexicographic() {
    let mut coords = vec![
      ChunkCoord::new(1, 0, 0),
      ChunkCoord::new(0, 1, 0),
      ChunkCoord::new(0, 0, 1),
      ChunkCoord::new(0, 0, 0),
    ];
    coords.sort();
    assert_eq!(
      coords,
      vec![
        ChunkCoord::new(0, 0, 0),
        ChunkCoord::new(0, 0, 1),
        ChunkCoord::new(0, 1, 0),
        ChunkCoord::new(1, 0, 0),
      ]
    );
  }
}
