//! Face-culled surface extraction for one chunk.
//!
//! Every non-Empty cell emits a quad (two triangles, 18 floats) for each of
//! its six faces whose neighbour is Empty. Neighbours past the chunk edge are
//! read from the adjacent chunk's opposite edge:
//!
//! ```text
//!   prev chunk (-i)        this chunk          next chunk (+i)
//!   ┌─────────┬──┐   ┌──┬────────────┬──┐   ┌──┬─────────┐
//!   │         │15│ ◄─┤0 │   ...      │15├─► │0 │         │
//!   └─────────┴──┘   └──┴────────────┴──┘   └──┴─────────┘
//! ```
//!
//! A missing neighbour chunk reads as all Empty.

use std::sync::Arc;

use glam::DVec3;

use crate::constants::{cell_to_index, index_to_cell, FLOATS_PER_FACE, MAX_CELL_INDEX};
use crate::geometry::Aabb;
use crate::voxel::{ChunkCells, ChunkCoord};

/// Neighbour slot order: -i, +i, -j, +j, -k, +k.
pub type NeighborCells = [Option<Arc<ChunkCells>>; 6];

/// Inputs for meshing one chunk. Cell buffers are shared, not copied.
#[derive(Clone, Debug)]
pub enum MeshRequest {
  GenerateMeshForChunk {
    coord: ChunkCoord,
    voxel_size: DVec3,
    cells: Arc<ChunkCells>,
    chunk_aabb: Aabb,
    neighbors: NeighborCells,
  },
}

/// Triangle positions emitted for one chunk.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkMesh {
  pub coord: ChunkCoord,
  pub vertices: Vec<f64>,
}

struct Face {
  axis: usize,
  /// -1 or +1 along `axis`.
  step: isize,
  /// Index into [`NeighborCells`].
  slot: usize,
  /// Quad corners as offsets of the cell's minimum corner, in voxels.
  corners: [[f64; 3]; 4],
}

/// Emission order: -i, -j, -k, +i, +j, +k.
#[rustfmt::skip]
const FACES: [Face; 6] = [
  Face { axis: 0, step: -1, slot: 0, corners: [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [0.0, 0.0, 1.0]] },
  Face { axis: 1, step: -1, slot: 2, corners: [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 0.0, 0.0]] },
  Face { axis: 2, step: -1, slot: 4, corners: [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]] },
  Face { axis: 0, step: 1,  slot: 1, corners: [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]] },
  Face { axis: 1, step: 1,  slot: 3, corners: [[0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0]] },
  Face { axis: 2, step: 1,  slot: 5, corners: [[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]] },
];

/// Quad corner order for the two triangles of a face.
const QUAD_TRIANGLES: [usize; 6] = [0, 1, 2, 2, 3, 0];

/// Emit the culled faces of one chunk in world space.
pub fn generate_chunk_mesh(request: &MeshRequest) -> ChunkMesh {
  let MeshRequest::GenerateMeshForChunk {
    coord,
    voxel_size,
    cells,
    chunk_aabb,
    neighbors,
  } = request;

  let mut vertices = Vec::new();
  for (idx, state) in cells.iter().enumerate() {
    if state.is_empty() {
      continue;
    }
    let cell = index_to_cell(idx);
    let offset = DVec3::new(cell.0 as f64, cell.1 as f64, cell.2 as f64);
    let origin = chunk_aabb.min + offset * *voxel_size;

    for face in &FACES {
      if neighbor_filled(cells, neighbors, cell, face) {
        continue;
      }
      vertices.reserve(FLOATS_PER_FACE);
      for &corner in &QUAD_TRIANGLES {
        let position = origin + DVec3::from_array(face.corners[corner]) * *voxel_size;
        vertices.extend_from_slice(&position.to_array());
      }
    }
  }

  ChunkMesh {
    coord: *coord,
    vertices,
  }
}

/// Is the cell across `face` from `cell` non-Empty?
fn neighbor_filled(
  cells: &ChunkCells,
  neighbors: &NeighborCells,
  cell: (usize, usize, usize),
  face: &Face,
) -> bool {
  let mut pos = [cell.0, cell.1, cell.2];
  let along = pos[face.axis];

  let source = match (face.step, along) {
    (-1, 0) => {
      pos[face.axis] = MAX_CELL_INDEX;
      neighbors[face.slot].as_deref()
    }
    (1, MAX_CELL_INDEX) => {
      pos[face.axis] = 0;
      neighbors[face.slot].as_deref()
    }
    _ => {
      pos[face.axis] = along.wrapping_add_signed(face.step);
      Some(cells)
    }
  };

  source.is_some_and(|cells| !cells[cell_to_index(pos[0], pos[1], pos[2])].is_empty())
}

#[cfg(test)]
#[path = "chunk_test.rs"]
mod chunk_test;
