//! Layout constants for 16³ voxel chunks, the mesh octree and the coverage
//! sampler.
//!
//! # Chunk Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          VOXEL CHUNK LAYOUT                             │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Cell index:    0     1     2    ...    13    14    15                  │
//! │                 │                                   │                   │
//! │                 └──────── 16 cells per axis ────────┘                   │
//! │                                                                         │
//! │  chunk_size = CHUNK_SIZE * voxel_size   (per axis)                      │
//! │  chunk_min  = mesh_min + coord * chunk_size                             │
//! │  voxel_min  = chunk_min + (i, j, k) * voxel_size                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Memory Layout
//!
//! ```text
//! Cell memory layout (row-major, i innermost):
//!
//! Address:  0      1     ...   15     16    ...  255    256  ...
//! Content: [0,0,0][1,0,0]...[15,0,0][0,1,0]...[15,15,0][0,0,1]...
//!          └──────── i ────────┘└──────── i ────────┘
//! ```
//!
//! # 3D Indexing
//!
//! ```text
//! index = k << 8 | j << 4 | i
//!       = k * 256 + j * 16 + i
//! ```

/// Number of voxel cells per chunk axis.
pub const CHUNK_SIZE: usize = 16;

/// Cells in one chunk slice (16² = 256).
pub const CHUNK_SIZE_SQ: usize = CHUNK_SIZE * CHUNK_SIZE;

/// Total cells in a chunk (16³ = 4096).
pub const CHUNK_VOLUME: usize = CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE;

/// Largest valid cell index on one axis (15).
pub const MAX_CELL_INDEX: usize = CHUNK_SIZE - 1;

/// Bit shift for the j coordinate (log2(16) = 4).
pub const J_SHIFT: u32 = 4;

/// Bit shift for the k coordinate (log2(256) = 8).
pub const K_SHIFT: u32 = 8;

/// Mask for extracting a single axis from a cell index (0xF = 15).
pub const INDEX_MASK: usize = 0xF;

/// Deepest octree level. The root sits at depth 0, leaves at this depth.
pub const OCTREE_MAX_DEPTH: u32 = 8;

/// Number of ray directions the coverage sampler casts per query.
pub const COVERAGE_SAMPLE_COUNT: usize = 64;

/// Fraction of rays that must hit the surface for a box to count as inside.
pub const COVERAGE_THRESHOLD: f64 = 0.9;

/// Worker cap used when the caller does not configure one.
pub const DEFAULT_MAX_WORKERS: usize = 8;

/// Initial capacity (in floats) of a freshly created vertex buffer.
pub const VERTEX_BUFFER_INITIAL_CAPACITY: usize = 65_536;

/// Length (in floats) after which meshing starts a new vertex buffer.
pub const DEFAULT_MAX_BUFFER_LEN: usize = 9_000_000;

/// Floats emitted per culled-in face: two triangles of three xyz vertices.
pub const FLOATS_PER_FACE: usize = 18;

/// Convert chunk-local cell coordinates to a linear index using bit shifts.
///
/// Layout: k is the major axis (stride 256), j is middle (stride 16), i is
/// minor (stride 1).
///
/// # Panics
/// Debug-asserts that every coordinate is below [`CHUNK_SIZE`]; out-of-range
/// coordinates would otherwise alias another cell.
#[inline(always)]
pub const fn cell_to_index(i: usize, j: usize, k: usize) -> usize {
  debug_assert!(
    i < CHUNK_SIZE && j < CHUNK_SIZE && k < CHUNK_SIZE,
    "cell coordinates must be < CHUNK_SIZE"
  );
  (k << K_SHIFT) | (j << J_SHIFT) | i
}

/// Convert a linear cell index back to chunk-local coordinates.
#[inline(always)]
pub const fn index_to_cell(idx: usize) -> (usize, usize, usize) {
  let i = idx & INDEX_MASK;
  let j = (idx >> J_SHIFT) & INDEX_MASK;
  let k = idx >> K_SHIFT;
  (i, j, k)
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
