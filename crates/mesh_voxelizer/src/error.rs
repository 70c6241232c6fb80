//! Error types for voxelization, meshing and the worker pool.
//!
//! Configuration problems are reported before any chunk work is scheduled.
//! Geometric degeneracies (zero-area triangles, flat boxes) are not errors:
//! the intersection tests are total and simply answer "no overlap".

use std::io;

use crate::voxel::ChunkCoord;

/// Failure of a single task inside the worker pool.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
  /// The worker could not build its context from the init message.
  #[error("worker initialization failed: {0}")]
  Init(String),

  /// The task handler returned an error.
  #[error("task failed: {0}")]
  Failed(String),

  /// The task handler panicked.
  #[error("task panicked: {0}")]
  Panicked(String),

  /// The pool was destroyed before the task produced a result.
  #[error("task abandoned by worker pool")]
  Abandoned,
}

/// Top-level error for voxelization and meshing jobs.
#[derive(Debug, thiserror::Error)]
pub enum VoxelizeError {
  #[error("voxel size must be finite and > 0 on every axis, got {0:?}")]
  InvalidVoxelSize([f64; 3]),

  #[error("vertex buffer length {0} is not a multiple of 3")]
  MismatchedVertexBuffer(usize),

  #[error("triangle index buffer length {0} is not a multiple of 3")]
  MismatchedTriangleBuffer(usize),

  #[error("triangle index {index} out of range for {vertex_count} vertices")]
  TriangleIndexOutOfRange { index: u32, vertex_count: usize },

  #[error("bounding box is not valid: min {min:?}, max {max:?}")]
  InvalidBounds { min: [f64; 3], max: [f64; 3] },

  #[error("at least one vertex is required to compute a bounding box")]
  NotEnoughVertices,

  #[error("octree buffer is malformed: {0}")]
  InvalidOctreeBuffer(String),

  /// Worker thread creation failed.
  #[error("could not create worker thread")]
  ResourceUnavailable(#[source] io::Error),

  #[error("worker pool has been destroyed")]
  PoolTerminated,

  #[error("task for chunk {coord:?} failed")]
  Task {
    coord: ChunkCoord,
    #[source]
    source: TaskError,
  },

  #[error("timed out waiting for {pending} of {total} tasks")]
  Timeout { pending: usize, total: usize },
}

pub type Result<T, E = VoxelizeError> = std::result::Result<T, E>;
