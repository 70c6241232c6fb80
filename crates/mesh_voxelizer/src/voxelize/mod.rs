//! Voxelization driver - classify every chunk of the grid.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │ Voxelization                                                            │
//! │                                                                         │
//! │  MeshData + MeshOctree + VoxelizeConfig                                 │
//! │           │  validate, ChunkGrid::new                                   │
//! │           ▼                                                             │
//! │  for each ChunkCoord (sync loop, or one pool task per chunk)            │
//! │  ┌─────────────────────────────────────────────────────────┐            │
//! │  │ process_chunk(octree, sampler, voxel_size, chunk_aabb)  │            │
//! │  │   surface hits chunk?                                   │            │
//! │  │     yes → per cell: Intersects | Inside | Empty         │            │
//! │  │     no  → whole chunk Inside or Empty                   │            │
//! │  └─────────────────────────────────────────────────────────┘            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  VoxelContainer { coord → VoxelChunk }  (every coord, even Empty)       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both entry points share `process_chunk`, so their classifications are
//! identical per coordinate.

pub mod worker;

pub use worker::{ProcessedChunk, VoxelizeInit, VoxelizeRequest, VoxelizeWorker};

use glam::DVec3;
use web_time::Instant;

use crate::constants::{index_to_cell, CHUNK_VOLUME};
use crate::coverage::CoverageSampler;
use crate::error::Result;
use crate::geometry::Aabb;
use crate::octree::MeshOctree;
use crate::types::{MeshData, VoxelizeConfig};
use crate::voxel::grid::voxel_aabb;
use crate::voxel::{ChunkGrid, VoxelChunk, VoxelContainer, VoxelState};
use crate::worker::{run_chunk_batch, PoolConfig, WorkerPool};

/// Classify the 16³ cells of the chunk covering `chunk_aabb`.
///
/// A chunk the surface does not touch is classified with a single coverage
/// query on its whole box.
pub fn process_chunk(
  octree: &MeshOctree,
  sampler: &CoverageSampler,
  voxel_size: DVec3,
  chunk_aabb: &Aabb,
) -> VoxelChunk {
  let mut chunk = VoxelChunk::new();

  if !octree.intersects_aabb(chunk_aabb) {
    if sampler.is_inside(octree, chunk_aabb) {
      chunk.set_all_voxels(VoxelState::Inside);
    }
    return chunk;
  }

  for idx in 0..CHUNK_VOLUME {
    let (i, j, k) = index_to_cell(idx);
    let voxel = voxel_aabb(chunk_aabb.min, voxel_size, i, j, k);
    if octree.intersects_aabb(&voxel) {
      chunk.add_voxel(i, j, k, VoxelState::Intersects);
    } else if sampler.is_inside(octree, &voxel) {
      chunk.add_voxel(i, j, k, VoxelState::Inside);
    }
  }
  chunk
}

/// Voxelize `mesh` on the calling thread.
#[tracing::instrument(skip_all, name = "voxelize::voxelize_mesh_sync")]
pub fn voxelize_mesh_sync(
  mesh: &MeshData,
  octree: &MeshOctree,
  config: &VoxelizeConfig,
) -> Result<VoxelContainer> {
  let grid = prepare(mesh, config)?;
  let start = Instant::now();

  let sampler = CoverageSampler::new();
  let mut container = VoxelContainer::new(grid.dimensions);
  for coord in grid.coords() {
    let chunk = process_chunk(octree, &sampler, grid.voxel_size, &grid.chunk_aabb(coord));
    container.insert(coord, chunk);
  }

  log_summary(&container, start, "sync");
  Ok(container)
}

/// Voxelize `mesh` with one pool task per chunk.
///
/// The pool holds `min(available_parallelism, config.max_workers)` threads and
/// is torn down before returning, on success and on error.
#[tracing::instrument(skip_all, name = "voxelize::voxelize_mesh")]
pub fn voxelize_mesh(
  mesh: &MeshData,
  octree: &MeshOctree,
  config: &VoxelizeConfig,
) -> Result<VoxelContainer> {
  let grid = prepare(mesh, config)?;
  let start = Instant::now();

  let pool = WorkerPool::<VoxelizeWorker>::new(
    PoolConfig::with_max_workers(config.max_workers).with_thread_name("voxelize"),
    VoxelizeInit {
      octree: octree.to_buffer(),
      voxel_size: grid.voxel_size,
    },
  );

  let requests = grid.coords().map(|coord| {
    let chunk_aabb = grid.chunk_aabb(coord);
    (coord, VoxelizeRequest::ProcessChunk { coord, chunk_aabb })
  });

  let mut container = VoxelContainer::new(grid.dimensions);
  {
    let _span = tracing::info_span!("join_chunks", chunks = grid.chunk_count()).entered();
    run_chunk_batch(&pool, requests, config.join_timeout, |_, processed| {
      container.insert(processed.coord, processed.chunk);
    })?;
  }
  pool.destroy();

  log_summary(&container, start, "parallel");
  Ok(container)
}

/// Validate inputs and lay out the chunk grid; nothing is scheduled before this.
fn prepare(mesh: &MeshData, config: &VoxelizeConfig) -> Result<ChunkGrid> {
  config.validate()?;
  mesh.validate()?;
  let grid = ChunkGrid::new(&mesh.aabb, config.voxel_size)?;
  tracing::debug!(
    dimensions = ?grid.dimensions,
    chunks = grid.chunk_count(),
    "chunk grid"
  );
  Ok(grid)
}

fn log_summary(container: &VoxelContainer, start: Instant, mode: &str) {
  tracing::info!(
    mode,
    chunks = container.len(),
    intersects = container.count(VoxelState::Intersects),
    inside = container.count(VoxelState::Inside),
    elapsed_ms = start.elapsed().as_millis() as u64,
    "voxelization finished"
  );
}
