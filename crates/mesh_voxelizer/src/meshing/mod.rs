//! Mesh generation - rebuild a renderable surface from classified voxels.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │ Meshing                                                                 │
//! │                                                                         │
//! │  VoxelContainer + voxel_size + mesh Aabb                                │
//! │           │  sorted coords, empty chunks skipped                        │
//! │           ▼                                                             │
//! │  MeshRequest::GenerateMeshForChunk { cells, neighbors[6], ... }         │
//! │           │  (sync loop, or one pool task per chunk)                    │
//! │           ▼                                                             │
//! │  generate_chunk_mesh → ChunkMesh { coord, vertices }                    │
//! │           │  appended in coord order                                    │
//! │           ▼                                                             │
//! │  Vec<VertexBuffer>  (new buffer once max_buffer_len is reached)         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Output does not depend on worker count or completion order, so meshing the
//! same container twice gives identical buffers.

pub mod chunk;
pub mod worker;

pub use chunk::{generate_chunk_mesh, ChunkMesh, MeshRequest, NeighborCells};
pub use worker::MeshWorker;

use std::collections::BTreeMap;

use glam::DVec3;
use web_time::Instant;

use crate::buffer::VertexBuffer;
use crate::error::{Result, VoxelizeError};
use crate::geometry::Aabb;
use crate::types::MeshingConfig;
use crate::voxel::{ChunkCoord, ChunkGrid, VoxelContainer};
use crate::worker::{run_chunk_batch, PoolConfig, WorkerPool};

/// Mesh every non-empty chunk on the calling thread.
#[tracing::instrument(skip_all, name = "meshing::generate_mesh_from_voxels_sync")]
pub fn generate_mesh_from_voxels_sync(
  container: &VoxelContainer,
  voxel_size: DVec3,
  aabb: &Aabb,
  config: &MeshingConfig,
) -> Result<Vec<VertexBuffer>> {
  let grid = prepare(voxel_size, aabb)?;
  let start = Instant::now();

  let meshes = mesh_requests(container, &grid)
    .into_iter()
    .map(|(_, request)| generate_chunk_mesh(&request).vertices);
  let buffers = assemble(meshes, config.max_buffer_len);

  log_summary(&buffers, start, "sync");
  Ok(buffers)
}

/// Mesh every non-empty chunk with one pool task per chunk.
#[tracing::instrument(skip_all, name = "meshing::generate_mesh_from_voxels")]
pub fn generate_mesh_from_voxels(
  container: &VoxelContainer,
  voxel_size: DVec3,
  aabb: &Aabb,
  config: &MeshingConfig,
) -> Result<Vec<VertexBuffer>> {
  let grid = prepare(voxel_size, aabb)?;
  let start = Instant::now();

  let requests = mesh_requests(container, &grid);
  let chunk_count = requests.len();

  let pool = WorkerPool::<MeshWorker>::new(
    PoolConfig::with_max_workers(config.max_workers).with_thread_name("meshing"),
    (),
  );

  // Completion order varies; the map restores coordinate order.
  let mut meshes = BTreeMap::new();
  {
    let _span = tracing::info_span!("join_chunks", chunks = chunk_count).entered();
    run_chunk_batch(&pool, requests, config.join_timeout, |coord, mesh| {
      meshes.insert(coord, mesh.vertices);
    })?;
  }
  pool.destroy();

  let buffers = assemble(meshes.into_values(), config.max_buffer_len);
  log_summary(&buffers, start, "parallel");
  Ok(buffers)
}

fn prepare(voxel_size: DVec3, aabb: &Aabb) -> Result<ChunkGrid> {
  if !aabb.is_valid() {
    return Err(VoxelizeError::InvalidBounds {
      min: aabb.min.to_array(),
      max: aabb.max.to_array(),
    });
  }
  ChunkGrid::new(aabb, voxel_size)
}

/// One request per non-empty chunk, in ascending coordinate order.
fn mesh_requests(
  container: &VoxelContainer,
  grid: &ChunkGrid,
) -> Vec<(ChunkCoord, MeshRequest)> {
  let mut requests = Vec::new();
  for coord in container.coords() {
    let Some(cells) = container
      .get(&coord)
      .filter(|chunk| !chunk.is_empty())
      .and_then(|chunk| chunk.cells())
    else {
      continue;
    };

    let neighbors = coord
      .face_neighbors()
      .map(|n| container.get(&n).and_then(|chunk| chunk.cells()).cloned());

    requests.push((
      coord,
      MeshRequest::GenerateMeshForChunk {
        coord,
        voxel_size: grid.voxel_size,
        cells: cells.clone(),
        chunk_aabb: grid.chunk_aabb(coord),
        neighbors,
      },
    ));
  }
  requests
}

/// Concatenate chunk meshes, starting a new buffer once the current one holds
/// at least `max_buffer_len` floats. Always yields at least one buffer.
fn assemble(
  meshes: impl IntoIterator<Item = Vec<f64>>,
  max_buffer_len: usize,
) -> Vec<VertexBuffer> {
  let mut buffers = Vec::new();
  let mut current = VertexBuffer::new();

  for vertices in meshes {
    if vertices.is_empty() {
      continue;
    }
    if !current.is_empty() && current.len() >= max_buffer_len {
      buffers.push(std::mem::take(&mut current));
    }
    current.append(&vertices);
  }

  buffers.push(current);
  buffers
}

fn log_summary(buffers: &[VertexBuffer], start: Instant, mode: &str) {
  tracing::info!(
    mode,
    buffers = buffers.len(),
    vertices = buffers.iter().map(VertexBuffer::vertex_count).sum::<usize>(),
    elapsed_ms = start.elapsed().as_millis() as u64,
    "meshing finished"
  );
}
