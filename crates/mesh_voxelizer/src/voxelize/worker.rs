//! Worker protocol for parallel voxelization.

use glam::DVec3;

use super::process_chunk;
use crate::coverage::CoverageSampler;
use crate::error::TaskError;
use crate::geometry::Aabb;
use crate::octree::{MeshOctree, OctreeBuffer};
use crate::voxel::{ChunkCoord, VoxelChunk};
use crate::worker::Worker;

/// Sent once to every worker.
#[derive(Clone, Debug)]
pub struct VoxelizeInit {
  /// Shared, read-only octree bytes; each worker decodes its own copy.
  pub octree: OctreeBuffer,
  pub voxel_size: DVec3,
}

#[derive(Clone, Debug)]
pub enum VoxelizeRequest {
  ProcessChunk { coord: ChunkCoord, chunk_aabb: Aabb },
}

/// Classified cells of one chunk; the cell buffer moves back to the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessedChunk {
  pub coord: ChunkCoord,
  pub chunk: VoxelChunk,
}

pub struct VoxelizeWorker {
  octree: MeshOctree,
  sampler: CoverageSampler,
  voxel_size: DVec3,
}

impl Worker for VoxelizeWorker {
  type Init = VoxelizeInit;
  type Request = VoxelizeRequest;
  type Response = ProcessedChunk;

  fn init(init: VoxelizeInit) -> Result<Self, TaskError> {
    let octree =
      MeshOctree::from_buffer(&init.octree).map_err(|err| TaskError::Init(err.to_string()))?;
    Ok(Self {
      octree,
      sampler: CoverageSampler::new(),
      voxel_size: init.voxel_size,
    })
  }

  fn task_name(request: &VoxelizeRequest) -> &'static str {
    match request {
      VoxelizeRequest::ProcessChunk { .. } => "process_chunk",
    }
  }

  fn handle(&mut self, request: VoxelizeRequest) -> Result<ProcessedChunk, TaskError> {
    match request {
      VoxelizeRequest::ProcessChunk { coord, chunk_aabb } => Ok(ProcessedChunk {
        coord,
        chunk: process_chunk(&self.octree, &self.sampler, self.voxel_size, &chunk_aabb),
      }),
    }
  }
}
