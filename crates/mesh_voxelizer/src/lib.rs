//! mesh_voxelizer - Octree-accelerated triangle mesh voxelization
//!
//! Converts an indexed triangle mesh into a sparse grid of 16³ voxel chunks,
//! then rebuilds a renderable surface from that grid with face culling.
//!
//! ```text
//!   MeshData ──► MeshOctree ──► voxelize_mesh ──► VoxelContainer
//!                (surface +      (per chunk:        │
//!                 ray queries)    Intersects /      ▼
//!                                 Inside / Empty)  generate_mesh_from_voxels
//!                                                   │
//!                                                   ▼
//!                                              Vec<VertexBuffer>
//! ```
//!
//! # Features
//!
//! - **Octree**: flat node arena over mesh triangles, built in parallel with
//!   rayon, serializable to one shared byte buffer
//! - **Coverage sampling**: Hammersley ray fan deciding whether a box lies
//!   inside a closed surface
//! - **Worker pool**: bounded OS-thread pool with typed messages and an error
//!   channel
//! - **Sync and parallel** entry points with identical results
//!
//! # Example
//!
//! ```ignore
//! use glam::DVec3;
//! use mesh_voxelizer::{
//!   generate_mesh_from_voxels, voxelize_mesh, MeshData, MeshOctree, MeshingConfig,
//!   VoxelizeConfig,
//! };
//!
//! let mesh = MeshData::new(vertices, triangles)?;
//! let octree = MeshOctree::from_mesh(&mesh)?;
//!
//! let config = VoxelizeConfig::new(DVec3::splat(0.1));
//! let voxels = voxelize_mesh(&mesh, &octree, &config)?;
//!
//! let buffers =
//!   generate_mesh_from_voxels(&voxels, config.voxel_size, &mesh.aabb, &MeshingConfig::default())?;
//! ```

pub mod buffer;
pub mod constants;
pub mod coverage;
pub mod error;
pub mod geometry;
pub mod octree;
pub mod types;

// Re-export commonly used items
pub use buffer::VertexBuffer;
pub use constants::{cell_to_index, index_to_cell, CHUNK_SIZE, CHUNK_VOLUME};
pub use coverage::CoverageSampler;
pub use error::{Result, TaskError, VoxelizeError};
pub use geometry::{triangle_intersects_aabb, Aabb, Ray};
pub use octree::{MeshOctree, OctreeBuffer};
pub use types::{MeshData, MeshingConfig, VoxelizeConfig};

// Sparse chunked voxel storage
pub mod voxel;
pub use voxel::{ChunkCoord, ChunkGrid, VoxelChunk, VoxelContainer, VoxelState};

// Bounded worker pool over OS threads
pub mod worker;
pub use worker::{PoolConfig, TaskHandle, Worker, WorkerPool};

// Mesh → voxels
pub mod voxelize;
pub use voxelize::{process_chunk, voxelize_mesh, voxelize_mesh_sync};

// Voxels → surface mesh
pub mod meshing;
pub use meshing::{
  generate_chunk_mesh, generate_mesh_from_voxels, generate_mesh_from_voxels_sync, ChunkMesh,
  MeshRequest,
};

#[cfg(test)]
mod test_utils;
