//! Core data types: mesh input and job configuration.

use std::time::Duration;

use glam::DVec3;

use crate::constants::{DEFAULT_MAX_BUFFER_LEN, DEFAULT_MAX_WORKERS};
use crate::error::{Result, VoxelizeError};
use crate::geometry::Aabb;

/// Indexed triangle mesh handed over by the mesh loader.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshData {
  /// Flat `[x, y, z, x, y, z, ...]` positions.
  pub vertices: Vec<f64>,

  /// Vertex indices (3 indices per triangle).
  pub triangles: Vec<u32>,

  /// Bounds of all vertices.
  pub aabb: Aabb,
}

impl MeshData {
  /// Build a mesh and compute its bounds from the vertex buffer.
  pub fn new(vertices: Vec<f64>, triangles: Vec<u32>) -> Result<Self> {
    let aabb = Aabb::from_vertices(&vertices)?;
    let mesh = Self {
      vertices,
      triangles,
      aabb,
    };
    mesh.validate()?;
    Ok(mesh)
  }

  /// Build a mesh with bounds computed by the caller.
  ///
  /// Nothing is checked here; call [`MeshData::validate`] before use.
  pub fn with_aabb(vertices: Vec<f64>, triangles: Vec<u32>, aabb: Aabb) -> Self {
    Self {
      vertices,
      triangles,
      aabb,
    }
  }

  /// Check buffer lengths, index ranges and bounds.
  pub fn validate(&self) -> Result<()> {
    if self.vertices.len() % 3 != 0 {
      return Err(VoxelizeError::MismatchedVertexBuffer(self.vertices.len()));
    }
    if self.triangles.len() % 3 != 0 {
      return Err(VoxelizeError::MismatchedTriangleBuffer(
        self.triangles.len(),
      ));
    }

    let vertex_count = self.vertex_count();
    if let Some(&index) = self
      .triangles
      .iter()
      .find(|&&index| index as usize >= vertex_count)
    {
      return Err(VoxelizeError::TriangleIndexOutOfRange {
        index,
        vertex_count,
      });
    }

    if !self.aabb.is_valid() {
      return Err(VoxelizeError::InvalidBounds {
        min: self.aabb.min.to_array(),
        max: self.aabb.max.to_array(),
      });
    }

    Ok(())
  }

  pub fn vertex_count(&self) -> usize {
    self.vertices.len() / 3
  }

  pub fn triangle_count(&self) -> usize {
    self.triangles.len() / 3
  }

  #[inline]
  pub fn vertex(&self, index: u32) -> DVec3 {
    let base = index as usize * 3;
    DVec3::new(
      self.vertices[base],
      self.vertices[base + 1],
      self.vertices[base + 2],
    )
  }

  /// Corner positions of triangle `t`.
  ///
  /// Indices must be in range; see [`MeshData::validate`].
  #[inline]
  pub fn triangle(&self, t: usize) -> [DVec3; 3] {
    let base = t * 3;
    [
      self.vertex(self.triangles[base]),
      self.vertex(self.triangles[base + 1]),
      self.vertex(self.triangles[base + 2]),
    ]
  }
}

/// Configuration for a voxelization job.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelizeConfig {
  /// Edge length of one voxel per axis.
  pub voxel_size: DVec3,

  /// Upper bound on worker threads for the parallel path.
  pub max_workers: usize,

  /// Give up waiting for chunk results after this long (`None` waits forever).
  pub join_timeout: Option<Duration>,
}

impl Default for VoxelizeConfig {
  fn default() -> Self {
    Self {
      voxel_size: DVec3::ONE,
      max_workers: DEFAULT_MAX_WORKERS,
      join_timeout: None,
    }
  }
}

impl VoxelizeConfig {
  pub fn new(voxel_size: DVec3) -> Self {
    Self {
      voxel_size,
      ..Self::default()
    }
  }

  pub fn with_voxel_size(mut self, voxel_size: DVec3) -> Self {
    self.voxel_size = voxel_size;
    self
  }

  pub fn with_max_workers(mut self, max_workers: usize) -> Self {
    self.max_workers = max_workers;
    self
  }

  pub fn with_join_timeout(mut self, timeout: Duration) -> Self {
    self.join_timeout = Some(timeout);
    self
  }

  /// Voxel size must be finite and strictly positive on every axis.
  pub fn validate(&self) -> Result<()> {
    validate_voxel_size(self.voxel_size)
  }
}

/// Configuration for surface mesh generation.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshingConfig {
  /// Upper bound on worker threads for the parallel path.
  pub max_workers: usize,

  /// Start a new output buffer once the current one holds this many floats.
  pub max_buffer_len: usize,

  /// Give up waiting for chunk meshes after this long (`None` waits forever).
  pub join_timeout: Option<Duration>,
}

impl Default for MeshingConfig {
  fn default() -> Self {
    Self {
      max_workers: DEFAULT_MAX_WORKERS,
      max_buffer_len: DEFAULT_MAX_BUFFER_LEN,
      join_timeout: None,
    }
  }
}

impl MeshingConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_max_workers(mut self, max_workers: usize) -> Self {
    self.max_workers = max_workers;
    self
  }

  pub fn with_max_buffer_len(mut self, max_buffer_len: usize) -> Self {
    self.max_buffer_len = max_buffer_len;
    self
  }

  pub fn with_join_timeout(mut self, timeout: Duration) -> Self {
    self.join_timeout = Some(timeout);
    self
  }
}

pub(crate) fn validate_voxel_size(voxel_size: DVec3) -> Result<()> {
  if !voxel_size.is_finite() || voxel_size.min_element() <= 0.0 {
    return Err(VoxelizeError::InvalidVoxelSize(voxel_size.to_array()));
  }
  Ok(())
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
