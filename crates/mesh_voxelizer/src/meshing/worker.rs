//! Worker protocol for parallel meshing.

use super::chunk::{generate_chunk_mesh, ChunkMesh, MeshRequest};
use crate::error::TaskError;
use crate::worker::Worker;

/// Stateless: every request carries its own cells and neighbours.
pub struct MeshWorker;

impl Worker for MeshWorker {
  type Init = ();
  type Request = MeshRequest;
  type Response = ChunkMesh;

  fn init(_: ()) -> Result<Self, TaskError> {
    Ok(Self)
  }

  fn task_name(request: &MeshRequest) -> &'static str {
    match request {
      MeshRequest::GenerateMeshForChunk { .. } => "generate_mesh_for_chunk",
    }
  }

  fn handle(&mut self, request: MeshRequest) -> Result<ChunkMesh, TaskError> {
    Ok(generate_chunk_mesh(&request))
  }
}
