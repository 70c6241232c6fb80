//! Flat byte encoding of a [`MeshOctree`] for hand-off to worker threads.
//!
//! ```text
//! ┌──────────────────────┬──────────────────────────┬────────────────────┐
//! │ BufferHeader (24 B)  │ NodeRecord × node_count  │ u32 × id_count     │
//! │ magic version counts │ 72 B each                │ leaf triangle ids  │
//! └──────────────────────┴──────────────────────────┴────────────────────┘
//! ```
//!
//! The bytes live behind an `Arc<[u8]>`, so cloning the buffer for each
//! worker shares one allocation. Decoding copies the records into aligned
//! vectors and checks every link before the tree is queried.

use std::mem::size_of;
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};

use super::node::{NodeRecord, NONE};
use super::MeshOctree;
use crate::error::{Result, VoxelizeError};

const MAGIC: u32 = u32::from_le_bytes(*b"MOCT");
const VERSION: u32 = 1;

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct BufferHeader {
  magic: u32,
  version: u32,
  node_count: u32,
  triangle_id_count: u32,
  max_depth: u32,
  _pad: u32,
}

const HEADER_LEN: usize = size_of::<BufferHeader>();
const NODE_LEN: usize = size_of::<NodeRecord>();

/// Serialized octree shared read-only between threads.
#[derive(Clone, Debug, PartialEq)]
pub struct OctreeBuffer(Arc<[u8]>);

impl OctreeBuffer {
  pub fn as_bytes(&self) -> &[u8] {
    &self.0
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl From<Vec<u8>> for OctreeBuffer {
  fn from(bytes: Vec<u8>) -> Self {
    Self(bytes.into())
  }
}

fn invalid(reason: impl Into<String>) -> VoxelizeError {
  VoxelizeError::InvalidOctreeBuffer(reason.into())
}

pub(super) fn encode(octree: &MeshOctree) -> OctreeBuffer {
  let header = BufferHeader {
    magic: MAGIC,
    version: VERSION,
    node_count: octree.nodes.len() as u32,
    triangle_id_count: octree.triangle_ids.len() as u32,
    max_depth: octree.max_depth,
    _pad: 0,
  };

  let mut bytes = Vec::with_capacity(
    HEADER_LEN + octree.nodes.len() * NODE_LEN + octree.triangle_ids.len() * 4,
  );
  bytes.extend_from_slice(bytemuck::bytes_of(&header));
  bytes.extend_from_slice(bytemuck::cast_slice(&octree.nodes));
  bytes.extend_from_slice(bytemuck::cast_slice(&octree.triangle_ids));

  OctreeBuffer::from(bytes)
}

pub(super) fn decode(buffer: &OctreeBuffer) -> Result<MeshOctree> {
  let bytes = buffer.as_bytes();
  if bytes.len() < HEADER_LEN {
    return Err(invalid(format!(
      "{} bytes is shorter than the {} byte header",
      bytes.len(),
      HEADER_LEN
    )));
  }

  let header: BufferHeader = bytemuck::pod_read_unaligned(&bytes[..HEADER_LEN]);
  if header.magic != MAGIC {
    return Err(invalid("bad magic"));
  }
  if header.version != VERSION {
    return Err(invalid(format!("unsupported version {}", header.version)));
  }
  if header.node_count == 0 {
    return Err(invalid("missing root node"));
  }

  let node_count = header.node_count as usize;
  let id_count = header.triangle_id_count as usize;
  let nodes_end = HEADER_LEN + node_count * NODE_LEN;
  let ids_end = nodes_end + id_count * size_of::<u32>();
  if bytes.len() != ids_end {
    return Err(invalid(format!(
      "expected {} bytes for {} nodes and {} ids, got {}",
      ids_end,
      node_count,
      id_count,
      bytes.len()
    )));
  }

  let nodes: Vec<NodeRecord> = bytemuck::pod_collect_to_vec(&bytes[HEADER_LEN..nodes_end]);
  let triangle_ids: Vec<u32> = bytemuck::pod_collect_to_vec(&bytes[nodes_end..ids_end]);

  for (index, node) in nodes.iter().enumerate() {
    // Children are always appended after their parent.
    if let Some(&child) = node
      .children
      .iter()
      .find(|&&c| c != NONE && (c as usize >= node_count || c as usize <= index))
    {
      return Err(invalid(format!("node {} links to bad child {}", index, child)));
    }
    let end = node.triangle_start as usize + node.triangle_count as usize;
    if end > id_count {
      return Err(invalid(format!(
        "node {} triangle range ends at {} past {} ids",
        index, end, id_count
      )));
    }
  }

  Ok(MeshOctree {
    nodes,
    triangle_ids,
    max_depth: header.max_depth,
  })
}
