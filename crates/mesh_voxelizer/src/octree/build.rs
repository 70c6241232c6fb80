//! Top-down octree construction.
//!
//! ```text
//! root cube (mesh AABB grown to its largest extent)
//!   │
//!   ├─ octant 0..8 ── rayon ──► local arena per octant
//!   │                             │ child keeps parent triangles that
//!   │                             │ overlap its cell, empty child pruned
//!   │                             └─ depth == max_depth ─► leaf + ids
//!   │
//!   └─ splice local arenas in octant order (index + id offsets)
//! ```
//!
//! Splicing in octant order makes the arena layout independent of how rayon
//! schedules the octants.

use glam::DVec3;
use rayon::prelude::*;
use smallvec::SmallVec;

use super::node::{octant_min, NodeRecord, NONE};
use crate::geometry::triangle_intersects_aabb;
use crate::types::MeshData;

/// Arena under construction: nodes plus the shared triangle-id array.
#[derive(Default)]
pub(super) struct Arena {
  pub nodes: Vec<NodeRecord>,
  pub triangle_ids: Vec<u32>,
}

/// Triangles of `candidates` that overlap the cube at `min` with edge `size`.
fn overlapping(mesh: &MeshData, candidates: &[u32], min: DVec3, size: f64) -> Vec<u32> {
  let half = DVec3::splat(size * 0.5);
  let centre = min + half;
  candidates
    .iter()
    .copied()
    .filter(|&t| {
      let [a, b, c] = mesh.triangle(t as usize);
      triangle_intersects_aabb(a, b, c, centre, half)
    })
    .collect()
}

/// Non-empty octants of a cell, each with its surviving triangles.
fn split(
  mesh: &MeshData,
  candidates: &[u32],
  min: DVec3,
  size: f64,
) -> SmallVec<[(u8, DVec3, Vec<u32>); 8]> {
  let child_size = size * 0.5;
  (0u8..8)
    .filter_map(|octant| {
      let child_min = octant_min(min, size, octant);
      let tris = overlapping(mesh, candidates, child_min, child_size);
      (!tris.is_empty()).then_some((octant, child_min, tris))
    })
    .collect()
}

/// Build the subtree for one cell into `arena`, returning its index.
fn build_node(
  arena: &mut Arena,
  mesh: &MeshData,
  min: DVec3,
  size: f64,
  triangles: Vec<u32>,
  depth: u32,
  max_depth: u32,
) -> u32 {
  let index = arena.nodes.len() as u32;
  arena.nodes.push(NodeRecord::new(min, size));

  if depth >= max_depth {
    let node = &mut arena.nodes[index as usize];
    node.triangle_start = arena.triangle_ids.len() as u32;
    node.triangle_count = triangles.len() as u32;
    arena.triangle_ids.extend(triangles);
    return index;
  }

  for (octant, child_min, tris) in split(mesh, &triangles, min, size) {
    let child = build_node(arena, mesh, child_min, size * 0.5, tris, depth + 1, max_depth);
    arena.nodes[index as usize].children[octant as usize] = child;
  }

  index
}

/// Build the whole arena for `mesh` inside the cube at `min` with edge `size`.
pub(super) fn build(mesh: &MeshData, min: DVec3, size: f64, max_depth: u32) -> Arena {
  let all: Vec<u32> = (0..mesh.triangle_count() as u32).collect();

  let mut arena = Arena::default();
  arena.nodes.push(NodeRecord::new(min, size));

  if all.is_empty() {
    return arena;
  }

  if max_depth == 0 {
    let root = &mut arena.nodes[0];
    root.triangle_count = all.len() as u32;
    arena.triangle_ids = all;
    return arena;
  }

  let octants: Vec<(u8, Arena)> = split(mesh, &all, min, size)
    .into_vec()
    .into_par_iter()
    .map(|(octant, child_min, tris)| {
      let mut local = Arena::default();
      build_node(&mut local, mesh, child_min, size * 0.5, tris, 1, max_depth);
      (octant, local)
    })
    .collect();

  for (octant, local) in octants {
    splice(&mut arena, octant, local);
  }

  arena
}

/// Append a child subtree built in its own arena and link it under the root.
fn splice(arena: &mut Arena, octant: u8, local: Arena) {
  let node_base = arena.nodes.len() as u32;
  let id_base = arena.triangle_ids.len() as u32;

  arena.nodes.extend(local.nodes.into_iter().map(|mut node| {
    for child in node.children.iter_mut().filter(|c| **c != NONE) {
      *child += node_base;
    }
    if node.triangle_count > 0 {
      node.triangle_start += id_base;
    }
    node
  }));
  arena.triangle_ids.extend(local.triangle_ids);

  arena.nodes[0].children[octant as usize] = node_base;
}
