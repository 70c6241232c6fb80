//! VertexBuffer - growable position buffer for emitted triangles.
//!
//! Capacity starts at [`VERTEX_BUFFER_INITIAL_CAPACITY`] floats and doubles
//! whenever an append would overflow it, so a chunk mesh appended in one call
//! never triggers more than one reallocation.

use crate::constants::VERTEX_BUFFER_INITIAL_CAPACITY;

/// Flat `[x, y, z, x, y, z, ...]` triangle positions.
#[derive(Clone, Debug, PartialEq)]
pub struct VertexBuffer {
  data: Vec<f64>,
  capacity: usize,
}

impl Default for VertexBuffer {
  fn default() -> Self {
    Self::new()
  }
}

impl VertexBuffer {
  pub fn new() -> Self {
    Self::with_capacity(VERTEX_BUFFER_INITIAL_CAPACITY)
  }

  pub fn with_capacity(capacity: usize) -> Self {
    let capacity = capacity.max(1);
    Self {
      data: Vec::with_capacity(capacity),
      capacity,
    }
  }

  /// Append a run of floats, doubling capacity until they fit.
  pub fn append(&mut self, values: &[f64]) {
    self.grow_to(self.data.len() + values.len());
    self.data.extend_from_slice(values);
  }

  pub fn push_vertex(&mut self, x: f64, y: f64, z: f64) {
    self.append(&[x, y, z]);
  }

  #[inline]
  fn grow_to(&mut self, required: usize) {
    if required <= self.capacity {
      return;
    }
    let mut capacity = self.capacity;
    while capacity < required {
      capacity *= 2;
    }
    self.data.reserve_exact(capacity - self.data.len());
    self.capacity = capacity;
  }

  /// Number of floats stored.
  pub fn len(&self) -> usize {
    self.data.len()
  }

  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  /// Reserved size in floats.
  pub fn capacity(&self) -> usize {
    self.capacity
  }

  pub fn vertex_count(&self) -> usize {
    self.data.len() / 3
  }

  pub fn as_slice(&self) -> &[f64] {
    &self.data
  }

  pub fn into_vec(self) -> Vec<f64> {
    self.data
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_buffer_is_empty() {
    let buffer = VertexBuffer::new();
    assert!(buffer.is_empty());
    assert_eq!(buffer.capacity(), VERTEX_BUFFER_INITIAL_CAPACITY);
    assert_eq!(buffer.vertex_count(), 0);
  }

  #[test]
  fn test_append_and_push_vertex() {
    let mut buffer = VertexBuffer::with_capacity(8);
    buffer.push_vertex(1.0, 2.0, 3.0);
    buffer.append(&[4.0, 5.0, 6.0]);

    assert_eq!(buffer.len(), 6);
    assert_eq!(buffer.vertex_count(), 2);
    assert_eq!(buffer.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(buffer.capacity(), 8);
  }

  #[test]
  fn test_capacity_doubles() {
    let mut buffer = VertexBuffer::with_capacity(4);
    buffer.append(&[0.0; 5]);
    assert_eq!(buffer.capacity(), 8);

    // One append may need several doublings.
    buffer.append(&[0.0; 20]);
    assert_eq!(buffer.len(), 25);
    assert_eq!(buffer.capacity(), 32);
  }

  #[test]
  fn test_exact_fit_does_not_grow() {
    let mut buffer = VertexBuffer::with_capacity(6);
    buffer.append(&[1.0; 6]);
    assert_eq!(buffer.capacity(), 6);
  }

  #[test]
  fn test_into_vec_keeps_contents() {
    let mut buffer = VertexBuffer::with_capacity(0);
    buffer.push_vertex(0.5, 0.25, 0.125);
    assert_eq!(buffer.into_vec(), vec![0.5, 0.25, 0.125]);
  }
}
