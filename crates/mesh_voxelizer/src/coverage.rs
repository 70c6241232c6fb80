//! Coverage sampler - majority-visibility interior test.
//!
//! A box that does not touch the surface counts as inside a closed mesh when
//! nearly every ray cast from its centre reaches the surface:
//!
//! ```text
//!   inside                      outside
//!   ┌───────────────┐           ┌───────────────┐
//!   │   ↖  ↑  ↗     │           │               │   ↖  ↑  ↗
//!   │    ╲ │ ╱      │           │           ←── │ ──  ●
//!   │  ←── ● ──→    │           │               │
//!   └───────────────┘           └───────────────┘
//!   hits / N >= COVERAGE_THRESHOLD   most rays escape
//! ```
//!
//! Directions come from a Hammersley point set mapped with `cos θ = 1 - u`,
//! which spreads them evenly over the +z hemisphere. The sampler only holds
//! those directions; counters live on the stack of each query, so one sampler
//! can be shared between threads.

use std::f64::consts::TAU;

use glam::DVec3;

use crate::constants::{COVERAGE_SAMPLE_COUNT, COVERAGE_THRESHOLD};
use crate::geometry::{Aabb, Ray};
use crate::octree::MeshOctree;

/// Precomputed ray directions for interior tests.
#[derive(Clone, Debug)]
pub struct CoverageSampler {
  directions: Vec<DVec3>,
}

impl Default for CoverageSampler {
  fn default() -> Self {
    Self::new()
  }
}

impl CoverageSampler {
  /// Sampler with [`COVERAGE_SAMPLE_COUNT`] directions.
  pub fn new() -> Self {
    let n = COVERAGE_SAMPLE_COUNT;
    let directions = (0..n)
      .map(|i| hemisphere_direction(i as f64 / n as f64, radical_inverse(i as u32)))
      .collect();
    Self { directions }
  }

  pub fn directions(&self) -> &[DVec3] {
    &self.directions
  }

  /// Is `aabb` enclosed by the surface indexed in `octree`?
  ///
  /// Stops as soon as more than a quarter of the rays have missed.
  pub fn is_inside(&self, octree: &MeshOctree, aabb: &Aabb) -> bool {
    self.classify(aabb.center(), |ray| octree.intersects_ray(ray))
  }

  /// Cast one ray per direction from `origin` through `hit`.
  fn classify(&self, origin: DVec3, mut hit: impl FnMut(&Ray) -> bool) -> bool {
    let n = self.directions.len();
    let max_misses = n / 4;

    let mut hits = 0usize;
    let mut misses = 0usize;
    for &dir in &self.directions {
      if hit(&Ray::new(origin, dir)) {
        hits += 1;
      } else {
        misses += 1;
        if misses > max_misses {
          return false;
        }
      }
    }

    hits as f64 / n as f64 >= COVERAGE_THRESHOLD
  }
}

/// Base-2 radical inverse (Van der Corput): reverse the bits, scale by 2^-32.
#[inline]
fn radical_inverse(i: u32) -> f64 {
  i.reverse_bits() as f64 * (1.0 / 4_294_967_296.0)
}

/// Map `(u, v)` in `[0, 1)²` to a unit direction with `z = 1 - u`.
#[inline]
fn hemisphere_direction(u: f64, v: f64) -> DVec3 {
  let phi = v * TAU;
  let cos_theta = 1.0 - u;
  let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
  DVec3::new(phi.cos() * sin_theta, phi.sin() * sin_theta, cos_theta)
}
