//! Ray with precomputed inverse direction for slab tests.

use glam::DVec3;

use super::Aabb;

/// Half-line `origin + t * dir`, `t >= 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
  pub origin: DVec3,
  pub dir: DVec3,
  /// Component-wise `1 / dir`; zero direction components map to 0.
  pub inv_dir: DVec3,
}

impl Ray {
  pub fn new(origin: DVec3, dir: DVec3) -> Self {
    let inv = |d: f64| if d == 0.0 { 0.0 } else { 1.0 / d };
    Self {
      origin,
      dir,
      inv_dir: DVec3::new(inv(dir.x), inv(dir.y), inv(dir.z)),
    }
  }

  /// Slab test against an axis-aligned box.
  ///
  /// An axis the ray does not move along constrains nothing but the origin,
  /// which must then lie inside that slab. Returns false when `tmax < 0`
  /// (box behind the origin) or `tmin > tmax` (slabs do not overlap).
  pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
    let mut tmin = f64::NEG_INFINITY;
    let mut tmax = f64::INFINITY;

    for axis in 0..3 {
      let origin = self.origin[axis];
      let (lo, hi) = (aabb.min[axis], aabb.max[axis]);

      if self.dir[axis] == 0.0 {
        if origin < lo || origin > hi {
          return false;
        }
        continue;
      }

      let inv = self.inv_dir[axis];
      let t1 = (lo - origin) * inv;
      let t2 = (hi - origin) * inv;
      tmin = tmin.max(t1.min(t2));
      tmax = tmax.min(t1.max(t2));
    }

    !(tmax < 0.0 || tmin > tmax)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn unit_box() -> Aabb {
    Aabb::new(DVec3::ZERO, DVec3::ONE)
  }

  #[test]
  fn test_inverse_direction_zero_components() {
    let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 2.0, -4.0));
    assert_eq!(ray.inv_dir, DVec3::new(0.0, 0.5, -0.25));
  }

  #[test]
  fn test_ray_hits_box_in_front() {
    let ray = Ray::new(DVec3::new(-1.0, 0.5, 0.5), DVec3::X);
    assert!(ray.intersects_aabb(&unit_box()));
  }

  #[test]
  fn test_ray_misses_box_behind() {
    let ray = Ray::new(DVec3::new(2.0, 0.5, 0.5), DVec3::X);
    assert!(!ray.intersects_aabb(&unit_box()));
  }

  #[test]
  fn test_ray_from_inside_hits() {
    let ray = Ray::new(DVec3::splat(0.5), DVec3::new(0.3, -0.7, 0.2).normalize());
    assert!(ray.intersects_aabb(&unit_box()));
  }

  #[test]
  fn test_axis_parallel_ray_outside_slab_misses() {
    // Moves along +X but sits above the box in Y.
    let ray = Ray::new(DVec3::new(-1.0, 2.0, 0.5), DVec3::X);
    assert!(!ray.intersects_aabb(&unit_box()));
  }

  #[test]
  fn test_diagonal_ray_misses() {
    let ray = Ray::new(DVec3::new(-1.0, 0.5, 0.5), DVec3::new(-1.0, 1.0, 0.0).normalize());
    assert!(!ray.intersects_aabb(&unit_box()));
  }

  #[test]
  fn test_grazing_edge_counts_as_hit() {
    let ray = Ray::new(DVec3::new(-1.0, 1.0, 0.5), DVec3::X);
    assert!(ray.intersects_aabb(&unit_box()));
  }
}
