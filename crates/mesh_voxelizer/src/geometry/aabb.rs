//! Axis-aligned bounding box with double precision.

use glam::DVec3;

use crate::error::{Result, VoxelizeError};

/// Double-precision axis-aligned bounding box.
///
/// Used for mesh bounds, octree cells, chunk and voxel boxes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
	/// Minimum corner (inclusive).
	pub min: DVec3,
	/// Maximum corner (inclusive).
	pub max: DVec3,
}

impl Aabb {
	/// Create a new AABB from min and max corners.
	///
	/// # Panics
	/// Debug-asserts that min <= max on all axes.
	pub fn new(min: DVec3, max: DVec3) -> Self {
		debug_assert!(
			min.x <= max.x && min.y <= max.y && min.z <= max.z,
			"AABB min must be <= max on all axes"
		);
		Self { min, max }
	}

	/// Create a new AABB from center and half-extents.
	pub fn from_center_half_extents(center: DVec3, half_extents: DVec3) -> Self {
		Self {
			min: center - half_extents,
			max: center + half_extents,
		}
	}

	/// Create an AABB from a minimum corner and a size.
	#[inline]
	pub fn from_min_size(min: DVec3, size: DVec3) -> Self {
		Self { min, max: min + size }
	}

	/// Compute the bounds of a flat `[x, y, z, x, y, z, ...]` vertex buffer.
	///
	/// Trailing values that do not form a full vertex are ignored.
	pub fn from_vertices(vertices: &[f64]) -> Result<Self> {
		if vertices.len() < 3 {
			return Err(VoxelizeError::NotEnoughVertices);
		}

		let mut min = DVec3::splat(f64::INFINITY);
		let mut max = DVec3::splat(f64::NEG_INFINITY);
		for v in vertices.chunks_exact(3) {
			let p = DVec3::new(v[0], v[1], v[2]);
			min = min.min(p);
			max = max.max(p);
		}

		Ok(Self { min, max })
	}

	/// Check that min <= max on all axes and that every component is finite.
	pub fn is_valid(&self) -> bool {
		self.min.is_finite()
			&& self.max.is_finite()
			&& self.min.x <= self.max.x
			&& self.min.y <= self.max.y
			&& self.min.z <= self.max.z
	}

	/// Check if this AABB overlaps with another.
	///
	/// Two AABBs overlap if they share any interior or boundary points, so
	/// boxes that only touch count as overlapping. Symmetric.
	#[inline]
	pub fn intersects(&self, other: &Aabb) -> bool {
		self.min.x <= other.max.x
			&& self.max.x >= other.min.x
			&& self.min.y <= other.max.y
			&& self.max.y >= other.min.y
			&& self.min.z <= other.max.z
			&& self.max.z >= other.min.z
	}

	/// Check if the two boxes share a region of positive volume.
	///
	/// Unlike [`Aabb::intersects`], boxes that only share a face, edge or
	/// corner do not overlap. Neighbouring voxels of a grid tile space with
	/// shared faces, so surface queries over voxel boxes use this test.
	#[inline]
	pub fn overlaps_interior(&self, other: &Aabb) -> bool {
		self.min.x < other.max.x
			&& self.max.x > other.min.x
			&& self.min.y < other.max.y
			&& self.max.y > other.min.y
			&& self.min.z < other.max.z
			&& self.max.z > other.min.z
	}

	/// Check if this AABB contains a point.
	#[inline]
	pub fn contains_point(&self, point: DVec3) -> bool {
		point.x >= self.min.x
			&& point.x <= self.max.x
			&& point.y >= self.min.y
			&& point.y <= self.max.y
			&& point.z >= self.min.z
			&& point.z <= self.max.z
	}

	/// Get the size of the AABB (max - min).
	#[inline]
	pub fn size(&self) -> DVec3 {
		self.max - self.min
	}

	/// Get half the size of the AABB.
	#[inline]
	pub fn half_size(&self) -> DVec3 {
		(self.max - self.min) * 0.5
	}

	/// Get the center of the AABB.
	#[inline]
	pub fn center(&self) -> DVec3 {
		(self.min + self.max) * 0.5
	}

	/// Smallest cube with the same centre that contains this box.
	///
	/// The edge length is the largest extent, so every octant of the result
	/// at every subdivision depth is itself a cube.
	pub fn to_cube(&self) -> Self {
		let half = 0.5 * self.size().max_element();
		Self::from_center_half_extents(self.center(), DVec3::splat(half))
	}
}

#[cfg(test)]
#[path = "aabb_test.rs"]
mod aabb_test;
