//! Geometry primitives: boxes, rays and the triangle/box overlap test.

pub mod aabb;
pub mod ray;
pub mod triangle;

pub use aabb::Aabb;
pub use ray::Ray;
pub use triangle::triangle_intersects_aabb;
