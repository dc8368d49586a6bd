//! Shared math types for the lumen path tracer.
//!
//! Everything is double precision: rendering accumulates thousands of
//! floating point operations per pixel and f32 shows visible banding in
//! soft shadows.

pub use glam::{DVec2, DVec3};

/// 3D vector and point type.
pub type Vec3 = DVec3;

/// 2D texture coordinate.
pub type Point2 = DVec2;

/// RGB color with channels in linear space, typically 0-1.
pub type Color = DVec3;

mod aabb;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
