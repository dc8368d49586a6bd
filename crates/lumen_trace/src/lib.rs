//! lumen_trace - CPU path tracing engine.
//!
//! A Monte Carlo path tracer: rays are fired through each pixel with
//! random perturbations, bounced recursively around the scene, and the
//! results averaged. The scene is a single [`Surface`] (normally a [`Bvh`]
//! over everything else), built once and read-only during the render, so
//! worker threads trace against it without locks.
//!
//! A render needs four things: a [`Window`] for the output dimensions, a
//! root [`Surface`], a [`Camera`], and at least one material that emits or
//! scatters light.

mod bvh;
mod camera;
mod cuboid;
mod error;
mod material;
mod perlin;
mod rect;
mod renderer;
mod sampling;
mod sphere;
mod surface;
mod texture;
mod transform;
mod volume;
mod window;

pub use bvh::Bvh;
pub use camera::{Camera, CameraBuilder};
pub use cuboid::Cuboid;
pub use error::RenderError;
pub use material::{Dielectric, Isotropic, Lambert, Light, Material, Metal, Scatter};
pub use perlin::Perlin;
pub use rect::Rect;
pub use renderer::{radiance, Background, RenderConfig};
pub use sphere::Sphere;
pub use surface::{Hit, Surface, SurfaceList};
pub use texture::{Bright, Checker, ImageTexture, Noise, Solid, Texture};
pub use transform::{Flip, RotateY, Translate};
pub use volume::Volume;
pub use window::Window;

/// Re-export the math types most callers need alongside the engine.
pub use lumen_math::{Aabb, Color, Interval, Point2, Ray, Vec3};

/// Small positive distance used in place of zero when casting rays from a
/// surface, to suppress self-intersection from floating point rounding.
pub(crate) const BIAS: f64 = 1e-3;
