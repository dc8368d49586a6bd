//! Recursive path integrator and per-render configuration.

use lumen_math::{Color, Interval, Ray};
use rand::RngCore;

use crate::surface::Surface;
use crate::BIAS;

/// Color returned for rays that escape the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Background {
    /// No ambient light; only emitters illuminate the scene.
    Black,
    /// Vertical white-to-blue gradient.
    Sky,
}

impl Background {
    /// Shade an escaped ray.
    pub fn shade(&self, ray: &Ray) -> Color {
        match self {
            Background::Black => Color::ZERO,
            Background::Sky => {
                let t = 0.5 * (ray.dir.normalize().y + 1.0);
                Color::ONE * (1.0 - t) + Color::new(0.5, 0.7, 1.0) * t
            }
        }
    }
}

/// Settings shared by every pixel of one render.
#[derive(Clone, Copy, Debug)]
pub struct RenderConfig {
    /// Samples per pixel.
    pub samples: u32,
    /// Maximum number of bounces before a path is cut off.
    pub max_depth: u32,
    pub background: Background,
    /// Base seed; every image row derives its own stream from this.
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples: 100,
            max_depth: 50,
            background: Background::Black,
            seed: 0,
        }
    }
}

/// Radiance arriving along `ray` from `scene`.
///
/// Each bounce adds the material's emission and recurses along the
/// scattered direction, attenuated; absorbed paths stop at their
/// emission, and paths deeper than `config.max_depth` contribute black.
pub fn radiance(
    ray: &Ray,
    scene: &dyn Surface,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    if depth >= config.max_depth {
        return Color::ZERO;
    }
    let span = Interval::new(BIAS, f64::INFINITY);
    match scene.hit(ray, span, rng) {
        Some(hit) => {
            let emitted = hit.material.emitted(hit.uv, hit.point);
            match hit
                .material
                .scatter(ray.dir, hit.normal, hit.uv, hit.point, rng)
            {
                Some(scatter) => {
                    let bounced = Ray::new(hit.point, scatter.dir, ray.time);
                    emitted
                        + scatter.attenuation * radiance(&bounced, scene, depth + 1, config, rng)
                }
                None => emitted,
            }
        }
        None => config.background.shade(ray),
    }
}
