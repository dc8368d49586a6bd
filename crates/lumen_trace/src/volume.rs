//! Participating medium bounded by another surface.

use std::sync::Arc;

use lumen_math::{Aabb, Interval, Point2, Ray, Vec3};
use rand::RngCore;

use crate::material::Material;
use crate::sampling::gen_f64;
use crate::surface::{Hit, Surface};
use crate::BIAS;

/// A surface with a probabilistic interior rather than a hard shell.
///
/// Rays may scatter anywhere inside the boundary: the scattering distance
/// is drawn from an exponential free-path distribution parameterized by
/// `density`. Fog and smoke are volumes; `phase` is usually
/// [`crate::Isotropic`].
pub struct Volume {
    boundary: Box<dyn Surface>,
    density: f64,
    phase: Arc<dyn Material>,
}

impl Volume {
    pub fn new(boundary: Box<dyn Surface>, density: f64, phase: Arc<dyn Material>) -> Self {
        assert!(density > 0.0, "volume density must be positive");
        Self {
            boundary,
            density,
            phase,
        }
    }
}

impl Surface for Volume {
    fn hit(&self, ray: &Ray, span: Interval, rng: &mut dyn RngCore) -> Option<Hit<'_>> {
        // The boundary must be hit twice (entry and exit) for the ray to
        // have a well-defined segment inside the medium.
        let entry_hit = self.boundary.hit(ray, Interval::UNIVERSE, rng)?;
        let exit_hit = self.boundary.hit(
            ray,
            Interval::new(entry_hit.dist + BIAS, f64::INFINITY),
            rng,
        )?;

        let entry = entry_hit.dist.max(span.min);
        let exit = exit_hit.dist.min(span.max);
        if entry > exit {
            return None;
        }

        // Exponential free-path sampling for a homogeneous medium.
        let free_path = -(1.0 / self.density) * gen_f64(rng).ln();
        let d = entry + free_path;
        if d >= exit {
            return None;
        }

        Some(Hit {
            dist: d,
            point: ray.at(d),
            // Arbitrary: a normal is physically meaningless inside a medium.
            normal: Vec3::X,
            uv: Point2::ZERO,
            material: self.phase.as_ref(),
        })
    }

    fn bounds(&self, t0: f64, t1: f64) -> Aabb {
        self.boundary.bounds(t0, t1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{Isotropic, Lambert};
    use crate::sphere::Sphere;
    use lumen_math::Color;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn smoke_ball(density: f64) -> Volume {
        let boundary = Box::new(Sphere::new(
            Vec3::ZERO,
            1.0,
            Arc::new(Lambert::solid(Color::splat(0.5))),
        ));
        Volume::new(boundary, density, Arc::new(Isotropic::solid(Color::ONE)))
    }

    fn probe() -> Ray {
        Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0), 0.0)
    }

    #[test]
    fn test_sparse_volume_almost_never_hits() {
        let volume = smoke_ball(1e-9);
        let mut rng = StdRng::seed_from_u64(1);
        let hits = (0..1000)
            .filter(|_| {
                volume
                    .hit(&probe(), Interval::new(0.001, f64::INFINITY), &mut rng)
                    .is_some()
            })
            .count();
        assert_eq!(hits, 0);
    }

    #[test]
    fn test_dense_volume_hits_at_entry() {
        let volume = smoke_ball(1e9);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let hit = volume
                .hit(&probe(), Interval::new(0.001, f64::INFINITY), &mut rng)
                .unwrap();
            // Boundary entry is at distance 4; the free path is tiny.
            assert!((hit.dist - 4.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_ray_missing_boundary_misses_volume() {
        let volume = smoke_ball(1e9);
        let ray = Ray::new(Vec3::new(0.0, 5.0, 5.0), Vec3::new(0.0, 0.0, -1.0), 0.0);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(volume
            .hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rng)
            .is_none());
    }

    #[test]
    fn test_clamped_segment_behind_span_misses() {
        // The interior segment [4, 6] lies entirely beyond the span max.
        let volume = smoke_ball(1e9);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(volume
            .hit(&probe(), Interval::new(0.001, 2.0), &mut rng)
            .is_none());
    }

    #[test]
    fn test_bounds_match_boundary() {
        let volume = smoke_ball(1.0);
        let bounds = volume.bounds(0.0, 1.0);
        assert_eq!(bounds.min, Vec3::splat(-1.0));
        assert_eq!(bounds.max, Vec3::ONE);
    }
}
