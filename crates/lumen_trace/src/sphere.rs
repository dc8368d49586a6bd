//! Sphere primitive, static or linearly moving.

use std::f64::consts::PI;
use std::sync::Arc;

use lumen_math::{Aabb, Interval, Point2, Ray, Vec3};
use rand::RngCore;

use crate::material::Material;
use crate::surface::{Hit, Surface};

/// A spherical surface whose center moves linearly from `center0` at time
/// `t0` to `center1` at time `t1`. A static sphere is the degenerate case
/// with both centers equal.
pub struct Sphere {
    center0: Vec3,
    center1: Vec3,
    t0: f64,
    t1: f64,
    radius: f64,
    material: Arc<dyn Material>,
}

impl Sphere {
    /// Create a static sphere with the given center and radius.
    pub fn new(center: Vec3, radius: f64, material: Arc<dyn Material>) -> Self {
        Self::moving(center, center, 0.0, 1.0, radius, material)
    }

    /// Create a sphere that moves from `center0` at time `t0` to
    /// `center1` at time `t1`.
    pub fn moving(
        center0: Vec3,
        center1: Vec3,
        t0: f64,
        t1: f64,
        radius: f64,
        material: Arc<dyn Material>,
    ) -> Self {
        assert!(t1 > t0, "sphere time interval must be nonempty");
        Self {
            center0,
            center1,
            t0,
            t1,
            radius,
            material,
        }
    }

    /// Center of the sphere at time `t`.
    pub fn center(&self, t: f64) -> Vec3 {
        let p = (t - self.t0) / (self.t1 - self.t0);
        self.center0 + (self.center1 - self.center0) * p
    }

    /// Spherical (lat/lon) texture coordinate of point `p` at time `t`.
    fn uv(&self, p: Vec3, t: f64) -> Point2 {
        let p2 = (p - self.center(t)) / self.radius;
        let phi = p2.z.atan2(p2.x);
        let theta = p2.y.asin();
        let u = 1.0 - (phi + PI) / (2.0 * PI);
        let v = (theta + PI / 2.0) / PI;
        Point2::new(u, v)
    }
}

impl Surface for Sphere {
    fn hit(&self, ray: &Ray, span: Interval, _rng: &mut dyn RngCore) -> Option<Hit<'_>> {
        let center = self.center(ray.time);
        let oc = ray.origin - center;
        let a = ray.dir.dot(ray.dir);
        let b = oc.dot(ray.dir);
        let c = oc.dot(oc) - self.radius * self.radius;

        // Reduced discriminant of a*d^2 + 2b*d + c = 0.
        let disc = b * b - a * c;
        if disc <= 0.0 {
            return None;
        }

        let sqrt = disc.sqrt();
        let mut d = (-b - sqrt) / a;
        if !span.surrounds(d) {
            d = (-b + sqrt) / a;
            if !span.surrounds(d) {
                return None;
            }
        }

        let point = ray.at(d);
        Some(Hit {
            dist: d,
            point,
            normal: (point - center) / self.radius,
            uv: self.uv(point, ray.time),
            material: self.material.as_ref(),
        })
    }

    fn bounds(&self, t0: f64, t1: f64) -> Aabb {
        let r = Vec3::splat(self.radius);
        let bounds0 = Aabb::new(self.center(t0) - r, self.center(t0) + r);
        let bounds1 = Aabb::new(self.center(t1) - r, self.center(t1) + r);
        bounds0.union(&bounds1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambert;
    use lumen_math::Color;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn unit_sphere(radius: f64) -> Sphere {
        Sphere::new(
            Vec3::ZERO,
            radius,
            Arc::new(Lambert::solid(Color::splat(0.5))),
        )
    }

    #[test]
    fn test_head_on_hit_distance_and_normal() {
        for radius in [0.5, 1.0, 2.0] {
            let sphere = unit_sphere(radius);
            let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0), 0.0);
            let mut rng = StdRng::seed_from_u64(0);

            let hit = sphere
                .hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rng)
                .unwrap();
            assert!((hit.dist - (5.0 - radius)).abs() < 1e-9);
            assert!((hit.normal.length() - 1.0).abs() < 1e-9);
            assert!((hit.normal - hit.point / radius).length() < 1e-9);
        }
    }

    #[test]
    fn test_miss_returns_none() {
        let sphere = unit_sphere(1.0);
        let ray = Ray::new(Vec3::new(0.0, 5.0, 5.0), Vec3::new(0.0, 0.0, -1.0), 0.0);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(sphere
            .hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rng)
            .is_none());
    }

    #[test]
    fn test_inside_hit_uses_far_root() {
        let sphere = unit_sphere(2.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 0.0);
        let mut rng = StdRng::seed_from_u64(0);

        let hit = sphere
            .hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rng)
            .unwrap();
        assert!((hit.dist - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_moving_sphere_center_lerp() {
        let sphere = Sphere::moving(
            Vec3::ZERO,
            Vec3::new(4.0, 0.0, 0.0),
            0.0,
            1.0,
            1.0,
            Arc::new(Lambert::solid(Color::splat(0.5))),
        );
        assert_eq!(sphere.center(0.0), Vec3::ZERO);
        assert_eq!(sphere.center(0.5), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(sphere.center(1.0), Vec3::new(4.0, 0.0, 0.0));

        // Bounds over the full interval cover both end positions.
        let bounds = sphere.bounds(0.0, 1.0);
        assert_eq!(bounds.min, Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(bounds.max, Vec3::new(5.0, 1.0, 1.0));
    }

    #[test]
    fn test_uv_poles_and_equator() {
        let sphere = unit_sphere(1.0);
        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0), 0.0);
        let mut rng = StdRng::seed_from_u64(0);
        let hit = sphere
            .hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rng)
            .unwrap();

        // +X on the equator: phi = 0, theta = 0.
        assert!((hit.uv.x - 0.5).abs() < 1e-9);
        assert!((hit.uv.y - 0.5).abs() < 1e-9);
    }
}
