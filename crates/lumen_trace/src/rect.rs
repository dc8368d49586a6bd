//! Axis-aligned planar rectangle.

use std::sync::Arc;

use lumen_math::{Aabb, Interval, Point2, Ray, Vec3};
use rand::RngCore;

use crate::material::Material;
use crate::surface::{Hit, Surface};

/// An axis-aligned rectangle lying in one of the three coordinate planes.
///
/// Exactly one axis of `min` and `max` must be equal - that is the flat
/// axis of the rectangle's plane. The normal points in the positive
/// direction of the flat axis; wrap in [`crate::Flip`] for the other side.
pub struct Rect {
    min: Vec3,
    max: Vec3,
    axis: usize,
    material: Arc<dyn Material>,
}

impl Rect {
    /// Create a new rectangle between `min` and `max`.
    ///
    /// The flat axis is detected from the coincident component; rectangles
    /// default to the XY plane (flat axis Z).
    pub fn new(min: Vec3, max: Vec3, material: Arc<dyn Material>) -> Self {
        let axis = if min.x == max.x {
            0
        } else if min.y == max.y {
            1
        } else {
            2
        };
        Self {
            min,
            max,
            axis,
            material,
        }
    }
}

impl Surface for Rect {
    fn hit(&self, ray: &Ray, span: Interval, _rng: &mut dyn RngCore) -> Option<Hit<'_>> {
        let a0 = self.axis;
        let a1 = (a0 + 1) % 3;
        let a2 = (a0 + 2) % 3;

        // Distance at which the ray crosses the rectangle's plane.
        let k = self.min[a0];
        let d = (k - ray.origin[a0]) / ray.dir[a0];
        if !span.contains(d) {
            return None;
        }

        let e1 = ray.origin[a1] + d * ray.dir[a1];
        let e2 = ray.origin[a2] + d * ray.dir[a2];
        if e1 < self.min[a1] || e1 > self.max[a1] || e2 < self.min[a2] || e2 > self.max[a2] {
            return None;
        }

        let u = (e1 - self.min[a1]) / (self.max[a1] - self.min[a1]);
        let v = (e2 - self.min[a2]) / (self.max[a2] - self.min[a2]);
        let mut normal = Vec3::ZERO;
        normal[a0] = 1.0;

        Some(Hit {
            dist: d,
            point: ray.at(d),
            normal,
            uv: Point2::new(u, v),
            material: self.material.as_ref(),
        })
    }

    fn bounds(&self, _t0: f64, _t1: f64) -> Aabb {
        // Thicken along the flat axis so the box has nonzero volume for
        // the acceleration structure.
        let mut pad = Vec3::ZERO;
        pad[self.axis] = crate::BIAS;
        Aabb::new(self.min - pad, self.max + pad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambert;
    use lumen_math::Color;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn gray() -> Arc<Lambert> {
        Arc::new(Lambert::solid(Color::splat(0.5)))
    }

    fn xy_rect() -> Rect {
        Rect::new(Vec3::new(-1.0, -1.0, 2.0), Vec3::new(1.0, 1.0, 2.0), gray())
    }

    #[test]
    fn test_hit_through_plane() {
        let rect = xy_rect();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0), 0.0);
        let mut rng = StdRng::seed_from_u64(0);

        let hit = rect
            .hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rng)
            .unwrap();
        assert!((hit.dist - 3.0).abs() < 1e-9);
        assert_eq!(hit.normal, Vec3::Z);
        // Center of the rectangle maps to the center of uv space.
        assert!((hit.uv.x - 0.5).abs() < 1e-9);
        assert!((hit.uv.y - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_miss_outside_extent() {
        let rect = xy_rect();
        let ray = Ray::new(Vec3::new(3.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0), 0.0);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(rect
            .hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rng)
            .is_none());
    }

    #[test]
    fn test_flat_axis_detection() {
        let yz = Rect::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 2.0, 2.0), gray());
        let ray = Ray::new(Vec3::new(5.0, 1.0, 1.0), Vec3::new(-1.0, 0.0, 0.0), 0.0);
        let mut rng = StdRng::seed_from_u64(0);

        let hit = yz
            .hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rng)
            .unwrap();
        assert_eq!(hit.normal, Vec3::X);
    }

    #[test]
    fn test_bounds_have_nonzero_volume() {
        let bounds = xy_rect().bounds(0.0, 1.0);
        assert!(bounds.max.z > bounds.min.z);
        assert!(bounds.surface_area() > 0.0);
    }
}
