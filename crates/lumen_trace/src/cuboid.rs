//! Axis-aligned box built from six rectangles.

use std::sync::Arc;

use lumen_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;

use crate::material::Material;
use crate::rect::Rect;
use crate::surface::{Hit, Surface, SurfaceList};
use crate::transform::Flip;

/// A closed axis-aligned box: six [`Rect`] faces sharing one material,
/// each oriented so its normal points away from the interior. The three
/// faces on the min side are wrapped in [`Flip`] to achieve that.
pub struct Cuboid {
    faces: SurfaceList,
}

impl Cuboid {
    /// Create a box enclosing the volume between points `min` and `max`.
    pub fn new(min: Vec3, max: Vec3, material: Arc<dyn Material>) -> Self {
        let faces: Vec<Box<dyn Surface>> = vec![
            Box::new(Rect::new(
                Vec3::new(min.x, min.y, max.z),
                Vec3::new(max.x, max.y, max.z),
                material.clone(),
            )),
            Box::new(Flip::new(Box::new(Rect::new(
                Vec3::new(min.x, min.y, min.z),
                Vec3::new(max.x, max.y, min.z),
                material.clone(),
            )))),
            Box::new(Rect::new(
                Vec3::new(min.x, max.y, min.z),
                Vec3::new(max.x, max.y, max.z),
                material.clone(),
            )),
            Box::new(Flip::new(Box::new(Rect::new(
                Vec3::new(min.x, min.y, min.z),
                Vec3::new(max.x, min.y, max.z),
                material.clone(),
            )))),
            Box::new(Rect::new(
                Vec3::new(max.x, min.y, min.z),
                Vec3::new(max.x, max.y, max.z),
                material.clone(),
            )),
            Box::new(Flip::new(Box::new(Rect::new(
                Vec3::new(min.x, min.y, min.z),
                Vec3::new(min.x, max.y, max.z),
                material,
            )))),
        ];
        Self {
            faces: SurfaceList::new(faces),
        }
    }
}

impl Surface for Cuboid {
    fn hit(&self, ray: &Ray, span: Interval, rng: &mut dyn RngCore) -> Option<Hit<'_>> {
        self.faces.hit(ray, span, rng)
    }

    fn bounds(&self, t0: f64, t1: f64) -> Aabb {
        self.faces.bounds(t0, t1)
    }
}
