//! Structural wrappers: translation, Y-axis rotation, and normal flipping.
//!
//! Each wrapper exclusively owns a heap-allocated child surface; scene
//! trees are acyclic by construction and never mutated after the build.

use lumen_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;

use crate::surface::{Hit, Surface};

/// Shifts a child surface by a fixed offset.
///
/// The incoming ray is moved into child space by subtracting the offset
/// from its origin; the returned hit point is moved back out.
pub struct Translate {
    child: Box<dyn Surface>,
    offset: Vec3,
}

impl Translate {
    pub fn new(child: Box<dyn Surface>, offset: Vec3) -> Self {
        Self { child, offset }
    }
}

impl Surface for Translate {
    fn hit(&self, ray: &Ray, span: Interval, rng: &mut dyn RngCore) -> Option<Hit<'_>> {
        let local = Ray::new(ray.origin - self.offset, ray.dir, ray.time);
        let mut hit = self.child.hit(&local, span, rng)?;
        hit.point += self.offset;
        Some(hit)
    }

    fn bounds(&self, t0: f64, t1: f64) -> Aabb {
        let b = self.child.bounds(t0, t1);
        Aabb::new(b.min + self.offset, b.max + self.offset)
    }
}

/// Rotates a child surface about the Y axis by a fixed angle in degrees.
///
/// Rays are rotated into child space by the inverse rotation; hit points
/// and normals are rotated back by the forward rotation. The bounding box
/// is computed once at construction from the rotated corners of the
/// child's box.
pub struct RotateY {
    child: Box<dyn Surface>,
    sin_theta: f64,
    cos_theta: f64,
    bounds: Aabb,
}

impl RotateY {
    pub fn new(child: Box<dyn Surface>, degrees: f64) -> Self {
        let (sin_theta, cos_theta) = degrees.to_radians().sin_cos();
        let mut r = Self {
            child,
            sin_theta,
            cos_theta,
            bounds: Aabb::EMPTY,
        };
        let mut bounds = Aabb::EMPTY;
        for corner in r.child.bounds(0.0, 1.0).corners() {
            bounds = bounds.extend(r.forward(corner));
        }
        r.bounds = bounds;
        r
    }

    /// Forward rotation (child space to world space).
    fn forward(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * v.x + self.sin_theta * v.z,
            v.y,
            -self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }

    /// Inverse rotation (world space to child space).
    fn inverse(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * v.x - self.sin_theta * v.z,
            v.y,
            self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }
}

impl Surface for RotateY {
    fn hit(&self, ray: &Ray, span: Interval, rng: &mut dyn RngCore) -> Option<Hit<'_>> {
        let local = Ray::new(self.inverse(ray.origin), self.inverse(ray.dir), ray.time);
        let mut hit = self.child.hit(&local, span, rng)?;
        hit.point = self.forward(hit.point);
        hit.normal = self.forward(hit.normal);
        Some(hit)
    }

    fn bounds(&self, _t0: f64, _t1: f64) -> Aabb {
        self.bounds
    }
}

/// Delegates intersection unchanged but negates the returned normal.
///
/// Used to make one side of a thin surface face the correct direction,
/// e.g. the interior faces of a box.
pub struct Flip {
    child: Box<dyn Surface>,
}

impl Flip {
    pub fn new(child: Box<dyn Surface>) -> Self {
        Self { child }
    }
}

impl Surface for Flip {
    fn hit(&self, ray: &Ray, span: Interval, rng: &mut dyn RngCore) -> Option<Hit<'_>> {
        let mut hit = self.child.hit(ray, span, rng)?;
        hit.normal = -hit.normal;
        Some(hit)
    }

    fn bounds(&self, t0: f64, t1: f64) -> Aabb {
        self.child.bounds(t0, t1)
    }
}
