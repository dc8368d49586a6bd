//! Surface contract and the flat surface list.

use lumen_math::{Aabb, Interval, Point2, Ray, Vec3};
use rand::RngCore;

use crate::material::Material;

/// Record of a ray-surface intersection.
///
/// Transient: produced by [`Surface::hit`] and consumed by one step of the
/// integrator; nothing retains it across bounces.
pub struct Hit<'a> {
    /// Distance along the ray
    pub dist: f64,
    /// World-space intersection point
    pub point: Vec3,
    /// Unit surface normal at the intersection
    pub normal: Vec3,
    /// Texture coordinate
    pub uv: Point2,
    /// Material at the intersection point
    pub material: &'a dyn Material,
}

/// A bounded object in 3D space that can be hit by a ray.
///
/// `rng` is threaded through because some surfaces intersect
/// probabilistically (see [`crate::Volume`]); deterministic surfaces
/// ignore it.
pub trait Surface: Send + Sync {
    /// Nearest intersection of `ray` with this surface inside `span`,
    /// or `None`.
    fn hit(&self, ray: &Ray, span: Interval, rng: &mut dyn RngCore) -> Option<Hit<'_>>;

    /// Axis-aligned bounding box enclosing this surface for every time
    /// in [t0, t1].
    fn bounds(&self, t0: f64, t1: f64) -> Aabb;
}

/// An unordered flat collection of surfaces, scanned linearly.
pub struct SurfaceList {
    surfaces: Vec<Box<dyn Surface>>,
}

impl SurfaceList {
    /// Create a list from existing surfaces.
    pub fn new(surfaces: Vec<Box<dyn Surface>>) -> Self {
        Self { surfaces }
    }

    /// Add a surface to the list.
    pub fn push(&mut self, surface: Box<dyn Surface>) {
        self.surfaces.push(surface);
    }

    /// Number of surfaces in the list.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Consume the list, yielding its surfaces (e.g. to build a BVH).
    pub fn into_surfaces(self) -> Vec<Box<dyn Surface>> {
        self.surfaces
    }
}

impl Default for SurfaceList {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Surface for SurfaceList {
    fn hit(&self, ray: &Ray, span: Interval, rng: &mut dyn RngCore) -> Option<Hit<'_>> {
        let mut closest = span.max;
        let mut best = None;
        for surface in &self.surfaces {
            if let Some(hit) = surface.hit(ray, Interval::new(span.min, closest), rng) {
                closest = hit.dist;
                best = Some(hit);
            }
        }
        best
    }

    fn bounds(&self, t0: f64, t1: f64) -> Aabb {
        assert!(
            !self.surfaces.is_empty(),
            "bounds of an empty surface list are undefined"
        );
        self.surfaces
            .iter()
            .fold(Aabb::EMPTY, |acc, s| acc.union(&s.bounds(t0, t1)))
    }
}
