use crate::{Interval, Ray, Vec3};

/// Axis-aligned bounding box, stored as min/max corner points.
///
/// Invariant: `min <= max` component-wise. `Aabb::EMPTY` (inverted
/// infinite corners) is the identity element for [`Aabb::union`], so
/// bounds can be folded over a set of surfaces without a special case
/// for the first element.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create a new box enclosing two corner points.
    ///
    /// The corners may be given in any order; they are sorted
    /// component-wise.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Test if a ray intersects this box within the given distance window.
    ///
    /// Slab method: each axis shrinks the running [min, max] window by its
    /// entry/exit distances, swapped when the ray points in the negative
    /// direction, and the test rejects as soon as the window inverts.
    /// A zero direction component produces an infinite inverse (and NaN
    /// slab distances when the origin lies on the slab plane); f64::min /
    /// f64::max ignore NaN operands, so such an axis never constrains the
    /// window and behaves as "parallel to the slab".
    pub fn hit(&self, ray: &Ray, mut span: Interval) -> bool {
        for axis in 0..3 {
            let inv_d = 1.0 / ray.dir[axis];
            let mut d0 = (self.min[axis] - ray.origin[axis]) * inv_d;
            let mut d1 = (self.max[axis] - ray.origin[axis]) * inv_d;
            if inv_d < 0.0 {
                std::mem::swap(&mut d0, &mut d1);
            }
            span.min = span.min.max(d0);
            span.max = span.max.min(d1);
            if span.max <= span.min {
                return false;
            }
        }
        true
    }

    /// Smallest box enclosing both this box and `other`.
    ///
    /// Never shrinks: the result contains both operands.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Extend this box to also enclose point `p`.
    pub fn extend(&self, p: Vec3) -> Aabb {
        Aabb {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    /// Returns true if `other` lies entirely inside this box.
    pub fn contains(&self, other: &Aabb) -> bool {
        self.min.cmple(other.min).all() && self.max.cmpge(other.max).all()
    }

    /// Total surface area: the three axis-pair face areas, doubled.
    pub fn surface_area(&self) -> f64 {
        let dims = self.max - self.min;
        let front = dims.x * dims.y;
        let side = dims.z * dims.y;
        let top = dims.x * dims.z;
        (front + side + top) * 2.0
    }

    /// Center point of the box.
    pub fn midpoint(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// The eight corner points of the box.
    pub fn corners(&self) -> [Vec3; 8] {
        let mut c = [Vec3::ZERO; 8];
        for i in 0..2 {
            for j in 0..2 {
                for k in 0..2 {
                    c[4 * i + 2 * j + k] = Vec3::new(
                        if i == 0 { self.min.x } else { self.max.x },
                        if j == 0 { self.min.y } else { self.max.y },
                        if k == 0 { self.min.z } else { self.max.z },
                    );
                }
            }
        }
        c
    }

    /// An empty box: the identity element for `union` and `extend`.
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
        max: Vec3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
    };
}
