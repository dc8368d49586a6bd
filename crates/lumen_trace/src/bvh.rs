//! Bounding volume hierarchy built with the surface area heuristic.

use lumen_math::{Aabb, Interval, Ray};
use rand::RngCore;

use crate::surface::{Hit, Surface, SurfaceList};

/// Estimated cost of one box test during traversal.
const COST_TRAVERSE: f64 = 1.0;
/// Estimated cost of one surface intersection, relative to a box test.
const COST_INTERSECT: f64 = 2.0;

/// Below this many surfaces a node is always a leaf.
const MIN_SPLIT: usize = 4;

/// A binary tree of axis-aligned boxes over a set of surfaces.
///
/// Traversal rejects a whole subtree with a single slab test when the
/// ray misses its box, turning the linear closest-hit scan of
/// [`SurfaceList`] into a logarithmic descent.
pub enum Bvh {
    Branch {
        left: Box<Bvh>,
        right: Box<Bvh>,
        bounds: Aabb,
    },
    Leaf {
        surfaces: SurfaceList,
        bounds: Aabb,
    },
}

impl Bvh {
    /// Build a hierarchy over `surfaces`, bounding motion across
    /// `[t0, t1]`.
    ///
    /// Panics if `surfaces` is empty.
    pub fn new(surfaces: Vec<Box<dyn Surface>>, t0: f64, t1: f64) -> Self {
        assert!(!surfaces.is_empty(), "cannot build a BVH over no surfaces");
        let pairs: Vec<(Aabb, Box<dyn Surface>)> = surfaces
            .into_iter()
            .map(|s| (s.bounds(t0, t1), s))
            .collect();
        let count = pairs.len();
        let root = Self::build(pairs);
        log::info!("built BVH over {} surfaces", count);
        root
    }

    fn build(mut pairs: Vec<(Aabb, Box<dyn Surface>)>) -> Self {
        let bounds = pairs
            .iter()
            .fold(Aabb::EMPTY, |acc, (b, _)| acc.union(b));
        let n = pairs.len();

        if n < MIN_SPLIT {
            return Self::leaf(pairs, bounds);
        }

        // Surface area heuristic: probe a few split fractions on every
        // axis and keep the cheapest, falling back to a leaf when no
        // split beats intersecting everything here.
        let leaf_cost = n as f64 * COST_INTERSECT;
        let total_area = bounds.surface_area();
        let mut best_cost = leaf_cost;
        let mut best: Option<(usize, usize)> = None;

        for axis in 0..3 {
            Self::sort_by_midpoint(&mut pairs, axis);

            // Prefix/suffix box unions so each candidate costs O(1).
            let mut prefix = Vec::with_capacity(n);
            let mut acc = Aabb::EMPTY;
            for (b, _) in &pairs {
                acc = acc.union(b);
                prefix.push(acc);
            }
            let mut suffix = vec![Aabb::EMPTY; n];
            let mut acc = Aabb::EMPTY;
            for i in (0..n).rev() {
                acc = acc.union(&pairs[i].0);
                suffix[i] = acc;
            }

            let mut fraction = 0.33;
            while fraction < 0.7 {
                let split = (n as f64 * fraction) as usize + 1;
                if split < n {
                    let left_area = prefix[split - 1].surface_area();
                    let right_area = suffix[split].surface_area();
                    let cost = COST_TRAVERSE
                        + COST_INTERSECT
                            * (left_area / total_area * split as f64
                                + right_area / total_area * (n - split) as f64);
                    if cost < best_cost {
                        best_cost = cost;
                        best = Some((axis, split));
                    }
                }
                fraction += 0.17;
            }
        }

        let (axis, split) = match best {
            Some(found) => found,
            None => {
                log::debug!("no split beats leaf cost for {} surfaces", n);
                return Self::leaf(pairs, bounds);
            }
        };

        // Pairs are currently ordered by the last axis probed; restore
        // the winning axis before cutting.
        Self::sort_by_midpoint(&mut pairs, axis);
        let right = pairs.split_off(split);
        Bvh::Branch {
            left: Box::new(Self::build(pairs)),
            right: Box::new(Self::build(right)),
            bounds,
        }
    }

    fn leaf(pairs: Vec<(Aabb, Box<dyn Surface>)>, bounds: Aabb) -> Self {
        let surfaces = SurfaceList::new(pairs.into_iter().map(|(_, s)| s).collect());
        Bvh::Leaf { surfaces, bounds }
    }

    fn sort_by_midpoint(pairs: &mut [(Aabb, Box<dyn Surface>)], axis: usize) {
        pairs.sort_by(|(a, _), (b, _)| {
            a.midpoint()[axis]
                .partial_cmp(&b.midpoint()[axis])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }
}

impl Surface for Bvh {
    fn hit(&self, ray: &Ray, span: Interval, rng: &mut dyn RngCore) -> Option<Hit<'_>> {
        match self {
            Bvh::Leaf { surfaces, bounds } => {
                if !bounds.hit(ray, span) {
                    return None;
                }
                surfaces.hit(ray, span, rng)
            }
            Bvh::Branch {
                left,
                right,
                bounds,
            } => {
                if !bounds.hit(ray, span) {
                    return None;
                }
                // Both children may overlap the ray; probe both and
                // keep the nearer hit, narrowing the window after the
                // first one lands.
                match left.hit(ray, span, rng) {
                    Some(hit) => {
                        let narrowed = Interval::new(span.min, hit.dist);
                        Some(right.hit(ray, narrowed, rng).unwrap_or(hit))
                    }
                    None => right.hit(ray, span, rng),
                }
            }
        }
    }

    fn bounds(&self, _t0: f64, _t1: f64) -> Aabb {
        match self {
            Bvh::Leaf { bounds, .. } | Bvh::Branch { bounds, .. } => *bounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::Vec3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::sync::Arc;

    use crate::material::Lambert;
    use crate::sphere::Sphere;

    fn random_spheres(rng: &mut StdRng, count: usize) -> Vec<Box<dyn Surface>> {
        let material = Arc::new(Lambert::solid(Vec3::splat(0.5)));
        (0..count)
            .map(|_| {
                let center = Vec3::new(
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                );
                let radius = rng.gen_range(0.1..1.5);
                Box::new(Sphere::new(center, radius, material.clone())) as Box<dyn Surface>
            })
            .collect()
    }

    #[test]
    fn test_single_surface_becomes_leaf() {
        let material = Arc::new(Lambert::solid(Vec3::ONE));
        let sphere: Box<dyn Surface> = Box::new(Sphere::new(Vec3::ZERO, 1.0, material));
        let bvh = Bvh::new(vec![sphere], 0.0, 1.0);
        assert!(matches!(bvh, Bvh::Leaf { .. }));

        let mut rng = StdRng::seed_from_u64(1);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0), 0.0);
        let hit = bvh
            .hit(&ray, Interval::new(0.0, f64::INFINITY), &mut rng)
            .unwrap();
        assert!((hit.dist - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_cover_every_surface() {
        let mut rng = StdRng::seed_from_u64(7);
        let spheres = random_spheres(&mut rng, 50);
        let expected = spheres
            .iter()
            .fold(Aabb::EMPTY, |acc, s| acc.union(&s.bounds(0.0, 1.0)));
        let bvh = Bvh::new(spheres, 0.0, 1.0);
        let got = bvh.bounds(0.0, 1.0);
        assert!(expected.contains(&got) && got.contains(&expected));
    }

    #[test]
    fn test_matches_linear_scan() {
        let mut rng = StdRng::seed_from_u64(42);

        let spheres = random_spheres(&mut rng, 80);
        let mut rng2 = StdRng::seed_from_u64(42);
        let list = SurfaceList::new(random_spheres(&mut rng2, 80));
        let bvh = Bvh::new(spheres, 0.0, 1.0);

        let span = Interval::new(1e-3, f64::INFINITY);
        for _ in 0..500 {
            let origin = Vec3::new(
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-20.0..20.0),
            );
            let dir = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            if dir.length() < 1e-6 {
                continue;
            }
            let ray = Ray::new(origin, dir.normalize(), 0.0);

            let mut scratch = StdRng::seed_from_u64(0);
            let from_bvh = bvh.hit(&ray, span, &mut scratch).map(|h| h.dist);
            let mut scratch = StdRng::seed_from_u64(0);
            let from_list = list.hit(&ray, span, &mut scratch).map(|h| h.dist);

            match (from_bvh, from_list) {
                (Some(a), Some(b)) => assert!((a - b).abs() < 1e-9),
                (None, None) => {}
                other => panic!("BVH and linear scan disagree: {:?}", other),
            }
        }
    }
}
