//! Sampling helpers shared by materials, the camera, and Perlin noise.
//!
//! All randomness in the engine flows through `&mut dyn RngCore` so that
//! callers control seeding; the renderer hands every image row its own
//! deterministic stream.

use lumen_math::Vec3;
use rand::{Rng, RngCore};

/// Uniform f64 in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen()
}

/// Random point inside the unit sphere, by rejection sampling.
pub fn rand_in_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let v = Vec3::new(
            gen_f64(rng) * 2.0 - 1.0,
            gen_f64(rng) * 2.0 - 1.0,
            gen_f64(rng) * 2.0 - 1.0,
        );
        if v.length_squared() < 1.0 {
            return v;
        }
    }
}

/// Uniformly random unit vector (a direction on the unit sphere).
pub fn rand_unit(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let v = rand_in_sphere(rng);
        let len_sq = v.length_squared();
        if len_sq > 1e-12 {
            return v / len_sq.sqrt();
        }
    }
}

/// Random point inside the unit disk in the XY plane (lens sampling).
pub fn rand_in_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let v = Vec3::new(gen_f64(rng) * 2.0 - 1.0, gen_f64(rng) * 2.0 - 1.0, 0.0);
        if v.length_squared() < 1.0 {
            return v;
        }
    }
}
