//! Seeded Perlin noise generator.

use lumen_math::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::sampling::{gen_f64, rand_unit};

/// Perlin gradient noise over 3D points.
///
/// The permutation tables and gradient vectors are built once from an
/// explicit seed, so every texture owning a generator reproduces the same
/// pattern from the same seed. Values are in roughly [-0.63, 0.63].
pub struct Perlin {
    gradients: Vec<Vec3>,
    perm_x: Vec<usize>,
    perm_y: Vec<usize>,
    perm_z: Vec<usize>,
}

const POINT_COUNT: usize = 256;

impl Perlin {
    /// Build a generator from a seed.
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let gradients = (0..POINT_COUNT).map(|_| rand_unit(&mut rng)).collect();
        let perm_x = generate_perm(&mut rng);
        let perm_y = generate_perm(&mut rng);
        let perm_z = generate_perm(&mut rng);
        Self {
            gradients,
            perm_x,
            perm_y,
            perm_z,
        }
    }

    /// Noise value at point `p`.
    pub fn noise(&self, p: Vec3) -> f64 {
        let u = p.x - p.x.floor();
        let v = p.y - p.y.floor();
        let w = p.z - p.z.floor();
        let i = p.x.floor() as i64;
        let j = p.y.floor() as i64;
        let k = p.z.floor() as i64;

        let mut c = [Vec3::ZERO; 8];
        for di in 0..2i64 {
            for dj in 0..2i64 {
                for dk in 0..2i64 {
                    let x = self.perm_x[((i + di) & 255) as usize];
                    let y = self.perm_y[((j + dj) & 255) as usize];
                    let z = self.perm_z[((k + dk) & 255) as usize];
                    c[(4 * di + 2 * dj + dk) as usize] = self.gradients[x ^ y ^ z];
                }
            }
        }
        interp(&c, u, v, w)
    }

    /// Turbulence: absolute sum of `depth` octaves of noise.
    pub fn turb(&self, p: Vec3, depth: u32) -> f64 {
        let mut sum = 0.0;
        let mut p2 = p;
        let mut weight = 1.0;
        for _ in 0..depth {
            sum += weight * self.noise(p2);
            weight *= 0.5;
            p2 *= 2.0;
        }
        sum.abs()
    }
}

fn generate_perm(rng: &mut StdRng) -> Vec<usize> {
    let mut p: Vec<usize> = (0..POINT_COUNT).collect();
    for i in (1..POINT_COUNT).rev() {
        let target = (gen_f64(rng) * (i + 1) as f64) as usize;
        p.swap(i, target);
    }
    p
}

/// Trilinear interpolation of the eight corner gradients, with Hermite
/// smoothing of the fractional coordinates.
fn interp(c: &[Vec3; 8], u: f64, v: f64, w: f64) -> f64 {
    let uu = u * u * (3.0 - 2.0 * u);
    let vv = v * v * (3.0 - 2.0 * v);
    let ww = w * w * (3.0 - 2.0 * w);
    let mut sum = 0.0;
    for i in 0..2 {
        for j in 0..2 {
            for k in 0..2 {
                let (fi, fj, fk) = (i as f64, j as f64, k as f64);
                let weight = Vec3::new(u - fi, v - fj, w - fk);
                sum += (fi * uu + (1.0 - fi) * (1.0 - uu))
                    * (fj * vv + (1.0 - fj) * (1.0 - vv))
                    * (fk * ww + (1.0 - fk) * (1.0 - ww))
                    * c[4 * i + 2 * j + k].dot(weight);
            }
        }
    }
    sum
}
