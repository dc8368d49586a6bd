//! Material trait and the five stock materials.

use lumen_math::{Color, Point2, Vec3};
use rand::RngCore;

use crate::sampling::{gen_f64, rand_in_sphere, rand_unit};
use crate::texture::{Solid, Texture};

/// An outgoing scattered direction with its attenuation color.
pub struct Scatter {
    pub dir: Vec3,
    pub attenuation: Color,
}

/// Determines how light scatters and emits when it hits a surface.
///
/// Materials are stateless with respect to the renderer: scattering is a
/// pure function of the incoming direction, the surface normal, the
/// texture coordinate, the hit point, and the caller's RNG.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray, or return `None` if it is absorbed.
    fn scatter(
        &self,
        incoming: Vec3,
        normal: Vec3,
        uv: Point2,
        point: Vec3,
        rng: &mut dyn RngCore,
    ) -> Option<Scatter>;

    /// Light emitted at the given coordinate. Black for non-emitters.
    fn emitted(&self, _uv: Point2, _point: Vec3) -> Color {
        Color::ZERO
    }
}

/// Flat, diffuse material. Rubber and chalk are simple lambertian
/// materials.
pub struct Lambert {
    texture: Box<dyn Texture>,
}

impl Lambert {
    pub fn new(texture: Box<dyn Texture>) -> Self {
        Self { texture }
    }

    /// Lambert with a constant color.
    pub fn solid(color: Color) -> Self {
        Self::new(Box::new(Solid::new(color)))
    }
}

impl Material for Lambert {
    fn scatter(
        &self,
        _incoming: Vec3,
        normal: Vec3,
        uv: Point2,
        point: Vec3,
        rng: &mut dyn RngCore,
    ) -> Option<Scatter> {
        let dir = (normal + rand_in_sphere(rng)).normalize();
        Some(Scatter {
            dir,
            attenuation: self.texture.map(uv, point),
        })
    }
}

/// Reflective material with a roughness in [0, 1]; 0 is a perfect mirror.
pub struct Metal {
    texture: Box<dyn Texture>,
    roughness: f64,
}

impl Metal {
    pub fn new(texture: Box<dyn Texture>, roughness: f64) -> Self {
        Self {
            texture,
            roughness: roughness.clamp(0.0, 1.0),
        }
    }

    /// Metal with a constant color.
    pub fn solid(color: Color, roughness: f64) -> Self {
        Self::new(Box::new(Solid::new(color)), roughness)
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        incoming: Vec3,
        normal: Vec3,
        uv: Point2,
        point: Vec3,
        rng: &mut dyn RngCore,
    ) -> Option<Scatter> {
        let reflected = reflect(incoming, normal);
        let dir = (reflected + rand_in_sphere(rng) * self.roughness).normalize();
        // A perturbed reflection pointing into the surface is absorbed.
        if dir.dot(normal) <= 0.0 {
            return None;
        }
        Some(Scatter {
            dir,
            attenuation: self.texture.map(uv, point),
        })
    }
}

/// Transparent, non-metallic material. Glass, diamond, and water are all
/// dielectrics.
pub struct Dielectric {
    ref_idx: f64,
}

impl Dielectric {
    /// Create a dielectric with the given index of refraction
    /// (1.5 = glass, 2.4 = diamond).
    pub fn new(ref_idx: f64) -> Self {
        Self { ref_idx }
    }
}

impl Material for Dielectric {
    fn scatter(
        &self,
        incoming: Vec3,
        normal: Vec3,
        _uv: Point2,
        _point: Vec3,
        rng: &mut dyn RngCore,
    ) -> Option<Scatter> {
        // Entering or exiting the medium, by the sign of incoming . normal.
        let (out_normal, ratio, cos) = if incoming.dot(normal) > 0.0 {
            (-normal, self.ref_idx, self.ref_idx * incoming.dot(normal))
        } else {
            (normal, 1.0 / self.ref_idx, -incoming.dot(normal))
        };

        // Reflect on total internal reflection, and otherwise with the
        // probability given by the Schlick approximation to Fresnel
        // reflectance.
        let dir = match refract(incoming, out_normal, ratio) {
            Some(refracted) if schlick(cos, self.ref_idx) <= gen_f64(rng) => refracted,
            _ => reflect(incoming, normal),
        };

        Some(Scatter {
            dir,
            // Dielectrics absorb nothing.
            attenuation: Color::ONE,
        })
    }
}

/// Isotropic volumetric material: scatters uniformly in all directions,
/// independent of the incoming direction. The phase function for simple
/// smoke and fog.
pub struct Isotropic {
    texture: Box<dyn Texture>,
}

impl Isotropic {
    pub fn new(texture: Box<dyn Texture>) -> Self {
        Self { texture }
    }

    /// Isotropic with a constant color.
    pub fn solid(color: Color) -> Self {
        Self::new(Box::new(Solid::new(color)))
    }
}

impl Material for Isotropic {
    fn scatter(
        &self,
        _incoming: Vec3,
        _normal: Vec3,
        uv: Point2,
        point: Vec3,
        rng: &mut dyn RngCore,
    ) -> Option<Scatter> {
        Some(Scatter {
            dir: rand_unit(rng),
            attenuation: self.texture.map(uv, point),
        })
    }
}

/// Emitter-only material: never scatters.
pub struct Light {
    texture: Box<dyn Texture>,
}

impl Light {
    pub fn new(texture: Box<dyn Texture>) -> Self {
        Self { texture }
    }

    /// Light with a constant color.
    pub fn solid(color: Color) -> Self {
        Self::new(Box::new(Solid::new(color)))
    }
}

impl Material for Light {
    fn scatter(
        &self,
        _incoming: Vec3,
        _normal: Vec3,
        _uv: Point2,
        _point: Vec3,
        _rng: &mut dyn RngCore,
    ) -> Option<Scatter> {
        None
    }

    fn emitted(&self, uv: Point2, point: Vec3) -> Color {
        self.texture.map(uv, point)
    }
}

/// Reflect `v` about the normal `n`.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - n * (2.0 * v.dot(n))
}

/// Refract unit vector `u` through a surface with normal `n`, or `None`
/// on total internal reflection.
fn refract(u: Vec3, n: Vec3, ratio: f64) -> Option<Vec3> {
    let dt = u.dot(n);
    let disc = 1.0 - ratio * ratio * (1.0 - dt * dt);
    if disc <= 0.0 {
        return None;
    }
    Some(((u - n * dt) * ratio - n * disc.sqrt()).normalize())
}

/// Schlick approximation to Fresnel reflectance.
fn schlick(cos: f64, ref_idx: f64) -> f64 {
    let r0 = ((1.0 - ref_idx) / (1.0 + ref_idx)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cos).powi(5)
}
