//! Thin-lens camera with a one-frame shutter window.

use lumen_math::{Ray, Vec3};
use rand::RngCore;

use crate::sampling::{gen_f64, rand_in_disk};

/// Staged camera configuration; call [`CameraBuilder::build`] when done.
pub struct CameraBuilder {
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,
    vfov: f64,
    aperture: f64,
    focus: f64,
    time0: f64,
    time1: f64,
}

impl Default for CameraBuilder {
    fn default() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            vup: Vec3::Y,
            vfov: 45.0,
            aperture: 0.0,
            focus: 10.0,
            time0: 0.0,
            time1: 1.0,
        }
    }
}

impl CameraBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the camera at `look_from`, aimed at `look_at`, with `vup`
    /// defining "up".
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// `vfov` is the vertical field of view in degrees; `aperture` is
    /// the lens diameter, `focus` the distance of the sharp plane.
    pub fn with_lens(mut self, vfov: f64, aperture: f64, focus: f64) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus = focus;
        self
    }

    /// Shutter open/close times; rays get a time drawn uniformly from
    /// this window.
    pub fn with_shutter(mut self, time0: f64, time1: f64) -> Self {
        self.time0 = time0;
        self.time1 = time1;
        self
    }

    pub fn build(self) -> Camera {
        assert!(self.vfov > 0.0 && self.vfov < 180.0, "vfov out of range");
        assert!(self.aperture >= 0.0, "aperture must be non-negative");
        assert!(self.focus > 0.0, "focus distance must be positive");
        assert!(self.time1 >= self.time0, "shutter must close after opening");
        assert!(
            self.look_from != self.look_at,
            "camera cannot look at itself"
        );

        let w = (self.look_from - self.look_at).normalize();
        let u = self.vup.cross(w).normalize();
        let v = w.cross(u);
        let half_h = (self.vfov.to_radians() / 2.0).tan();

        Camera {
            origin: self.look_from,
            u,
            v,
            w,
            half_h,
            lens_radius: self.aperture / 2.0,
            focus: self.focus,
            time0: self.time0,
            time1: self.time1,
        }
    }
}

/// A positioned camera that fires primary rays through the image plane.
pub struct Camera {
    origin: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    half_h: f64,
    lens_radius: f64,
    focus: f64,
    time0: f64,
    time1: f64,
}

impl Camera {
    pub fn builder() -> CameraBuilder {
        CameraBuilder::default()
    }

    /// Ray through the image plane at `(s, t)`, each in `[0, 1)`, with
    /// `(0, 0)` the lower-left corner. `aspect` is width over height.
    ///
    /// The origin is jittered across the lens disk for depth of field,
    /// and the ray time is drawn from the shutter window.
    pub fn ray(&self, s: f64, t: f64, aspect: f64, rng: &mut dyn RngCore) -> Ray {
        let half_w = aspect * self.half_h;
        let lower_left = self.origin
            - self.u * (half_w * self.focus)
            - self.v * (self.half_h * self.focus)
            - self.w * self.focus;
        let horizontal = self.u * (2.0 * half_w * self.focus);
        let vertical = self.v * (2.0 * self.half_h * self.focus);

        let rd = rand_in_disk(rng) * self.lens_radius;
        let offset = self.u * rd.x + self.v * rd.y;
        let time = self.time0 + gen_f64(rng) * (self.time1 - self.time0);
        let origin = self.origin + offset;
        let dir = (lower_left + horizontal * s + vertical * t - origin).normalize();
        Ray::new(origin, dir, time)
    }
}
