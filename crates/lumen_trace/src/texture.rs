//! Texture mapping: turning a surface coordinate into a color.

use std::path::Path;

use image::RgbImage;
use lumen_math::{Color, Point2, Vec3};

use crate::error::RenderError;
use crate::perlin::Perlin;

/// Maps a (u, v) coordinate at 3D point `p` to a color.
///
/// Materials only call this function; how the color is produced
/// (constant, procedural, image lookup) is opaque to them.
pub trait Texture: Send + Sync {
    fn map(&self, uv: Point2, p: Vec3) -> Color;
}

/// A single uniform color.
pub struct Solid {
    color: Color,
}

impl Solid {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(Color::new(r, g, b))
    }
}

impl Texture for Solid {
    fn map(&self, _uv: Point2, _p: Vec3) -> Color {
        self.color
    }
}

/// Alternating checkered pattern of two sub-textures in `size` squares.
pub struct Checker {
    size: f64,
    odd: Box<dyn Texture>,
    even: Box<dyn Texture>,
}

impl Checker {
    pub fn new(size: f64, odd: Box<dyn Texture>, even: Box<dyn Texture>) -> Self {
        Self { size, odd, even }
    }
}

impl Texture for Checker {
    fn map(&self, uv: Point2, p: Vec3) -> Color {
        let sines = (self.size * p.x).sin() * (self.size * p.y).sin() * (self.size * p.z).sin();
        if sines < 0.0 {
            self.odd.map(uv, p)
        } else {
            self.even.map(uv, p)
        }
    }
}

/// Scales a child texture by a constant factor; used to overdrive light
/// emission beyond 1.
pub struct Bright {
    src: Box<dyn Texture>,
    scale: f64,
}

impl Bright {
    pub fn new(src: Box<dyn Texture>, scale: f64) -> Self {
        Self { src, scale }
    }
}

impl Texture for Bright {
    fn map(&self, uv: Point2, p: Vec3) -> Color {
        self.src.map(uv, p) * self.scale
    }
}

/// Marble-like Perlin noise texture.
pub struct Noise {
    scale0: f64,
    scale1: f64,
    axis: usize,
    perlin: Perlin,
}

impl Noise {
    /// `scale0` scales the striping coordinate along `axis`, `scale1`
    /// scales the turbulence distorting it.
    pub fn new(scale0: f64, scale1: f64, axis: usize, perlin: Perlin) -> Self {
        assert!(axis < 3, "noise axis must be 0, 1, or 2");
        Self {
            scale0,
            scale1,
            axis,
            perlin,
        }
    }
}

impl Texture for Noise {
    fn map(&self, _uv: Point2, p: Vec3) -> Color {
        let stripe = self.scale0 * p[self.axis] + 10.0 * self.perlin.turb(p * self.scale1, 7);
        let bright = 0.5 * (1.0 + stripe.sin());
        Color::ONE * bright
    }
}

/// An image-mapped texture, decoded once at load.
pub struct ImageTexture {
    data: RgbImage,
}

impl ImageTexture {
    /// Load a PNG or JPEG from `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let data = image::open(path)?.to_rgb8();
        Ok(Self { data })
    }

    /// Wrap an already-decoded image.
    pub fn new(data: RgbImage) -> Self {
        Self { data }
    }
}

impl Texture for ImageTexture {
    fn map(&self, uv: Point2, _p: Vec3) -> Color {
        let (width, height) = self.data.dimensions();
        // Nearest-neighbor lookup, v flipped so v = 0 is the image bottom.
        let x = ((uv.x * width as f64) as i64).clamp(0, width as i64 - 1) as u32;
        let y = (((1.0 - uv.y) * height as f64) as i64).clamp(0, height as i64 - 1) as u32;
        let pixel = self.data.get_pixel(x, y);
        Color::new(
            pixel.0[0] as f64 / 255.0,
            pixel.0[1] as f64 / 255.0,
            pixel.0[2] as f64 / 255.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_ignores_coordinates() {
        let tex = Solid::rgb(0.2, 0.4, 0.6);
        assert_eq!(tex.map(Point2::ZERO, Vec3::ZERO), Color::new(0.2, 0.4, 0.6));
        assert_eq!(
            tex.map(Point2::new(0.9, 0.1), Vec3::splat(100.0)),
            Color::new(0.2, 0.4, 0.6)
        );
    }

    #[test]
    fn test_checker_alternates() {
        let tex = Checker::new(
            std::f64::consts::PI,
            Box::new(Solid::rgb(0.0, 0.0, 0.0)),
            Box::new(Solid::rgb(1.0, 1.0, 1.0)),
        );
        // sin(pi * 0.5)^3 > 0 -> even; shifting one cell along x flips the
        // sign.
        let even = tex.map(Point2::ZERO, Vec3::splat(0.5));
        let odd = tex.map(Point2::ZERO, Vec3::new(1.5, 0.5, 0.5));
        assert_eq!(even, Color::ONE);
        assert_eq!(odd, Color::ZERO);
    }

    #[test]
    fn test_bright_scales() {
        let tex = Bright::new(Box::new(Solid::rgb(0.5, 0.5, 0.5)), 4.0);
        assert_eq!(tex.map(Point2::ZERO, Vec3::ZERO), Color::splat(2.0));
    }

    #[test]
    fn test_noise_stays_in_unit_range() {
        let tex = Noise::new(2.0, 1.0, 2, Perlin::new(11));
        for i in 0..200 {
            let p = Vec3::new(i as f64 * 0.17, i as f64 * 0.31, i as f64 * 0.07);
            let c = tex.map(Point2::ZERO, p);
            assert!(c.x >= 0.0 && c.x <= 1.0);
            assert_eq!(c.x, c.y);
            assert_eq!(c.y, c.z);
        }
    }

    #[test]
    fn test_image_texture_lookup() {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        img.put_pixel(1, 0, image::Rgb([0, 255, 0]));
        img.put_pixel(0, 1, image::Rgb([0, 0, 255]));
        img.put_pixel(1, 1, image::Rgb([255, 255, 255]));
        let tex = ImageTexture::new(img);

        // v = 1 maps to the image's top row.
        let top_left = tex.map(Point2::new(0.0, 1.0), Vec3::ZERO);
        assert_eq!(top_left, Color::new(1.0, 0.0, 0.0));
        let bottom_left = tex.map(Point2::new(0.0, 0.0), Vec3::ZERO);
        assert_eq!(bottom_left, Color::new(0.0, 0.0, 1.0));
    }
}
