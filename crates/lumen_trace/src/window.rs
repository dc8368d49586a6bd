//! Image window and the concurrent PPM writer.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::mpsc;
use std::time::Instant;

use lumen_math::Color;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::Scope;

use crate::camera::Camera;
use crate::error::RenderError;
use crate::renderer::{radiance, RenderConfig};
use crate::sampling::gen_f64;
use crate::surface::Surface;

/// Per-row seed mixing constant (the 64-bit golden ratio).
const ROW_SEED_MIX: u64 = 0x9E3779B97F4A7C15;

/// A fixed-size image to render into.
pub struct Window {
    width: u32,
    height: u32,
}

impl Window {
    /// Panics if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "window dimensions must be nonzero");
        Self { width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Render `scene` through `camera` and write the image to `out` as
    /// plain-text PPM, top row first.
    ///
    /// Rows render in parallel, each on its own RNG stream derived from
    /// `config.seed`, so the output bytes are identical for a given
    /// seed no matter how the rows get scheduled. Finished rows arrive
    /// out of order and are held back until every earlier row has been
    /// written.
    pub fn write_ppm<W: Write + Send>(
        &self,
        out: &mut W,
        scene: &dyn Surface,
        camera: &Camera,
        config: &RenderConfig,
    ) -> Result<(), RenderError> {
        write!(out, "P3\n{} {}\n255\n", self.width, self.height)?;

        let start = Instant::now();
        log::info!(
            "rendering {}x{} at {} samples per pixel",
            self.width,
            self.height,
            config.samples
        );

        let written: io::Result<()> = rayon::scope(|s: &Scope<'_>| {
            let (tx, rx) = mpsc::channel::<(u32, String)>();
            for row in 0..self.height {
                let tx = tx.clone();
                s.spawn(move |_| {
                    let seed = config.seed ^ (row as u64).wrapping_mul(ROW_SEED_MIX);
                    let mut rng = StdRng::seed_from_u64(seed);
                    let text = self.render_row(row, scene, camera, config, &mut rng);
                    // The receiver only goes away on a write error, in
                    // which case the row is dropped anyway.
                    let _ = tx.send((row, text));
                });
            }
            drop(tx);

            let mut pending = BTreeMap::new();
            let mut cursor = 0u32;
            for (row, text) in rx {
                pending.insert(row, text);
                while let Some(text) = pending.remove(&cursor) {
                    out.write_all(text.as_bytes())?;
                    cursor += 1;
                }
            }
            Ok(())
        });
        written?;

        log::info!("render finished in {:.2?}", start.elapsed());
        Ok(())
    }

    /// Render one image row (0 is the top) into its PPM text.
    fn render_row(
        &self,
        row: u32,
        scene: &dyn Surface,
        camera: &Camera,
        config: &RenderConfig,
        rng: &mut dyn RngCore,
    ) -> String {
        // Image row 0 is the top of the frame; the camera's t axis
        // points up.
        let y = self.height - 1 - row;
        let aspect = self.aspect();
        let mut text = String::with_capacity(self.width as usize * 12);
        for x in 0..self.width {
            let mut color = Color::ZERO;
            for _ in 0..config.samples {
                let s = (x as f64 + gen_f64(rng)) / self.width as f64;
                let t = (y as f64 + gen_f64(rng)) / self.height as f64;
                let ray = camera.ray(s, t, aspect, rng);
                color += radiance(&ray, scene, 0, config, rng);
            }
            color /= config.samples as f64;
            // Gamma 2 before quantizing.
            let gamma = color.powf(0.5);
            let r = (255.0 * gamma.x).min(255.0) as u32;
            let g = (255.0 * gamma.y).min(255.0) as u32;
            let b = (255.0 * gamma.z).min(255.0) as u32;
            text.push_str(&format!("{} {} {}\n", r, g, b));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::Vec3;
    use std::sync::Arc;

    use crate::camera::CameraBuilder;
    use crate::material::Light;
    use crate::renderer::Background;
    use crate::sphere::Sphere;
    use crate::surface::SurfaceList;
    use crate::texture::Solid;

    fn glowing_scene() -> SurfaceList {
        SurfaceList::new(vec![Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -5.0),
            100.0,
            Arc::new(Light::new(Box::new(Solid::rgb(0.25, 0.25, 0.25)))),
        ))])
    }

    fn tiny_config() -> RenderConfig {
        RenderConfig {
            samples: 1,
            background: Background::Black,
            ..Default::default()
        }
    }

    #[test]
    #[should_panic]
    fn test_zero_width_panics() {
        Window::new(0, 10);
    }

    #[test]
    fn test_header_and_row_count() {
        let window = Window::new(4, 3);
        let camera = CameraBuilder::new().build();
        let mut out = Vec::new();
        window
            .write_ppm(&mut out, &glowing_scene(), &camera, &tiny_config())
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("P3"));
        assert_eq!(lines.next(), Some("4 3"));
        assert_eq!(lines.next(), Some("255"));
        assert_eq!(lines.count(), 12);
    }

    #[test]
    fn test_enclosing_light_fills_frame() {
        // Every primary ray starts inside the glowing sphere, so every
        // pixel sees emission 0.25; gamma 2 then maps it to exactly 127.
        let window = Window::new(8, 8);
        let camera = CameraBuilder::new().build();
        let scene = SurfaceList::new(vec![Box::new(Sphere::new(
            Vec3::ZERO,
            50.0,
            Arc::new(Light::new(Box::new(Solid::rgb(0.25, 0.25, 0.25)))),
        ))]);
        let mut out = Vec::new();
        window
            .write_ppm(&mut out, &scene, &camera, &tiny_config())
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        for line in text.lines().skip(3) {
            assert_eq!(line, "127 127 127");
        }
    }

    #[test]
    fn test_same_seed_gives_identical_bytes() {
        let window = Window::new(6, 4);
        let camera = CameraBuilder::new().build();
        let scene = glowing_scene();
        let config = tiny_config();
        let mut first = Vec::new();
        let mut second = Vec::new();
        window
            .write_ppm(&mut first, &scene, &camera, &config)
            .unwrap();
        window
            .write_ppm(&mut second, &scene, &camera, &config)
            .unwrap();
        assert_eq!(first, second);
    }
}
