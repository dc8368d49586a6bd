//! Built-in demo scenes.

use std::path::Path;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lumen_math::{Color, Vec3};
use lumen_trace::{
    Background, Bright, Bvh, Camera, CameraBuilder, Checker, Cuboid, Dielectric, Flip,
    ImageTexture, Isotropic, Lambert, Light, Metal, Noise, Perlin, Rect, RenderError, RotateY,
    Solid, Sphere, Surface, Translate, Volume,
};

/// Closed box with two smoke-filled blocks under a bright area light.
pub fn cornell() -> (Bvh, Camera, Background) {
    let red = Arc::new(Lambert::solid(Color::new(0.65, 0.05, 0.05)));
    let white = Arc::new(Lambert::solid(Color::splat(0.73)));
    let green = Arc::new(Lambert::solid(Color::new(0.12, 0.45, 0.15)));
    let lamp = Arc::new(Light::new(Box::new(Bright::new(
        Box::new(Solid::rgb(1.0, 1.0, 1.0)),
        7.0,
    ))));

    let mut surfaces: Vec<Box<dyn Surface>> = Vec::new();
    // Walls; faces with a +axis normal pointing out of the box get
    // flipped inward.
    surfaces.push(Box::new(Flip::new(Box::new(Rect::new(
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(555.0, 555.0, 555.0),
        green,
    )))));
    surfaces.push(Box::new(Rect::new(
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 555.0, 555.0),
        red,
    )));
    surfaces.push(Box::new(Rect::new(
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(555.0, 0.0, 555.0),
        white.clone(),
    )));
    surfaces.push(Box::new(Flip::new(Box::new(Rect::new(
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(555.0, 555.0, 555.0),
        white.clone(),
    )))));
    surfaces.push(Box::new(Flip::new(Box::new(Rect::new(
        Vec3::new(0.0, 0.0, 555.0),
        Vec3::new(555.0, 555.0, 555.0),
        white.clone(),
    )))));
    surfaces.push(Box::new(Flip::new(Box::new(Rect::new(
        Vec3::new(113.0, 554.0, 127.0),
        Vec3::new(443.0, 554.0, 432.0),
        lamp,
    )))));

    let tall = Box::new(Translate::new(
        Box::new(RotateY::new(
            Box::new(Cuboid::new(
                Vec3::ZERO,
                Vec3::new(165.0, 330.0, 165.0),
                white.clone(),
            )),
            15.0,
        )),
        Vec3::new(265.0, 0.0, 295.0),
    ));
    let short = Box::new(Translate::new(
        Box::new(RotateY::new(
            Box::new(Cuboid::new(
                Vec3::ZERO,
                Vec3::new(165.0, 165.0, 165.0),
                white,
            )),
            -18.0,
        )),
        Vec3::new(130.0, 0.0, 65.0),
    ));
    surfaces.push(Box::new(Volume::new(
        tall,
        0.01,
        Arc::new(Isotropic::solid(Color::ZERO)),
    )));
    surfaces.push(Box::new(Volume::new(
        short,
        0.01,
        Arc::new(Isotropic::solid(Color::ONE)),
    )));

    let camera = CameraBuilder::new()
        .with_position(
            Vec3::new(278.0, 278.0, -800.0),
            Vec3::new(278.0, 278.0, 0.0),
            Vec3::Y,
        )
        .with_lens(40.0, 0.0, 10.0)
        .build();

    (Bvh::new(surfaces, 0.0, 1.0), camera, Background::Black)
}

/// Field of random small spheres around three showcase ones, under an
/// open sky. The left showcase sphere is marble unless `globe` names an
/// image to wrap around it.
pub fn spheres(seed: u64, globe: Option<&Path>) -> Result<(Bvh, Camera, Background), RenderError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut surfaces: Vec<Box<dyn Surface>> = Vec::new();

    let ground = Arc::new(Lambert::new(Box::new(Checker::new(
        10.0,
        Box::new(Solid::rgb(0.2, 0.3, 0.1)),
        Box::new(Solid::rgb(0.9, 0.9, 0.9)),
    ))));
    surfaces.push(Box::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        ground,
    )));

    for a in -11..11 {
        for b in -11..11 {
            let center = Vec3::new(
                a as f64 + 0.9 * rng.gen::<f64>(),
                0.2,
                b as f64 + 0.9 * rng.gen::<f64>(),
            );
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }
            let choice: f64 = rng.gen();
            if choice < 0.8 {
                let color = Color::new(
                    rng.gen::<f64>() * rng.gen::<f64>(),
                    rng.gen::<f64>() * rng.gen::<f64>(),
                    rng.gen::<f64>() * rng.gen::<f64>(),
                );
                let drift = center + Vec3::new(0.0, 0.5 * rng.gen::<f64>(), 0.0);
                surfaces.push(Box::new(Sphere::moving(
                    center,
                    drift,
                    0.0,
                    1.0,
                    0.2,
                    Arc::new(Lambert::solid(color)),
                )));
            } else if choice < 0.95 {
                let color = Color::new(
                    0.5 * (1.0 + rng.gen::<f64>()),
                    0.5 * (1.0 + rng.gen::<f64>()),
                    0.5 * (1.0 + rng.gen::<f64>()),
                );
                let fuzz = 0.5 * rng.gen::<f64>();
                surfaces.push(Box::new(Sphere::new(
                    center,
                    0.2,
                    Arc::new(Metal::solid(color, fuzz)),
                )));
            } else {
                surfaces.push(Box::new(Sphere::new(
                    center,
                    0.2,
                    Arc::new(Dielectric::new(1.5)),
                )));
            }
        }
    }

    surfaces.push(Box::new(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Dielectric::new(1.5)),
    )));
    let left: Arc<dyn lumen_trace::Material> = match globe {
        Some(path) => Arc::new(Lambert::new(Box::new(ImageTexture::open(path)?))),
        None => Arc::new(Lambert::new(Box::new(Noise::new(
            5.0,
            1.0,
            2,
            Perlin::new(seed),
        )))),
    };
    surfaces.push(Box::new(Sphere::new(Vec3::new(-4.0, 1.0, 0.0), 1.0, left)));
    surfaces.push(Box::new(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::solid(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    let camera = CameraBuilder::new()
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.1, 10.0)
        .build();

    Ok((Bvh::new(surfaces, 0.0, 1.0), camera, Background::Sky))
}
