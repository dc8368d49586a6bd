//! lumen - render a built-in scene to a PPM file.

mod scenes;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use lumen_trace::{RenderConfig, Window};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scene {
    /// Closed box with smoke-filled blocks and an area light
    Cornell,
    /// Sphere field under an open sky
    Spheres,
}

#[derive(Parser, Debug)]
#[command(name = "lumen", about = "CPU Monte Carlo path tracer", version)]
struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 600)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 400)]
    height: u32,

    /// Samples per pixel
    #[arg(long, default_value_t = 100)]
    samples: u32,

    /// Which scene to render
    #[arg(long, value_enum, default_value_t = Scene::Spheres)]
    scene: Scene,

    /// Output PPM path
    #[arg(short, long, default_value = "out.ppm")]
    output: PathBuf,

    /// Seed for scene generation and sampling
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Image to wrap around the spheres scene's left showcase sphere
    #[arg(long)]
    texture: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (scene, camera, background) = match args.scene {
        Scene::Cornell => scenes::cornell(),
        Scene::Spheres => scenes::spheres(args.seed, args.texture.as_deref())
            .context("failed to build spheres scene")?,
    };

    let config = RenderConfig {
        samples: args.samples,
        background,
        seed: args.seed,
        ..Default::default()
    };
    let window = Window::new(args.width, args.height);

    let file = File::create(&args.output)
        .with_context(|| format!("cannot create {}", args.output.display()))?;
    let mut out = BufWriter::new(file);
    window
        .write_ppm(&mut out, &scene, &camera, &config)
        .context("render failed")?;
    out.flush().context("flushing output")?;

    log::info!("wrote {}", args.output.display());
    Ok(())
}
