use clap::Parser;
use glam::Vec3A;
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;
use lumenpath::camera::{Camera, CameraOptions};
use lumenpath::output::save_image;
use lumenpath::scene::random_scene;

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.into());

    info!("Lumenpath {}", env!("CARGO_PKG_VERSION"));
    info!(
        "Image resolution: {}x{}, samples per pixel: {}, seed: {}",
        args.width, args.height, args.samples_per_pixel, args.seed
    );

    // Scene population draws from its own seeded stream so the same seed
    // reproduces the same world
    let mut scene_rng = ChaCha8Rng::seed_from_u64(args.seed);
    let world = random_scene(&mut scene_rng);

    let camera = match Camera::new(&CameraOptions {
        image_width: args.width,
        image_height: args.height,
        samples_per_pixel: args.samples_per_pixel,
        max_depth: args.max_depth,
        vfov: 20.0,
        lookfrom: Vec3A::new(1.0, 2.0, 11.0),
        lookat: Vec3A::new(0.0, 1.0, 0.0),
        vup: Vec3A::new(0.0, 1.0, 0.0),
        aperture: 0.1,
        focus_dist: 10.0,
        seed: args.seed,
    }) {
        Ok(camera) => camera,
        Err(e) => {
            log::error!("Invalid camera configuration: {}", e);
            std::process::exit(1);
        }
    };

    let image = camera.render(&world);

    if let Err(e) = save_image(&image, &args.output) {
        log::error!("Failed to save {}: {}", args.output, e);
        std::process::exit(1);
    }
}
