//! Random sampling helpers for ray tracing.
//!
//! Every helper draws from an explicit caller-supplied random stream, so
//! rendering tasks can each own a deterministically seeded generator with
//! no shared mutable state.

use glam::Vec3A;
use rand::Rng;

/// Generate a random f32 in [min, max).
pub fn random_f32_range(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    min + (max - min) * rng.random::<f32>()
}

/// Generate a random RGB color with components in [0.0, 1.0).
pub fn random_color(rng: &mut impl Rng) -> Vec3A {
    Vec3A::new(rng.random(), rng.random(), rng.random())
}

/// Generate a random RGB color with components in [min, max).
pub fn random_color_range(rng: &mut impl Rng, min: f32, max: f32) -> Vec3A {
    Vec3A::new(
        random_f32_range(rng, min, max),
        random_f32_range(rng, min, max),
        random_f32_range(rng, min, max),
    )
}

/// Generate a random point inside the unit sphere using rejection sampling
/// over the [-1, 1]^3 cube.
pub fn random_in_unit_sphere(rng: &mut impl Rng) -> Vec3A {
    loop {
        let p = Vec3A::new(
            random_f32_range(rng, -1.0, 1.0),
            random_f32_range(rng, -1.0, 1.0),
            random_f32_range(rng, -1.0, 1.0),
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Generate a random point inside the unit disk (z = 0) using rejection
/// sampling.
pub fn random_in_unit_disk(rng: &mut impl Rng) -> Vec3A {
    loop {
        let p = Vec3A::new(
            random_f32_range(rng, -1.0, 1.0),
            random_f32_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
