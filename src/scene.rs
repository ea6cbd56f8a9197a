//! Scene construction.
//!
//! Populates the classic randomized sphere field: a gray ground sphere, a
//! grid of small floating spheres with mixed materials, a distant
//! star-field backdrop, and three hand-placed feature spheres.

use glam::Vec3A;
use rand::Rng;

use crate::hittable::HittableList;
use crate::material::MaterialType;
use crate::random;
use crate::sphere::Sphere;

/// Half-extent of the random sphere grid (covers -5..5 in x and z).
const GRID_HALF_EXTENT: i32 = 5;

/// Number of background "star" spheres.
const STAR_COUNT: usize = 100;

/// Build the randomized demo scene.
///
/// All randomness is drawn from the supplied stream, so the same seed
/// reproduces the same scene.
pub fn random_scene(rng: &mut impl Rng) -> HittableList {
    let mut world = HittableList::new();

    // Ground sphere
    let ground_material = MaterialType::Lambertian {
        albedo: Vec3A::new(0.5, 0.5, 0.5),
    };
    world.add(Box::new(Sphere::new(
        Vec3A::new(0.0, -1000.0, 0.0),
        1000.0,
        ground_material,
    )));

    // Floating small spheres with random positions, radii and materials
    for a in -GRID_HALF_EXTENT..GRID_HALF_EXTENT {
        for b in -GRID_HALF_EXTENT..GRID_HALF_EXTENT {
            let choose_mat = rng.random::<f32>();
            let center = Vec3A::new(
                a as f32 * rng.random::<f32>(),
                2.0 * rng.random::<f32>() + 0.2,
                b as f32 * rng.random::<f32>(),
            );

            // Keep clear of the rightmost feature sphere
            if (center - Vec3A::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let radius = 0.2 * rng.random::<f32>();
            let sphere_material = if choose_mat < 0.8 {
                // Diffuse
                let albedo = random::random_color(rng) * random::random_color(rng);
                MaterialType::Lambertian { albedo }
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = random::random_color_range(rng, 0.5, 1.0);
                let fuzz = random::random_f32_range(rng, 0.0, 0.5);
                MaterialType::Metal { albedo, fuzz }
            } else {
                // Glass
                MaterialType::Dielectric {
                    refraction_index: 1.5,
                }
            };

            world.add(Box::new(Sphere::new(center, radius, sphere_material)));
        }
    }

    // Distant yellow star spheres behind the scene
    let star_material = MaterialType::Lambertian {
        albedo: Vec3A::new(1.0, 1.0, 0.0),
    };
    for _ in 0..STAR_COUNT {
        let center = Vec3A::new(
            random::random_f32_range(rng, -450.0, 250.0),
            random::random_f32_range(rng, -50.0, 80.0),
            -1000.0,
        );
        world.add(Box::new(Sphere::new(center, 5.0, star_material)));
    }

    // Three hand-placed feature spheres
    world.add(Box::new(Sphere::new(
        Vec3A::new(-2.5, 1.0, 0.0),
        1.0,
        MaterialType::Lambertian {
            albedo: Vec3A::new(0.4, 0.2, 0.7),
        },
    )));
    world.add(Box::new(Sphere::new(
        Vec3A::new(0.0, 1.0, 0.0),
        1.0,
        MaterialType::Dielectric {
            refraction_index: 1.5,
        },
    )));
    world.add(Box::new(Sphere::new(
        Vec3A::new(2.5, 1.0, 0.0),
        1.0,
        MaterialType::Metal {
            albedo: Vec3A::new(0.7, 0.6, 0.5),
            fuzz: 0.0,
        },
    )));

    world
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::Hittable;
    use crate::interval::Interval;
    use crate::ray::Ray;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn scene_is_reproducible_from_a_seed() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        let world_a = random_scene(&mut a);
        let world_b = random_scene(&mut b);
        assert_eq!(world_a.objects.len(), world_b.objects.len());

        // Same geometry: identical hit distances for a probe ray
        let probe = Ray::new(Vec3A::new(1.0, 2.0, 11.0), Vec3A::new(-0.1, -0.1, -1.0));
        let t = Interval::new(0.001, f32::INFINITY);
        let ta = world_a.hit(&probe, t).map(|rec| rec.t);
        let tb = world_b.hit(&probe, t).map(|rec| rec.t);
        assert_eq!(ta, tb);
    }

    #[test]
    fn scene_contains_ground_stars_and_features() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let world = random_scene(&mut rng);
        // Ground + stars + three features, plus however many grid spheres
        // survived the clearance check
        assert!(world.objects.len() >= 1 + STAR_COUNT + 3);

        // Straight down from above the origin always finds the ground
        let down = Ray::new(Vec3A::new(0.0, 5.0, 8.0), Vec3A::new(0.0, -1.0, 0.0));
        assert!(world.hit(&down, Interval::new(0.001, f32::INFINITY)).is_some());
    }
}
