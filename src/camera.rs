//! Camera for ray generation and scene rendering.

use glam::Vec3A;
use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::error::CameraError;
use crate::hittable::Hittable;
use crate::interval::Interval;
use crate::material::Color;
use crate::random;
use crate::ray::Ray;

/// Camera and render configuration supplied once before rendering.
#[derive(Debug, Clone)]
pub struct CameraOptions {
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Rendered image height in pixel count
    pub image_height: u32,
    /// Number of random samples for each pixel (for anti-aliasing)
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces
    pub max_depth: u32,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Point camera is looking from (camera position)
    pub lookfrom: Vec3A,
    /// Point camera is looking at (look target)
    pub lookat: Vec3A,
    /// Camera-relative "up" direction hint
    pub vup: Vec3A,
    /// Lens aperture diameter (0 for a pinhole camera)
    pub aperture: f32,
    /// Distance from lookfrom to the plane of perfect focus
    pub focus_dist: f32,
    /// Base seed for the per-pixel random streams
    pub seed: u64,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            image_width: 100,
            image_height: 100,
            samples_per_pixel: 50,
            max_depth: 50,
            vfov: 90.0,
            lookfrom: Vec3A::new(0.0, 0.0, 0.0),
            lookat: Vec3A::new(0.0, 0.0, -1.0),
            vup: Vec3A::new(0.0, 1.0, 0.0),
            aperture: 0.0,
            focus_dist: 10.0,
            seed: 0,
        }
    }
}

/// Thin-lens camera with a precomputed viewport, plus the render loop.
///
/// Built once from validated [`CameraOptions`] and immutable thereafter,
/// so rendering threads share it freely.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Rendered image height in pixel count
    pub image_height: u32,
    /// Number of random samples for each pixel
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces before a path is absorbed
    pub max_depth: u32,
    /// Base seed for the per-pixel random streams
    pub seed: u64,

    /// Camera position in world space
    origin: Vec3A,
    /// World position of the viewport's lower-left corner on the focus plane
    lower_left_corner: Vec3A,
    /// Full-width viewport vector along camera right
    horizontal: Vec3A,
    /// Full-height viewport vector along camera up
    vertical: Vec3A,
    /// Camera frame basis vector pointing right
    u: Vec3A,
    /// Camera frame basis vector pointing up
    v: Vec3A,
    /// Camera frame basis vector pointing opposite the view direction
    w: Vec3A,
    /// Thin-lens radius (half the aperture)
    lens_radius: f32,
    /// Color scale factor for a sum of pixel samples
    pixel_samples_scale: f32,
}

impl Camera {
    /// Build a camera from configuration, validating the geometry.
    ///
    /// Fails on zero image dimensions, a field of view outside (0, 180)
    /// degrees, a negative aperture, a non-positive focus distance, or an
    /// up hint that cannot span a basis with the view direction.
    pub fn new(options: &CameraOptions) -> Result<Self, CameraError> {
        if options.image_width == 0 || options.image_height == 0 {
            return Err(CameraError::InvalidResolution {
                width: options.image_width,
                height: options.image_height,
            });
        }
        if options.samples_per_pixel == 0 {
            return Err(CameraError::NoSamples);
        }
        if !(options.vfov > 0.0 && options.vfov < 180.0) {
            return Err(CameraError::InvalidFov(options.vfov));
        }
        if !(options.aperture >= 0.0) {
            return Err(CameraError::InvalidAperture(options.aperture));
        }
        if !(options.focus_dist > 0.0) {
            return Err(CameraError::InvalidFocusDistance(options.focus_dist));
        }

        let view = options.lookfrom - options.lookat;
        if view.length_squared() < 1e-12 {
            return Err(CameraError::DegenerateBasis(
                "look-from and look-at coincide",
            ));
        }

        // Orthonormal camera frame: w opposes the view direction, u points
        // right, v points up.
        let w = view.normalize();
        let up_cross_w = options.vup.cross(w);
        if up_cross_w.length_squared() < 1e-12 {
            return Err(CameraError::DegenerateBasis(
                "up hint is parallel to the view direction",
            ));
        }
        let u = up_cross_w.normalize();
        let v = w.cross(u);

        // Viewport extents on the focus plane
        let theta = options.vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let aspect_ratio = options.image_width as f32 / options.image_height as f32;
        let half_width = aspect_ratio * half_height;

        let origin = options.lookfrom;
        let lower_left_corner =
            origin - options.focus_dist * (half_width * u + half_height * v + w);
        let horizontal = 2.0 * half_width * options.focus_dist * u;
        let vertical = 2.0 * half_height * options.focus_dist * v;

        Ok(Self {
            image_width: options.image_width,
            image_height: options.image_height,
            samples_per_pixel: options.samples_per_pixel,
            max_depth: options.max_depth,
            seed: options.seed,
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: options.aperture / 2.0,
            pixel_samples_scale: 1.0 / options.samples_per_pixel as f32,
        })
    }

    /// The camera frame basis vectors (u right, v up, w backwards).
    pub fn basis(&self) -> (Vec3A, Vec3A, Vec3A) {
        (self.u, self.v, self.w)
    }

    /// Generate a ray through normalized viewport coordinates (s, t).
    ///
    /// Both coordinates lie in [0, 1], with (0, 0) the lower-left corner of
    /// the viewport. The ray origin is jittered on the lens disk for
    /// depth-of-field blur and the direction aims at the focus-plane point.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut impl Rng) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random::random_in_unit_disk(rng);
            rd.x * self.u + rd.y * self.v
        } else {
            Vec3A::ZERO
        };

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical
                - self.origin
                - offset,
        )
    }

    /// Renders the scene and returns a linear HDR image buffer.
    ///
    /// Pixels are processed in parallel; each pixel owns a random stream
    /// seeded from the camera seed and the pixel index, so a fixed seed
    /// renders identically regardless of thread scheduling.
    pub fn render(&self, world: &dyn Hittable) -> ImageBuffer<Rgb<f32>, Vec<f32>> {
        let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> =
            ImageBuffer::new(self.image_width, self.image_height);

        info!(
            "Rendering on {} CPU cores...",
            rayon::current_num_threads()
        );
        let generation_start = std::time::Instant::now();
        let pb = ProgressBar::new((self.image_width * self.image_height) as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40} {pos}/{len} ETA: {eta}")
                .unwrap(),
        );

        image.enumerate_pixels_mut().par_bridge().for_each(|(i, j, pixel)| {
            let mut rng = self.pixel_rng(i, j);
            let mut pixel_color = Color::ZERO;

            // Image row 0 is the top of the picture; viewport t runs bottom-up
            let flipped_j = (self.image_height - 1 - j) as f32;
            for _sample in 0..self.samples_per_pixel {
                let s = (i as f32 + rng.random::<f32>()) / self.image_width as f32;
                let t = (flipped_j + rng.random::<f32>()) / self.image_height as f32;
                let r = self.get_ray(s, t, &mut rng);
                pixel_color += self.ray_color(&r, world, &mut rng);
            }

            pixel_color *= self.pixel_samples_scale;
            *pixel = Rgb([pixel_color.x, pixel_color.y, pixel_color.z]);
            pb.inc(1);
        });

        pb.finish();
        info!("Image generated in {:.2?}", generation_start.elapsed());

        image
    }

    /// The random stream owned by pixel (i, j).
    fn pixel_rng(&self, i: u32, j: u32) -> ChaCha8Rng {
        let index = j as u64 * self.image_width as u64 + i as u64;
        // Spread pixel indices across the seed space so neighboring pixels
        // do not share prefixes of their streams.
        ChaCha8Rng::seed_from_u64(self.seed.wrapping_add(index.wrapping_mul(0x9E37_79B9_7F4A_7C15)))
    }

    /// Estimate the radiance carried back along a ray.
    ///
    /// Iterative path loop: each bounce multiplies the accumulated
    /// attenuation and continues with the scattered ray. Terminates black
    /// on material absorption or when the bounce budget is exhausted, and
    /// returns the attenuated sky gradient on a miss.
    pub fn ray_color(&self, r: &Ray, world: &dyn Hittable, rng: &mut impl Rng) -> Color {
        let mut attenuation = Color::ONE;
        let mut ray = *r;

        for _depth in 0..self.max_depth {
            match world.hit(&ray, Interval::new(0.001, f32::INFINITY)) {
                Some(rec) => match rec.material.scatter(&ray, &rec, rng) {
                    Some((color, scattered)) => {
                        attenuation *= color;
                        ray = scattered;
                    }
                    // Absorbed by the surface
                    None => return Color::ZERO,
                },
                None => {
                    // Sky gradient: blend white to light blue on the ray's
                    // vertical direction. The only light source in the scene.
                    let unit_direction = ray.direction.normalize();
                    let a = 0.5 * (unit_direction.y + 1.0);
                    let sky = (1.0 - a) * Color::new(1.0, 1.0, 1.0) + a * Color::new(0.5, 0.7, 1.0);
                    return attenuation * sky;
                }
            }
        }

        // Bounce budget exhausted: treat the path as absorbed
        Color::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::HittableList;
    use crate::material::MaterialType;
    use crate::sphere::Sphere;

    fn simple_camera() -> Camera {
        Camera::new(&CameraOptions::default()).unwrap()
    }

    #[test]
    fn rejects_degenerate_configurations() {
        let base = CameraOptions::default();

        let opts = CameraOptions {
            image_width: 0,
            ..base.clone()
        };
        assert!(matches!(
            Camera::new(&opts),
            Err(CameraError::InvalidResolution { .. })
        ));

        let opts = CameraOptions {
            vfov: 0.0,
            ..base.clone()
        };
        assert!(matches!(Camera::new(&opts), Err(CameraError::InvalidFov(_))));

        let opts = CameraOptions {
            vup: Vec3A::new(0.0, 0.0, 1.0),
            lookfrom: Vec3A::ZERO,
            lookat: Vec3A::new(0.0, 0.0, -1.0),
            ..base.clone()
        };
        assert!(matches!(
            Camera::new(&opts),
            Err(CameraError::DegenerateBasis(_))
        ));

        let opts = CameraOptions {
            lookat: base.lookfrom,
            ..base.clone()
        };
        assert!(matches!(
            Camera::new(&opts),
            Err(CameraError::DegenerateBasis(_))
        ));

        let opts = CameraOptions {
            aperture: -0.1,
            ..base
        };
        assert!(matches!(
            Camera::new(&opts),
            Err(CameraError::InvalidAperture(_))
        ));
    }

    #[test]
    fn basis_is_orthonormal() {
        let camera = Camera::new(&CameraOptions {
            lookfrom: Vec3A::new(1.0, 2.0, 11.0),
            lookat: Vec3A::new(0.0, 1.0, 0.0),
            ..CameraOptions::default()
        })
        .unwrap();
        let (u, v, w) = camera.basis();

        for b in [u, v, w] {
            assert!((b.length() - 1.0).abs() < 1e-5);
        }
        assert!(u.dot(v).abs() < 1e-5);
        assert!(u.dot(w).abs() < 1e-5);
        assert!(v.dot(w).abs() < 1e-5);
        // w opposes the view direction
        assert!(w.dot(Vec3A::new(0.0, 1.0, 0.0) - Vec3A::new(1.0, 2.0, 11.0)) < 0.0);
    }

    #[test]
    fn center_ray_points_at_the_target() {
        let camera = simple_camera();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        // Pinhole: the viewport center ray heads straight down -z
        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        let dir = ray.direction.normalize();
        assert!((dir - Vec3A::new(0.0, 0.0, -1.0)).length() < 1e-4);
        assert_eq!(ray.origin, Vec3A::ZERO);
    }

    #[test]
    fn sky_gradient_endpoints() {
        let camera = simple_camera();
        let world = HittableList::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let up = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0));
        let color = camera.ray_color(&up, &world, &mut rng);
        assert!((color - Color::new(0.5, 0.7, 1.0)).length() < 1e-5);

        let down = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, -1.0, 0.0));
        let color = camera.ray_color(&down, &world, &mut rng);
        assert!((color - Color::ONE).length() < 1e-5);

        // Halfway: horizontal ray blends the two equally
        let level = Ray::new(Vec3A::ZERO, Vec3A::new(1.0, 0.0, 0.0));
        let color = camera.ray_color(&level, &world, &mut rng);
        assert!((color - Color::new(0.75, 0.85, 1.0)).length() < 1e-5);
    }

    #[test]
    fn exhausted_bounce_budget_is_black() {
        let camera = Camera::new(&CameraOptions {
            max_depth: 0,
            ..CameraOptions::default()
        })
        .unwrap();
        let world = HittableList::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0));
        assert_eq!(camera.ray_color(&r, &world, &mut rng), Color::ZERO);
    }

    #[test]
    fn single_bounce_attenuates_the_sky() {
        // One Lambertian bounce must return a strictly darker, non-black
        // color than the sky it finally reaches.
        let camera = simple_camera();
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(
            Vec3A::new(0.0, -1000.0, 0.0),
            999.0,
            MaterialType::Lambertian {
                albedo: Color::new(0.5, 0.5, 0.5),
            },
        )));
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..50 {
            let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, -1.0, 0.0));
            let color = camera.ray_color(&r, &world, &mut rng);
            assert!(color.max_element() < 1.0);
            assert!(color.min_element() >= 0.0);
        }
    }

    #[test]
    fn fixed_seed_repeats_exactly() {
        let camera = simple_camera();
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(
            Vec3A::new(0.0, 0.0, -3.0),
            1.0,
            MaterialType::Metal {
                albedo: Color::new(0.7, 0.6, 0.5),
                fuzz: 0.3,
            },
        )));

        let mut a = camera.pixel_rng(3, 5);
        let mut b = camera.pixel_rng(3, 5);
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.05, -0.02, -1.0));
        for _ in 0..20 {
            assert_eq!(
                camera.ray_color(&r, &world, &mut a),
                camera.ray_color(&r, &world, &mut b)
            );
        }
    }
}
