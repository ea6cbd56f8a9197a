//! Sphere primitive for ray tracing.
//!
//! Implements ray-sphere intersection using the optimized quadratic formula.

use glam::Vec3A;

use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::MaterialType;
use crate::ray::Ray;

/// Sphere primitive defined by center, radius, and material.
///
/// Owns its material; the scene owns the sphere. Immutable after
/// construction.
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    pub center: Vec3A,

    /// Radius of the sphere (always non-negative).
    ///
    /// Negative radius values are clamped to 0.0 in the constructor.
    pub radius: f32,

    /// Material properties determining light interaction.
    pub material: MaterialType,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Negative radius values are clamped to 0.0.
    pub fn new(center: Vec3A, radius: f32, material: MaterialType) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        // Vector from ray origin to sphere center
        let oc = self.center - r.origin;

        // Optimized quadratic equation coefficients
        let a = r.direction.length_squared();
        let h = r.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root that lies in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = r.at(root);
        let outward_normal = (p - self.center) / self.radius;
        Some(HitRecord::new(r, root, p, outward_normal, &self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Color;

    fn unit_sphere() -> Sphere {
        Sphere::new(
            Vec3A::new(0.0, 0.0, -3.0),
            1.0,
            MaterialType::Lambertian {
                albedo: Color::new(0.5, 0.5, 0.5),
            },
        )
    }

    #[test]
    fn hit_normal_is_unit_and_radial() {
        let sphere = unit_sphere();
        let r = Ray::new(Vec3A::new(0.3, 0.2, 0.0), Vec3A::new(-0.1, 0.05, -1.0));
        let rec = sphere
            .hit(&r, Interval::new(0.001, f32::INFINITY))
            .expect("ray aimed at the sphere must hit");

        assert!((rec.normal.length() - 1.0).abs() < 1e-4);
        // Radial component at the surface equals the radius
        assert!((rec.normal.dot(rec.p - sphere.center) - sphere.radius).abs() < 1e-3);
        // Hit point lies on the sphere surface
        assert!(((rec.p - sphere.center).length() - sphere.radius).abs() < 1e-3);
    }

    #[test]
    fn nearest_root_is_preferred() {
        let sphere = unit_sphere();
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        let rec = sphere.hit(&r, Interval::new(0.001, f32::INFINITY)).unwrap();

        // Front face at z = -2, not the far side at z = -4
        assert!((rec.t - 2.0).abs() < 1e-4);
        assert!(rec.front_face);
    }

    #[test]
    fn ray_from_inside_takes_far_root() {
        let sphere = unit_sphere();
        let r = Ray::new(sphere.center, Vec3A::new(0.0, 0.0, -1.0));
        let rec = sphere.hit(&r, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert!((rec.t - 1.0).abs() < 1e-4);
        // Back-face hit: stored normal is flipped towards the ray origin
        assert!(!rec.front_face);
        assert!((rec.normal - Vec3A::Z).length() < 1e-4);
    }

    #[test]
    fn miss_and_interval_rejection() {
        let sphere = unit_sphere();

        let miss = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0));
        assert!(sphere
            .hit(&miss, Interval::new(0.001, f32::INFINITY))
            .is_none());

        // Both roots (t = 2 and t = 4) fall outside a short interval
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        assert!(sphere.hit(&r, Interval::new(0.001, 1.5)).is_none());
        // And behind the origin
        assert!(sphere
            .hit(&r, Interval::new(-10.0, -0.001))
            .is_none());
    }
}
