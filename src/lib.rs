//! Lumenpath path tracer
//!
//! CPU Monte Carlo path tracing over sphere scenes with Lambertian, metal
//! and dielectric materials, a thin-lens camera, and PPM/PNG/EXR output.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod error;
pub mod hittable;
pub mod interval;
pub mod material;
pub mod output;
pub mod random;
pub mod ray;
pub mod scene;
pub mod sphere;
