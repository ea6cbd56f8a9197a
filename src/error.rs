//! Error types for camera configuration and image output.

use thiserror::Error;

/// Errors from validating a camera configuration.
///
/// Construction fails fast on geometrically degenerate setups instead of
/// silently producing a broken basis.
#[derive(Error, Debug)]
pub enum CameraError {
    /// Image width or height is zero.
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    InvalidResolution {
        /// Requested image width in pixels.
        width: u32,
        /// Requested image height in pixels.
        height: u32,
    },

    /// Vertical field of view outside (0, 180) degrees.
    #[error("vertical field of view must lie in (0, 180) degrees, got {0}")]
    InvalidFov(f32),

    /// Samples per pixel is zero.
    #[error("samples per pixel must be at least 1")]
    NoSamples,

    /// Negative lens aperture.
    #[error("aperture must be non-negative, got {0}")]
    InvalidAperture(f32),

    /// Non-positive focus distance.
    #[error("focus distance must be positive, got {0}")]
    InvalidFocusDistance(f32),

    /// Look-from and look-at coincide, or the up hint is parallel to the
    /// view direction: no orthonormal basis exists.
    #[error("degenerate camera basis: {0}")]
    DegenerateBasis(&'static str),
}

/// Errors from writing a rendered image to disk.
#[derive(Error, Debug)]
pub enum OutputError {
    /// Filesystem-level failure while writing.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// PNG encoding failure.
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),

    /// EXR encoding failure.
    #[error("exr encoding error: {0}")]
    Exr(#[from] exr::error::Error),

    /// Output path has an extension no writer handles.
    #[error("unsupported output format '{0}' (expected .ppm, .png or .exr)")]
    UnsupportedFormat(String),
}
