//! Image output.
//!
//! Converts the renderer's linear HDR buffer into files on disk:
//! plain-text PPM (the reference format), 8-bit PNG, or linear EXR.
//!
//! The two 8-bit formats share one transfer function: clamp to [0, 1],
//! gamma-2 encode (square root), quantize by 255.99. EXR keeps the raw
//! linear values.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use exr::prelude::write_rgb_file;
use image::{ImageBuffer, Rgb};
use log::info;

use crate::error::OutputError;

/// Gamma-2 encode a linear channel value.
fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Clamp, gamma-encode and quantize one channel to 8 bits.
///
/// Out-of-range values (bright metal highlights) clamp to white rather
/// than wrapping the integer conversion.
fn quantize(linear: f32) -> u8 {
    (255.99 * linear_to_gamma(linear.clamp(0.0, 1.0))) as u8
}

/// Save an image, choosing the writer from the path's extension.
pub fn save_image(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    output_path: &str,
) -> Result<(), OutputError> {
    match Path::new(output_path)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some("ppm") => save_image_as_ppm(image, output_path),
        Some("png") => save_image_as_png(image, output_path),
        Some("exr") => save_image_as_exr(image, output_path),
        _ => Err(OutputError::UnsupportedFormat(output_path.to_string())),
    }
}

/// Save an f32 RGB image as a plain-text PPM (P3) file.
///
/// Rows run image-top to image-bottom, columns left to right, one
/// whitespace-separated RGB triplet per pixel, max value 255.
pub fn save_image_as_ppm(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    output_path: &str,
) -> Result<(), OutputError> {
    let (width, height) = image.dimensions();
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3\n{} {}\n255", width, height)?;
    for pixel in image.pixels() {
        writeln!(
            writer,
            "{} {} {}",
            quantize(pixel[0]),
            quantize(pixel[1]),
            quantize(pixel[2])
        )?;
    }
    writer.flush()?;

    info!("Image saved as {}", output_path);
    Ok(())
}

/// Save an f32 RGB image as an 8-bit PNG with gamma-2 encoding.
pub fn save_image_as_png(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    output_path: &str,
) -> Result<(), OutputError> {
    let (width, height) = image.dimensions();
    let u8_image: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_fn(width, height, |x, y| {
        let pixel = image.get_pixel(x, y);
        Rgb([quantize(pixel[0]), quantize(pixel[1]), quantize(pixel[2])])
    });

    u8_image.save(output_path)?;
    info!("Image saved as {}", output_path);
    Ok(())
}

/// Save an f32 RGB image as EXR, preserving the linear HDR values.
pub fn save_image_as_exr(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    output_path: &str,
) -> Result<(), OutputError> {
    let (width, height) = image.dimensions();
    let pixels = image
        .pixels()
        .map(|rgb| (rgb[0], rgb[1], rgb[2]))
        .collect::<Vec<(f32, f32, f32)>>();

    write_rgb_file(output_path, width as usize, height as usize, |x, y| {
        pixels[y * width as usize + x]
    })?;

    info!("HDR image saved as EXR: {}", output_path);
    Ok(())
}
