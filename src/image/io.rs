//! Convenience helpers for loading and saving images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{OwnedImage, Rgb};
use crate::util::{SeamCarveError, SeamCarveResult};
use std::path::Path;

fn io_error(err: image::ImageError) -> SeamCarveError {
    SeamCarveError::ImageIo {
        reason: err.to_string(),
    }
}

/// Creates an owned RGB image from an `image` crate buffer.
pub fn owned_from_rgb_image(img: &image::RgbImage) -> SeamCarveResult<OwnedImage<Rgb>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    OwnedImage::from_rgb_bytes(img.as_raw(), width, height)
}

/// Creates an owned RGB image from a dynamic image, dropping any alpha.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> SeamCarveResult<OwnedImage<Rgb>> {
    owned_from_rgb_image(&img.to_rgb8())
}

/// Loads an image from disk and converts it to RGB.
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> SeamCarveResult<OwnedImage<Rgb>> {
    let img = image::open(path).map_err(io_error)?;
    owned_from_dynamic_image(&img)
}

/// Converts an owned RGB image into an `image` crate buffer.
pub fn to_rgb_image(img: &OwnedImage<Rgb>) -> SeamCarveResult<image::RgbImage> {
    let (width, height) = (img.width(), img.height());
    image::RgbImage::from_raw(width as u32, height as u32, img.to_rgb_bytes())
        .ok_or(SeamCarveError::InvalidDimensions { width, height })
}

/// Saves an RGB image; the format is chosen from the file extension.
pub fn save_rgb_image<P: AsRef<Path>>(img: &OwnedImage<Rgb>, path: P) -> SeamCarveResult<()> {
    to_rgb_image(img)?.save(path).map_err(io_error)
}

/// Saves an 8-bit grayscale image such as a gradient-magnitude preview.
pub fn save_gray_image<P: AsRef<Path>>(img: &OwnedImage<u8>, path: P) -> SeamCarveResult<()> {
    let (width, height) = (img.width(), img.height());
    let buf = image::GrayImage::from_raw(width as u32, height as u32, img.data().to_vec())
        .ok_or(SeamCarveError::InvalidDimensions { width, height })?;
    buf.save(path).map_err(io_error)
}
