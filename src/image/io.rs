//! Loading helpers built on the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Everything is converted
//! to 8-bit grayscale on the way in; the matcher never sees color.

use crate::image::ImageBuffer;
use crate::util::{RukuliError, RukuliResult};
use std::path::Path;

/// Converts a decoded grayscale image into an owned frame.
pub fn buffer_from_gray_image(img: &image::GrayImage) -> RukuliResult<ImageBuffer> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    ImageBuffer::new(img.as_raw().clone(), width, height)
}

/// Converts any decoded image into an owned grayscale frame.
pub fn buffer_from_dynamic_image(img: &image::DynamicImage) -> RukuliResult<ImageBuffer> {
    buffer_from_gray_image(&img.to_luma8())
}

/// Loads an image from disk and converts it to a grayscale frame.
///
/// A missing, unreadable, or undecodable path maps to
/// [`RukuliError::ImageIo`].
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> RukuliResult<ImageBuffer> {
    let img = image::open(path).map_err(|err| RukuliError::ImageIo {
        reason: err.to_string(),
    })?;
    buffer_from_dynamic_image(&img)
}
