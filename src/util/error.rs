//! Error types for rukuli.

use thiserror::Error;

/// Result alias for rukuli operations.
pub type RukuliResult<T> = std::result::Result<T, RukuliError>;

/// Errors that can occur while matching, polling, or driving collaborators.
///
/// Callers are expected to branch on the variant, never on the message:
/// a [`RukuliError::Timeout`] means the retry budget ran out, while
/// [`RukuliError::Capture`] means the environment is broken and retrying
/// would not help.
#[derive(Debug, Error, PartialEq)]
pub enum RukuliError {
    /// An image was described with a zero width or height.
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// A view stride smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// The backing buffer cannot hold the described image.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A requested sub-region does not fit inside the image.
    #[error("roi {width}x{height} at ({x}, {y}) out of bounds for {img_width}x{img_height} image")]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// The template exceeds the screenshot in at least one dimension.
    #[error(
        "template {tpl_width}x{tpl_height} does not fit in {img_width}x{img_height} screenshot"
    )]
    TemplateTooLarge {
        tpl_width: usize,
        tpl_height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// The match threshold must lie in `[0, 1]`.
    #[error("threshold {threshold} is outside [0, 1]")]
    ThresholdOutOfRange { threshold: f32 },
    /// A bounded wait exhausted its deadline without a match.
    #[error("no match within the time budget ({attempts} attempts in {elapsed_ms} ms)")]
    Timeout { attempts: u32, elapsed_ms: u64 },
    /// The screen capture collaborator failed; never retried.
    #[error("screen capture failed: {reason}")]
    Capture { reason: String },
    /// A template image could not be read or decoded.
    #[error("image load failed: {reason}")]
    ImageIo { reason: String },
    /// The input injection collaborator failed.
    #[error("input injection failed: {reason}")]
    Input { reason: String },
    /// A mouse button name that maps to no known button.
    #[error("\"{name}\" is not a valid mouse button")]
    UnknownButton { name: String },
    /// A key name that maps to no known key.
    #[error("\"{name}\" is not a known key name")]
    UnknownKey { name: String },
}
