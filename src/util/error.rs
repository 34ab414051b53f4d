//! Error types for seamcarve.

use thiserror::Error;

/// Result alias for seamcarve operations.
pub type SeamCarveResult<T> = std::result::Result<T, SeamCarveError>;

/// Errors that can occur while preparing or running a carving session.
///
/// Everything except [`SeamCarveError::InternalInvariant`] is a configuration
/// error raised before any buffer is mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeamCarveError {
    /// Image dimensions are zero or overflow the address space.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer is shorter than the view requires.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Carving needs at least two rows and two columns.
    #[error("image too small to carve: {width}x{height} (minimum 2x2)")]
    ImageTooSmall { width: usize, height: usize },
    /// Seam insertion is not supported, so targets cannot exceed the input.
    #[error("cannot upscale {width}x{height} to {target_width}x{target_height}")]
    UpscaleUnsupported {
        width: usize,
        height: usize,
        target_width: usize,
        target_height: usize,
    },
    /// More vertical seams were requested than half the input width.
    #[error("too many vertical seams: requested {requested}, at most {max}")]
    TooManyVerticalSeams { requested: usize, max: usize },
    /// More horizontal seams were requested than the input height allows.
    #[error("too many horizontal seams: requested {requested}, at most {max}")]
    TooManyHorizontalSeams { requested: usize, max: usize },
    /// Grayscale weights must have a positive sum.
    #[error("invalid grayscale weights: {reason}")]
    InvalidWeights { reason: &'static str },
    /// A carving invariant was broken; indicates a defect, not bad input.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(&'static str),
    /// Image decoding or encoding failed.
    #[error("image i/o failed: {reason}")]
    ImageIo { reason: String },
}
