//! Error types for ggframe.

use thiserror::Error;

/// Result alias for ggframe operations.
pub type FrameResult<T> = std::result::Result<T, FrameError>;

/// Errors that can occur when building frames, rectangles or locating patterns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// A constructor argument broke its documented precondition.
    #[error("precondition violated: {0}")]
    PreconditionViolation(&'static str),
    /// The input data or parameters are invalid.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// No descriptor match survived filtering.
    #[error("no match found: {accepted} of {candidates} candidate matches accepted")]
    NoMatchFound { candidates: usize, accepted: usize },
    /// Frame dimensions cannot be represented.
    #[error("invalid dimensions: {rows}x{cols}x{channels}")]
    InvalidDimensions {
        rows: usize,
        cols: usize,
        channels: usize,
    },
    /// The pixel buffer is shorter than the dimensions require.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A pixel access fell outside the frame.
    #[error("pixel ({row}, {col}, {channel}) out of bounds")]
    OutOfBounds {
        row: usize,
        col: usize,
        channel: usize,
    },
    /// Image decoding or encoding failed.
    #[cfg(feature = "image-io")]
    #[error("image io: {reason}")]
    ImageIo { reason: String },
}
