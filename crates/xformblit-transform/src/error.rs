//! Error types for xformblit-transform

use thiserror::Error;

/// Errors that can occur while setting up a transform blit
///
/// Every check happens before the first destination pixel is written, so
/// an error always leaves the destination untouched.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Invalid transformation parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Source rectangle has no pixels
    #[error("empty source rectangle: {width}x{height}")]
    EmptySource { width: i32, height: i32 },

    /// Singular matrix (non-invertible)
    #[error("singular transformation matrix")]
    SingularMatrix,
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
