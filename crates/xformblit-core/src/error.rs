//! Error types for xformblit-core
//!
//! Buffer descriptors are validated once, when a view or bitmap is
//! constructed. Everything downstream can then index pixels without
//! re-checking the layout.

use thiserror::Error;

/// xformblit-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid bitmap dimensions
    #[error("invalid bitmap dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Invalid pixel depth
    #[error("invalid pixel depth: {0} bpp (expected 24 or 32)")]
    InvalidDepth(u32),

    /// Row stride cannot hold one row of pixels
    #[error("stride of {stride} bytes cannot hold {width} pixels at {bits} bpp")]
    InvalidStride { stride: usize, width: u32, bits: u32 },

    /// Pixel memory shorter than the layout requires
    #[error("buffer too small: {required} bytes required, {actual} available")]
    BufferTooSmall { required: usize, actual: usize },

    /// Pixel coordinates out of bounds
    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} bitmap")]
    IndexOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for xformblit-core operations
pub type Result<T> = std::result::Result<T, Error>;
