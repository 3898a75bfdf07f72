//! xformblit Core - Pixel buffer types for affine bitmap compositing
//!
//! This crate provides the fundamental data structures shared by the
//! compositing engine:
//!
//! - [`Rgb`] - A 24-bit color value
//! - [`BitDepth`] / [`PixelFormat`] - The two packed pixel layouts (24 and 32 bpp)
//! - [`BitmapRef`] / [`BitmapMut`] - Borrowed views over caller-owned pixel memory
//! - [`Bitmap`] - An owned pixel buffer
//! - [`Rect`] / [`Bounds`] - Integer rectangles
//!
//! # Memory layout
//!
//! Rows are stored top to bottom, `stride` bytes apart. Within a row each
//! pixel occupies 3 bytes (blue, green, red) or 4 bytes (blue, green, red,
//! reserved). The reserved byte of a 32 bpp pixel is never read or written.

pub mod bitmap;
pub mod color;
pub mod error;
pub mod format;
pub mod rect;

pub use bitmap::{Bitmap, BitmapMut, BitmapRef};
pub use color::Rgb;
pub use error::{Error, Result};
pub use format::{BitDepth, Bgr24, Bgrx32, PixelFormat};
pub use rect::{Bounds, Rect};
