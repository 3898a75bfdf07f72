//! Bitmap - Owned and borrowed pixel buffers
//!
//! The compositing engine never allocates pixel memory during a blit; it
//! works on [`BitmapRef`] / [`BitmapMut`] views over memory owned elsewhere.
//! [`Bitmap`] is a convenience owner for callers (and tests) that have no
//! buffer of their own.
//!
//! # Row layout
//!
//! Rows of an owned `Bitmap` are padded to a multiple of 4 bytes, the same
//! convention as device-independent bitmaps, so a 24 bpp image of odd
//! width has a few unused bytes at the end of each row.

mod access;

pub use access::{BitmapMut, BitmapRef};

use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::format::BitDepth;
use access::validate_layout;

/// Bytes per row for a `width`-pixel row padded to a 32-bit boundary.
pub fn aligned_stride(width: u32, depth: BitDepth) -> usize {
    (width as usize * depth.bits() as usize).div_ceil(32) * 4
}

/// Owned packed RGB image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    stride: usize,
    depth: BitDepth,
    data: Vec<u8>,
}

impl Bitmap {
    /// Create a black bitmap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, depth: BitDepth) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let stride = aligned_stride(width, depth);
        let len = stride
            .checked_mul(height as usize)
            .ok_or(Error::InvalidDimension { width, height })?;
        Ok(Self {
            width,
            height,
            stride,
            depth,
            data: vec![0; len],
        })
    }

    /// Create a bitmap filled with one color.
    pub fn new_solid(width: u32, height: u32, depth: BitDepth, color: Rgb) -> Result<Self> {
        let mut bitmap = Self::new(width, height, depth)?;
        bitmap.fill(color);
        Ok(bitmap)
    }

    /// Take ownership of existing pixel memory.
    ///
    /// # Errors
    ///
    /// Fails if `data` cannot hold the described layout.
    pub fn from_raw(
        data: Vec<u8>,
        width: u32,
        height: u32,
        stride: usize,
        depth: BitDepth,
    ) -> Result<Self> {
        validate_layout(width, height, stride, depth, data.len())?;
        Ok(Self {
            width,
            height,
            stride,
            depth,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn depth(&self) -> BitDepth {
        self.depth
    }

    /// Raw pixel bytes, `stride * height` long.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw pixel bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Give back the pixel memory.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Read-only view for use as a blit source.
    pub fn as_view(&self) -> BitmapRef<'_> {
        // Layout was validated when the bitmap was built
        BitmapRef::new(&self.data, self.width, self.height, self.stride, self.depth)
            .unwrap_or_else(|e| unreachable!("owned bitmap layout: {e}"))
    }

    /// Writable view for use as a blit destination.
    pub fn as_view_mut(&mut self) -> BitmapMut<'_> {
        BitmapMut::new(
            &mut self.data,
            self.width,
            self.height,
            self.stride,
            self.depth,
        )
        .unwrap_or_else(|e| unreachable!("owned bitmap layout: {e}"))
    }

    /// Get the color at `(x, y)`, or `None` if out of bounds.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<Rgb> {
        self.as_view().get_rgb(x, y)
    }

    /// Set the color at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_rgb(&mut self, x: u32, y: u32, color: Rgb) -> Result<()> {
        self.as_view_mut().set_rgb(x, y, color)
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Rgb) {
        self.as_view_mut().fill(color);
    }

    /// Copy into a new bitmap of another depth, pixel by pixel.
    pub fn convert_to(&self, depth: BitDepth) -> Result<Self> {
        let mut out = Self::new(self.width, self.height, depth)?;
        let src = self.as_view();
        let mut dst = out.as_view_mut();
        for y in 0..self.height {
            for x in 0..self.width {
                dst.set_rgb_unchecked(x, y, src.get_rgb_unchecked(x, y));
            }
        }
        Ok(out)
    }

    /// Count the pixels equal to `color`.
    pub fn count_color(&self, color: Rgb) -> usize {
        let view = self.as_view();
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| view.get_rgb_unchecked(x, y) == color)
            .count()
    }
}
