//! Borrowed pixel buffer views
//!
//! [`BitmapRef`] and [`BitmapMut`] wrap caller-owned memory (for example a
//! DIB section or a frame buffer) with its width, height, stride and depth.
//! The layout is validated once at construction; afterwards every pixel
//! access goes through [`BitmapRef::pixel_offset`], which asserts the
//! coordinates against the image size, and slice indexing, which asserts
//! the byte range against the memory.

use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::format::{BitDepth, Bgr24, Bgrx32, PixelFormat};

/// Check that `len` bytes can hold a `width` x `height` image with rows
/// `stride` bytes apart.
pub(crate) fn validate_layout(
    width: u32,
    height: u32,
    stride: usize,
    depth: BitDepth,
    len: usize,
) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    let row_bytes = (width as usize)
        .checked_mul(depth.bytes_per_pixel())
        .ok_or(Error::InvalidDimension { width, height })?;
    if stride < row_bytes {
        return Err(Error::InvalidStride {
            stride,
            width,
            bits: depth.bits(),
        });
    }
    let required = stride
        .checked_mul(height as usize - 1)
        .and_then(|v| v.checked_add(row_bytes))
        .ok_or(Error::InvalidDimension { width, height })?;
    if len < required {
        return Err(Error::BufferTooSmall {
            required,
            actual: len,
        });
    }
    Ok(())
}

#[inline]
fn offset_of(x: u32, y: u32, width: u32, height: u32, stride: usize, depth: BitDepth) -> usize {
    assert!(
        x < width && y < height,
        "pixel ({x}, {y}) out of bounds for {width}x{height} bitmap"
    );
    y as usize * stride + x as usize * depth.bytes_per_pixel()
}

/// Read-only view of a packed RGB buffer
#[derive(Debug, Clone, Copy)]
pub struct BitmapRef<'a> {
    width: u32,
    height: u32,
    stride: usize,
    depth: BitDepth,
    data: &'a [u8],
}

impl<'a> BitmapRef<'a> {
    /// Wrap `data` as a `width` x `height` image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`], [`Error::InvalidStride`] or
    /// [`Error::BufferTooSmall`] if the layout does not fit.
    pub fn new(
        data: &'a [u8],
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

    /// Same as [`BitmapRef::new`] with a raw bit count.
    pub fn from_bits(
        data: &'a [u8],
        width: u32,
        height: u32,
        stride: usize,
        bits: u32,
    ) -> Result<Self> {
        Self::new(data, width, height, stride, BitDepth::from_bits(bits)?)
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

    /// Underlying bytes.
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Byte offset of pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn pixel_offset(&self, x: u32, y: u32) -> usize {
        offset_of(x, y, self.width, self.height, self.stride, self.depth)
    }

    /// Read pixel `(x, y)` through a statically known format.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds. Debug builds also
    /// check that `F` matches the buffer depth.
    #[inline]
    pub fn read<F: PixelFormat>(&self, x: u32, y: u32) -> Rgb {
        debug_assert_eq!(F::DEPTH, self.depth);
        let off = self.pixel_offset(x, y);
        F::read(&self.data[off..off + F::BYTES])
    }

    /// Get the color at `(x, y)`, or `None` if out of bounds.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.get_rgb_unchecked(x, y))
    }

    /// Get the color at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn get_rgb_unchecked(&self, x: u32, y: u32) -> Rgb {
        match self.depth {
            BitDepth::Bit24 => self.read::<Bgr24>(x, y),
            BitDepth::Bit32 => self.read::<Bgrx32>(x, y),
        }
    }
}

/// Read-write view of a packed RGB buffer
#[derive(Debug)]
pub struct BitmapMut<'a> {
    width: u32,
    height: u32,
    stride: usize,
    depth: BitDepth,
    data: &'a mut [u8],
}

impl<'a> BitmapMut<'a> {
    /// Wrap `data` as a writable `width` x `height` image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`], [`Error::InvalidStride`] or
    /// [`Error::BufferTooSmall`] if the layout does not fit.
    pub fn new(
        data: &'a mut [u8],
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

    /// Same as [`BitmapMut::new`] with a raw bit count.
    pub fn from_bits(
        data: &'a mut [u8],
        width: u32,
        height: u32,
        stride: usize,
        bits: u32,
    ) -> Result<Self> {
        Self::new(data, width, height, stride, BitDepth::from_bits(bits)?)
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

    /// Read-only view of the same pixels.
    pub fn as_view(&self) -> BitmapRef<'_> {
        BitmapRef {
            width: self.width,
            height: self.height,
            stride: self.stride,
            depth: self.depth,
            data: &*self.data,
        }
    }

    /// Byte offset of pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn pixel_offset(&self, x: u32, y: u32) -> usize {
        offset_of(x, y, self.width, self.height, self.stride, self.depth)
    }

    /// Read pixel `(x, y)` through a statically known format.
    #[inline]
    pub fn read<F: PixelFormat>(&self, x: u32, y: u32) -> Rgb {
        debug_assert_eq!(F::DEPTH, self.depth);
        let off = self.pixel_offset(x, y);
        F::read(&self.data[off..off + F::BYTES])
    }

    /// Write pixel `(x, y)` through a statically known format.
    ///
    /// Only the color bytes are stored; a reserved byte keeps its value.
    #[inline]
    pub fn write<F: PixelFormat>(&mut self, x: u32, y: u32, color: Rgb) {
        debug_assert_eq!(F::DEPTH, self.depth);
        let off = self.pixel_offset(x, y);
        F::write(&mut self.data[off..off + F::BYTES], color);
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
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.set_rgb_unchecked(x, y, color);
        Ok(())
    }

    /// Set the color at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn set_rgb_unchecked(&mut self, x: u32, y: u32, color: Rgb) {
        match self.depth {
            BitDepth::Bit24 => self.write::<Bgr24>(x, y, color),
            BitDepth::Bit32 => self.write::<Bgrx32>(x, y, color),
        }
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Rgb) {
        for y in 0..self.height {
            for x in 0..self.width {
                self.set_rgb_unchecked(x, y, color);
            }
        }
    }
}
