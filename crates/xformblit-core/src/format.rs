//! Packed pixel formats
//!
//! Two layouts are supported, selected at run time by [`BitDepth`] and at
//! compile time by a [`PixelFormat`] implementor:
//!
//! | depth | type | bytes in memory |
//! |---|---|---|
//! | 24 | [`Bgr24`] | blue, green, red |
//! | 32 | [`Bgrx32`] | blue, green, red, reserved |
//!
//! Both expose the same red/green/blue accessors, so sampling and blending
//! code is written once and instantiated for every format pair.

use crate::color::Rgb;
use crate::error::{Error, Result};

/// Bits per pixel of a packed RGB buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum BitDepth {
    /// 3 bytes per pixel
    Bit24 = 24,
    /// 4 bytes per pixel, 4th byte reserved
    Bit32 = 32,
}

impl BitDepth {
    /// Create a `BitDepth` from a raw bit count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDepth`] if `bits` is not 24 or 32.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            24 => Ok(BitDepth::Bit24),
            32 => Ok(BitDepth::Bit32),
            _ => Err(Error::InvalidDepth(bits)),
        }
    }

    /// Get the number of bits per pixel.
    #[inline]
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Get the number of bytes per pixel.
    #[inline]
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            BitDepth::Bit24 => Bgr24::BYTES,
            BitDepth::Bit32 => Bgrx32::BYTES,
        }
    }
}

/// Uniform access to the color channels of one packed pixel
///
/// `read` and `write` receive a slice starting at the pixel; implementors
/// touch only the three color bytes.
pub trait PixelFormat: Copy + Send + Sync + 'static {
    /// Depth tag matching this layout
    const DEPTH: BitDepth;
    /// Bytes occupied by one pixel
    const BYTES: usize;

    /// Read the color of the pixel at the start of `bytes`.
    fn read(bytes: &[u8]) -> Rgb;

    /// Store `color` into the pixel at the start of `bytes`.
    fn write(bytes: &mut [u8], color: Rgb);
}

/// 24 bpp pixel: blue, green, red
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bgr24;

/// 32 bpp pixel: blue, green, red, reserved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bgrx32;

impl PixelFormat for Bgr24 {
    const DEPTH: BitDepth = BitDepth::Bit24;
    const BYTES: usize = 3;

    #[inline]
    fn read(bytes: &[u8]) -> Rgb {
        Rgb::new(bytes[2], bytes[1], bytes[0])
    }

    #[inline]
    fn write(bytes: &mut [u8], color: Rgb) {
        bytes[0] = color.b;
        bytes[1] = color.g;
        bytes[2] = color.r;
    }
}

impl PixelFormat for Bgrx32 {
    const DEPTH: BitDepth = BitDepth::Bit32;
    const BYTES: usize = 4;

    #[inline]
    fn read(bytes: &[u8]) -> Rgb {
        Rgb::new(bytes[2], bytes[1], bytes[0])
    }

    #[inline]
    fn write(bytes: &mut [u8], color: Rgb) {
        bytes[0] = color.b;
        bytes[1] = color.g;
        bytes[2] = color.r;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bits() {
        assert_eq!(BitDepth::from_bits(24).unwrap(), BitDepth::Bit24);
        assert_eq!(BitDepth::from_bits(32).unwrap(), BitDepth::Bit32);
        assert!(matches!(BitDepth::from_bits(16), Err(Error::InvalidDepth(16))));
        assert!(matches!(BitDepth::from_bits(8), Err(Error::InvalidDepth(8))));
    }

    #[test]
    fn test_bytes_per_pixel() {
        assert_eq!(BitDepth::Bit24.bytes_per_pixel(), 3);
        assert_eq!(BitDepth::Bit32.bytes_per_pixel(), 4);
        assert_eq!(BitDepth::Bit32.bits(), 32);
    }

    #[test]
    fn test_bgr24_byte_order() {
        let mut bytes = [0u8; 3];
        Bgr24::write(&mut bytes, Rgb::new(1, 2, 3));
        assert_eq!(bytes, [3, 2, 1]);
        assert_eq!(Bgr24::read(&bytes), Rgb::new(1, 2, 3));
    }

    #[test]
    fn test_bgrx32_keeps_reserved_byte() {
        let mut bytes = [0u8, 0, 0, 0xAB];
        Bgrx32::write(&mut bytes, Rgb::new(10, 20, 30));
        assert_eq!(bytes, [30, 20, 10, 0xAB]);

        // Reserved byte takes no part in the color
        let other = [30u8, 20, 10, 0x00];
        assert_eq!(Bgrx32::read(&bytes), Bgrx32::read(&other));
    }
}
