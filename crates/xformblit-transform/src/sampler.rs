//! Area-average sampling
//!
//! Computes the mean color of a rectangular block of source pixels. The
//! blit uses it when shrinking, where each destination pixel covers
//! several source pixels and reading single pixels would alias.
//!
//! The block is given by one corner and a signed extent, so the four
//! blocks around a sample point are all expressed from the same corner:
//!
//! ```text
//!   (x-n, y-n) +-------+-------+
//!              |  -,-  |  +,-  |
//!              +-------X-------+      X = (x, y)
//!              |  -,+  |  +,+  |
//!              +-------+-------+ (x+n, y+n)
//! ```

use xformblit_core::{BitDepth, Bgr24, Bgrx32, BitmapRef, PixelFormat, Rgb};

/// A color key together with the color that replaces it while averaging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySubstitute {
    /// Pixels of this color are treated as transparent
    pub key: Rgb,
    /// Color accumulated in place of a keyed pixel
    pub substitute: Rgb,
}

impl KeySubstitute {
    pub const fn new(key: Rgb, substitute: Rgb) -> Self {
        Self { key, substitute }
    }
}

/// Normalize one axis of a block to `[from, to)` within `[0, size)`.
///
/// Negative extents are swapped into place. A block with no overlap
/// collapses to the one-pixel strip at the nearest edge.
#[inline]
fn clamp_span(start: i32, extent: i32, size: u32) -> (u32, u32) {
    let size = i32::try_from(size).unwrap_or(i32::MAX);
    let end = start.saturating_add(extent);
    let (from, to) = if end < start {
        (end, start)
    } else {
        (start, end)
    };
    let from = from.clamp(0, size - 1);
    let to = to.clamp(0, size);
    let to = if to <= from { from + 1 } else { to };
    (from as u32, to as u32)
}

/// Mean color of a block through a statically known source format.
pub(crate) fn average_color_as<F: PixelFormat>(
    src: &BitmapRef<'_>,
    x: i32,
    y: i32,
    dw: i32,
    dh: i32,
    key: Option<KeySubstitute>,
) -> (Rgb, u64) {
    let (x_from, x_to) = clamp_span(x, dw, src.width());
    let (y_from, y_to) = clamp_span(y, dh, src.height());

    // Sums of more than 2^24 pixels exceed u32
    let mut count = 0u64;
    let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
    for sy in y_from..y_to {
        for sx in x_from..x_to {
            let mut c = src.read::<F>(sx, sy);
            if let Some(ks) = key
                && c == ks.key
            {
                c = ks.substitute;
            }
            r += u64::from(c.r);
            g += u64::from(c.g);
            b += u64::from(c.b);
            count += 1;
        }
    }
    debug_assert!(count > 0);

    let mean = Rgb::new((r / count) as u8, (g / count) as u8, (b / count) as u8);
    (mean, count)
}

/// Mean color of the block spanned by `(x, y)` and `(x + dw, y + dh)`.
///
/// The block is half-open (the far corner is excluded) and may extend in
/// either direction. It is clamped to the bitmap; when it misses the bitmap
/// entirely the nearest edge row or column is used instead, so at least
/// one pixel is always visited.
///
/// When `key` is given, pixels equal to `key.key` add `key.substitute`
/// to the mean instead of their own color.
///
/// Returns the per-channel mean (truncated) and the number of pixels
/// visited.
pub fn average_color(
    src: &BitmapRef<'_>,
    x: i32,
    y: i32,
    dw: i32,
    dh: i32,
    key: Option<KeySubstitute>,
) -> (Rgb, u64) {
    match src.depth() {
        BitDepth::Bit24 => average_color_as::<Bgr24>(src, x, y, dw, dh, key),
        BitDepth::Bit32 => average_color_as::<Bgrx32>(src, x, y, dw, dh, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xformblit_core::Bitmap;

    /// 4x4 image with pixel (x, y) = (10x, 10y, 7)
    fn ramp(depth: BitDepth) -> Bitmap {
        let mut bmp = Bitmap::new(4, 4, depth).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                bmp.set_rgb(x, y, Rgb::new(10 * x as u8, 10 * y as u8, 7))
                    .unwrap();
            }
        }
        bmp
    }

    #[test]
    fn test_clamp_span() {
        assert_eq!(clamp_span(1, 2, 4), (1, 3));
        assert_eq!(clamp_span(3, -2, 4), (1, 3));
        assert_eq!(clamp_span(-5, 3, 4), (0, 1));
        assert_eq!(clamp_span(9, 3, 4), (3, 4));
        assert_eq!(clamp_span(2, 10, 4), (2, 4));
        assert_eq!(clamp_span(2, 0, 4), (2, 3));
    }

    #[test]
    fn test_average_forward_block() {
        let bmp = ramp(BitDepth::Bit24);
        let (c, n) = average_color(&bmp.as_view(), 0, 0, 2, 2, None);
        assert_eq!(n, 4);
        assert_eq!(c, Rgb::new(5, 5, 7));
    }

    #[test]
    fn test_average_negative_extent() {
        let bmp = ramp(BitDepth::Bit32);
        // Covers x in [1, 3), y in [2, 4)
        let (c, n) = average_color(&bmp.as_view(), 3, 4, -2, -2, None);
        assert_eq!(n, 4);
        assert_eq!(c, Rgb::new(15, 25, 7));
    }

    #[test]
    fn test_average_outside_uses_edge() {
        let bmp = ramp(BitDepth::Bit24);
        let (c, n) = average_color(&bmp.as_view(), -10, -10, -3, -3, None);
        assert_eq!(n, 1);
        assert_eq!(c, Rgb::new(0, 0, 7));

        let (c, n) = average_color(&bmp.as_view(), 20, 1, 5, 1, None);
        assert_eq!(n, 1);
        assert_eq!(c, Rgb::new(30, 10, 7));
    }

    #[test]
    fn test_average_truncates() {
        let mut bmp = Bitmap::new(2, 1, BitDepth::Bit24).unwrap();
        bmp.set_rgb(0, 0, Rgb::new(0, 1, 255)).unwrap();
        bmp.set_rgb(1, 0, Rgb::new(1, 2, 254)).unwrap();
        let (c, n) = average_color(&bmp.as_view(), 0, 0, 2, 1, None);
        assert_eq!(n, 2);
        assert_eq!(c, Rgb::new(0, 1, 254));
    }

    #[test]
    fn test_average_substitutes_key() {
        let key = Rgb::new(255, 0, 255);
        let mut bmp = Bitmap::new_solid(2, 2, BitDepth::Bit24, Rgb::new(100, 100, 100)).unwrap();
        bmp.set_rgb(0, 0, key).unwrap();
        bmp.set_rgb(1, 1, key).unwrap();

        let ks = KeySubstitute::new(key, Rgb::new(0, 0, 0));
        let (c, n) = average_color(&bmp.as_view(), 0, 0, 2, 2, Some(ks));
        assert_eq!(n, 4);
        assert_eq!(c, Rgb::new(50, 50, 50));
    }
}
