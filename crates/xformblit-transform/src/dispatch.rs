//! Checked blit entry points
//!
//! These functions validate their parameters, pick the pixel format pair
//! matching the two bitmaps and run the transform blit.

use crate::affine::{AffineMatrix, SINGULAR_EPSILON};
use crate::blit::{BlitOptions, transform_blit};
use crate::{TransformError, TransformResult};
use xformblit_core::{BitDepth, BitmapMut, BitmapRef, Bgr24, Bgrx32, Rect};

/// Blit `src_rect` of `src` through `matrix` into `dst`.
///
/// The translation of `matrix` is replaced so that the corner
/// `(src_rect.x, src_rect.y)` lands exactly on `(dst_x, dst_y)`. Pixels are
/// sampled from anywhere in `src`; `src_rect` only decides which part of
/// the destination is visited.
///
/// # Errors
///
/// Returns an error, with `dst` untouched, when `src_rect` is empty,
/// `matrix` is non-finite or singular, or a bitmap is too large for `i32`
/// pixel coordinates.
///
/// # Examples
///
/// ```
/// use xformblit_core::{BitDepth, Bitmap, Rect, Rgb};
/// use xformblit_transform::{AffineMatrix, BlitOptions, blit};
///
/// let src = Bitmap::new_solid(4, 4, BitDepth::Bit24, Rgb::new(0, 128, 255)).unwrap();
/// let mut dst = Bitmap::new(16, 16, BitDepth::Bit32).unwrap();
/// blit(
///     &mut dst.as_view_mut(),
///     4,
///     4,
///     &src.as_view(),
///     Rect::new_unchecked(0, 0, 4, 4),
///     &AffineMatrix::scale(2.0, 2.0),
///     &BlitOptions::default(),
/// )
/// .unwrap();
/// assert_eq!(dst.get_rgb(6, 6), Some(Rgb::new(0, 128, 255)));
/// ```
#[tracing::instrument(level = "debug", skip(dst, src, options))]
pub fn blit(
    dst: &mut BitmapMut<'_>,
    dst_x: i32,
    dst_y: i32,
    src: &BitmapRef<'_>,
    src_rect: Rect,
    matrix: &AffineMatrix,
    options: &BlitOptions,
) -> TransformResult<()> {
    if src_rect.is_empty() {
        return Err(TransformError::EmptySource {
            width: src_rect.w,
            height: src_rect.h,
        });
    }
    for (width, height) in [(src.width(), src.height()), (dst.width(), dst.height())] {
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(TransformError::InvalidParameters(format!(
                "bitmap {width}x{height} exceeds the i32 coordinate range"
            )));
        }
    }
    if !matrix.is_finite() {
        return Err(TransformError::InvalidParameters(format!(
            "matrix coefficients must be finite: {matrix:?}"
        )));
    }
    let det = matrix.determinant();
    if det.abs() < SINGULAR_EPSILON || !det.is_finite() {
        return Err(TransformError::SingularMatrix);
    }

    match (src.depth(), dst.depth()) {
        (BitDepth::Bit24, BitDepth::Bit24) => {
            transform_blit::<Bgr24, Bgr24>(dst, dst_x, dst_y, src, &src_rect, matrix, options)
        }
        (BitDepth::Bit32, BitDepth::Bit32) => {
            transform_blit::<Bgrx32, Bgrx32>(dst, dst_x, dst_y, src, &src_rect, matrix, options)
        }
        (BitDepth::Bit32, BitDepth::Bit24) => {
            transform_blit::<Bgrx32, Bgr24>(dst, dst_x, dst_y, src, &src_rect, matrix, options)
        }
        (BitDepth::Bit24, BitDepth::Bit32) => {
            transform_blit::<Bgr24, Bgrx32>(dst, dst_x, dst_y, src, &src_rect, matrix, options)
        }
    }
    Ok(())
}

/// Scale all of `src` into the `dst_w` x `dst_h` rectangle at
/// `(dst_x, dst_y)`.
///
/// With `invert_y` the source is drawn upside down into the same
/// rectangle, as needed for bottom-up pixel memory.
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameters`] if the destination size is
/// not positive.
#[allow(clippy::too_many_arguments)]
#[tracing::instrument(level = "debug", skip(dst, src, options))]
pub fn stretch_blit(
    dst: &mut BitmapMut<'_>,
    dst_x: i32,
    dst_y: i32,
    dst_w: i32,
    dst_h: i32,
    src: &BitmapRef<'_>,
    options: &BlitOptions,
    invert_y: bool,
) -> TransformResult<()> {
    if dst_w <= 0 || dst_h <= 0 {
        return Err(TransformError::InvalidParameters(format!(
            "destination size must be positive: {dst_w}x{dst_h}"
        )));
    }
    let src_rect = Rect::new_unchecked(0, 0, src.width() as i32, src.height() as i32);

    let sx = f64::from(dst_w) / f64::from(src_rect.w);
    let mut sy = f64::from(dst_h) / f64::from(src_rect.h);
    let mut dst_y = dst_y;
    if invert_y {
        sy = -sy;
        dst_y += dst_h;
    }

    blit(
        dst,
        dst_x,
        dst_y,
        src,
        src_rect,
        &AffineMatrix::scale(sx, sy),
        options,
    )
}

/// Draw all of `src` rotated by `angle_deg` about its top-left corner,
/// which is placed at `(x, y)`.
///
/// Positive angles turn clockwise on screen.
#[tracing::instrument(level = "debug", skip(dst, src, options))]
pub fn draw_rotated(
    dst: &mut BitmapMut<'_>,
    x: i32,
    y: i32,
    src: &BitmapRef<'_>,
    angle_deg: f64,
    options: &BlitOptions,
) -> TransformResult<()> {
    let src_rect = Rect::new_unchecked(0, 0, src.width() as i32, src.height() as i32);
    blit(
        dst,
        x,
        y,
        src,
        src_rect,
        &AffineMatrix::rotation_degrees(angle_deg),
        options,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use xformblit_core::{Bitmap, Rgb};

    fn checker(depth: BitDepth) -> Bitmap {
        let mut bmp = Bitmap::new(6, 5, depth).unwrap();
        for y in 0..5 {
            for x in 0..6 {
                let c = if (x + y) % 2 == 0 {
                    Rgb::new(250, 10, 40)
                } else {
                    Rgb::new(5, 200, 90)
                };
                bmp.set_rgb(x, y, c).unwrap();
            }
        }
        bmp
    }

    #[test]
    fn test_blit_rejects_empty_source() {
        let src = checker(BitDepth::Bit24);
        let mut dst = Bitmap::new(8, 8, BitDepth::Bit24).unwrap();
        let result = blit(
            &mut dst.as_view_mut(),
            0,
            0,
            &src.as_view(),
            Rect::new_unchecked(0, 0, 0, 3),
            &AffineMatrix::identity(),
            &BlitOptions::default(),
        );
        assert!(matches!(
            result,
            Err(TransformError::EmptySource {
                width: 0,
                height: 3
            })
        ));
    }

    #[test]
    fn test_blit_rejects_bad_matrix() {
        let src = checker(BitDepth::Bit24);
        let mut dst = Bitmap::new_solid(8, 8, BitDepth::Bit24, Rgb::WHITE).unwrap();
        let before = dst.clone();
        let rect = Rect::new_unchecked(0, 0, 6, 5);

        let singular = AffineMatrix::new(1.0, 2.0, 0.5, 1.0, 0.0, 0.0);
        let result = blit(
            &mut dst.as_view_mut(),
            0,
            0,
            &src.as_view(),
            rect,
            &singular,
            &BlitOptions::default(),
        );
        assert!(matches!(result, Err(TransformError::SingularMatrix)));

        let nan = AffineMatrix::new(f64::NAN, 0.0, 0.0, 1.0, 0.0, 0.0);
        let result = blit(
            &mut dst.as_view_mut(),
            0,
            0,
            &src.as_view(),
            rect,
            &nan,
            &BlitOptions::default(),
        );
        assert!(matches!(result, Err(TransformError::InvalidParameters(_))));
        assert_eq!(dst, before);
    }

    #[test]
    fn test_mixed_depths_agree() {
        let m = AffineMatrix::scale(1.4, 0.8).compose(&AffineMatrix::rotation_degrees(17.0));
        let rect = Rect::new_unchecked(0, 0, 6, 5);
        let mut results = Vec::new();
        for src_depth in [BitDepth::Bit24, BitDepth::Bit32] {
            for dst_depth in [BitDepth::Bit24, BitDepth::Bit32] {
                let src = checker(src_depth);
                let mut dst = Bitmap::new_solid(12, 12, dst_depth, Rgb::new(9, 9, 9)).unwrap();
                blit(
                    &mut dst.as_view_mut(),
                    4,
                    1,
                    &src.as_view(),
                    rect,
                    &m,
                    &BlitOptions::default(),
                )
                .unwrap();
                results.push(dst.convert_to(BitDepth::Bit24).unwrap());
            }
        }
        for r in &results[1..] {
            assert_eq!(r, &results[0]);
        }
    }

    #[test]
    fn test_stretch_rejects_zero_size() {
        let src = checker(BitDepth::Bit24);
        let mut dst = Bitmap::new(8, 8, BitDepth::Bit24).unwrap();
        let result = stretch_blit(
            &mut dst.as_view_mut(),
            0,
            0,
            0,
            4,
            &src.as_view(),
            &BlitOptions::default(),
            false,
        );
        assert!(matches!(result, Err(TransformError::InvalidParameters(_))));
    }

    #[test]
    fn test_stretch_invert_y() {
        let red = Rgb::new(255, 0, 0);
        let blue = Rgb::new(0, 0, 255);
        let mut src = Bitmap::new_solid(1, 4, BitDepth::Bit24, red).unwrap();
        src.set_rgb(0, 2, blue).unwrap();
        src.set_rgb(0, 3, blue).unwrap();

        let mut dst = Bitmap::new(1, 4, BitDepth::Bit24).unwrap();
        stretch_blit(
            &mut dst.as_view_mut(),
            0,
            0,
            1,
            4,
            &src.as_view(),
            &BlitOptions::default(),
            true,
        )
        .unwrap();
        // Destination row y samples source row 4 - y
        assert_eq!(dst.get_rgb(0, 1), Some(blue));
        assert_eq!(dst.get_rgb(0, 2), Some(blue));
        assert_eq!(dst.get_rgb(0, 3), Some(red));
        // Row 0 samples the bottom edge of the source and stays untouched
        assert_eq!(dst.get_rgb(0, 0), Some(Rgb::BLACK));
    }
}
