//! Affine transform blit with adaptive resampling
//!
//! Every destination pixel inside the projected source rectangle is mapped
//! back into the source through the inverse transform and filled from
//! there. The inverse mapping is evaluated incrementally with fixed-point
//! steps (see [`crate::dda`]), one set per destination column and one per
//! row.
//!
//! # Filters
//!
//! - **Bilinear**: when the source is not much smaller than the
//!   destination (at most [`BILINEAR_MAX_SHRINK`] source pixels per
//!   destination pixel on both axes), the 2x2 source pixels around the
//!   mapped point are interpolated. Pixels outside the source or equal to
//!   the color key lose their weight, and the lost weight becomes
//!   transparency: edges and keyed regions blend into the destination.
//! - **Area average**: when shrinking further, each of the four samples is
//!   itself the mean of a block of `ceil(kx) x ceil(ky)` source pixels, so
//!   detail between samples is not skipped. Keyed pixels average in the
//!   current destination color.

use crate::affine::AffineMatrix;
use crate::dda::{DdaAxis, DdaStep, SCALE, SHIFT};
use crate::sampler::{KeySubstitute, average_color_as};
use xformblit_core::{BitmapMut, BitmapRef, Bounds, PixelFormat, Rect, Rgb};

/// Largest source-per-destination ratio still filtered bilinearly
pub const BILINEAR_MAX_SHRINK: f64 = 1.75;

/// Bias added before truncating start coordinates, so that exact pixel
/// positions computed as `n - tiny` still land on pixel `n`
const START_BIAS: f64 = 1e-6;

/// Resampling filter selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Bilinear when magnifying or mildly shrinking, area average otherwise
    #[default]
    Auto,
    /// Always interpolate the 4 nearest source pixels
    Bilinear,
    /// Always average source blocks
    AreaAverage,
}

/// Options for transform blits
#[derive(Debug, Clone, Default)]
pub struct BlitOptions {
    /// Source color treated as transparent
    pub color_key: Option<Rgb>,
    /// Resampling filter
    pub filter: FilterMode,
}

impl BlitOptions {
    /// Treat `color_key` in the source as transparent
    pub fn with_color_key(mut self, color_key: Rgb) -> Self {
        self.color_key = Some(color_key);
        self
    }

    /// Set the resampling filter
    pub fn with_filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }
}

/// Filter actually used by a blit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sampling {
    /// Interpolate the 2x2 source pixels around each sample
    Bilinear,
    /// Interpolate between block averages
    AreaAverage,
}

/// Per-call setup of a transform blit
///
/// Everything here is derived once from the transform and the buffer
/// sizes; the pixel loops only read it.
#[derive(Debug, Clone, PartialEq)]
pub struct BlitPlan {
    /// Transform with its translation anchored on the requested points
    pub matrix: AffineMatrix,
    /// Destination pixels to visit (inclusive, clipped to the destination)
    pub region: Bounds,
    /// Source pixels per destination pixel along x
    pub kx: f64,
    /// Source pixels per destination pixel along y
    pub ky: f64,
    /// Block width for area averaging
    pub chunk_x: i32,
    /// Block height for area averaging
    pub chunk_y: i32,
    /// Filter chosen for this blit
    pub sampling: Sampling,
    /// Whether the transform has no rotation or shear
    pub axis_aligned: bool,
    /// Source position of the top-left region pixel
    origin: (DdaAxis, DdaAxis),
    /// Source advance per destination column
    step_col: (DdaStep, DdaStep),
    /// Source advance per destination row
    step_row: (DdaStep, DdaStep),
}

impl BlitPlan {
    /// Derive the plan for blitting `src_rect` so that its corner
    /// `(src_rect.x, src_rect.y)` lands on `(dst_x, dst_y)`.
    ///
    /// Returns `None` when the projected rectangle misses the destination.
    /// The matrix must be finite and invertible.
    pub fn new(
        dst_width: u32,
        dst_height: u32,
        dst_x: i32,
        dst_y: i32,
        src_rect: &Rect,
        matrix: &AffineMatrix,
        filter: FilterMode,
    ) -> Option<Self> {
        // Anchor: (src_x, src_y) maps exactly onto (dst_x, dst_y)
        let (ax, ay) = matrix
            .with_translation(0.0, 0.0)
            .transform_point(f64::from(src_rect.x), f64::from(src_rect.y));
        let m = matrix.with_translation(f64::from(dst_x) - ax, f64::from(dst_y) - ay);

        // One extra source pixel on each side covers the blended border
        let region = m
            .bound_rect(&src_rect.expand(1))
            .clip(dst_width, dst_height)?;

        let (kx, ky) = m.magnification();
        let chunk_x = kx.ceil().max(1.0) as i32;
        let chunk_y = ky.ceil().max(1.0) as i32;

        let sampling = match filter {
            FilterMode::Bilinear => Sampling::Bilinear,
            FilterMode::AreaAverage => Sampling::AreaAverage,
            FilterMode::Auto if kx <= BILINEAR_MAX_SHRINK && ky <= BILINEAR_MAX_SHRINK => {
                Sampling::Bilinear
            }
            FilterMode::Auto => Sampling::AreaAverage,
        };

        let axis_aligned = m.is_axis_aligned();
        let left = f64::from(region.left);
        let top = f64::from(region.top);

        // Inverse mapping, source position as a function of destination
        // (X, Y): start position plus per-column and per-row increments
        let (start, col, row) = if axis_aligned {
            // sx = (X - dx) / m11, sy = (Y - dy) / m22
            let start = (
                (left - m.dx) / m.m11 + START_BIAS,
                (top - m.dy) / m.m22 + START_BIAS,
            );
            (start, (1.0 / m.m11, 0.0), (0.0, 1.0 / m.m22))
        } else {
            // Full 2x2 inverse of the linear part
            let det = m.determinant();
            let (ex, ey) = (left - m.dx, top - m.dy);
            let start = (
                (m.m22 * ex - m.m21 * ey) / det + START_BIAS,
                (m.m11 * ey - m.m12 * ex) / det + START_BIAS,
            );
            (start, (m.m22 / det, -m.m12 / det), (-m.m21 / det, m.m11 / det))
        };

        let origin = (DdaAxis::from_pixels(start.0), DdaAxis::from_pixels(start.1));

        Some(Self {
            matrix: m,
            region,
            kx,
            ky,
            chunk_x,
            chunk_y,
            sampling,
            axis_aligned,
            origin,
            step_col: (DdaStep::from_pixels(col.0), DdaStep::from_pixels(col.1)),
            step_row: (DdaStep::from_pixels(row.0), DdaStep::from_pixels(row.1)),
        })
    }

    /// Walk the region, calling `f(dst_x, dst_y, src_x, src_y)` with the
    /// fixed-point source position of every destination pixel.
    fn for_each<F: FnMut(u32, u32, i64, i64)>(&self, mut f: F) {
        let (mut row_x, mut row_y) = self.origin;
        for dy in self.region.top..=self.region.bottom {
            row_x.carry(&self.step_row.0);
            row_y.carry(&self.step_row.1);

            let (mut sx, mut sy) = (row_x, row_y);
            for dx in self.region.left..=self.region.right {
                sx.carry(&self.step_col.0);
                sy.carry(&self.step_col.1);
                f(dx as u32, dy as u32, sx.value(), sy.value());
                sx.advance(&self.step_col.0);
                sy.advance(&self.step_col.1);
            }

            row_x.advance(&self.step_row.0);
            row_y.advance(&self.step_row.1);
        }
    }
}

/// Blit `src_rect` of `src` through `matrix` into `dst`, the rect's corner
/// landing on `(dst_x, dst_y)`.
///
/// `S` and `D` must match the depths of `src` and `dst`. Parameters are
/// assumed valid; see [`crate::blit()`] for the checked entry point.
pub(crate) fn transform_blit<S: PixelFormat, D: PixelFormat>(
    dst: &mut BitmapMut<'_>,
    dst_x: i32,
    dst_y: i32,
    src: &BitmapRef<'_>,
    src_rect: &Rect,
    matrix: &AffineMatrix,
    options: &BlitOptions,
) {
    let Some(plan) = BlitPlan::new(
        dst.width(),
        dst.height(),
        dst_x,
        dst_y,
        src_rect,
        matrix,
        options.filter,
    ) else {
        tracing::trace!("projected source misses the destination");
        return;
    };
    tracing::debug!(
        sampling = ?plan.sampling,
        axis_aligned = plan.axis_aligned,
        kx = plan.kx,
        ky = plan.ky,
        left = plan.region.left,
        top = plan.region.top,
        right = plan.region.right,
        bottom = plan.region.bottom,
        "transform blit"
    );

    let scale = i64::from(SCALE);
    let width_scaled = i64::from(src.width()) * scale;
    let height_scaled = i64::from(src.height()) * scale;
    let key = options.color_key;

    plan.for_each(|dx, dy, sx, sy| {
        // One pixel of border on the low side is blended, not skipped
        if sx <= -scale || sy <= -scale || sx >= width_scaled || sy >= height_scaled {
            return;
        }
        // In range now: -1 <= x < width, -1 <= y < height
        let x = (sx >> SHIFT) as i32;
        let y = (sy >> SHIFT) as i32;
        let u = (sx & (scale - 1)) as i32;
        let v = (sy & (scale - 1)) as i32;
        match plan.sampling {
            Sampling::Bilinear => blend_pixels::<S, D>(dst, dx, dy, src, x, y, u, v, key),
            Sampling::AreaAverage => {
                blend_chunks::<S, D>(dst, dx, dy, src, x, y, u, v, &plan, key)
            }
        }
    });
}

/// Interpolate the 2x2 source pixels at `(x, y)` + `(u, v)/256` into
/// destination pixel `(dx, dy)`.
#[allow(clippy::too_many_arguments)]
fn blend_pixels<S: PixelFormat, D: PixelFormat>(
    dst: &mut BitmapMut<'_>,
    dx: u32,
    dy: u32,
    src: &BitmapRef<'_>,
    x: i32,
    y: i32,
    u: i32,
    v: i32,
    key: Option<Rgb>,
) {
    let last_x = src.width() as i32 - 1;
    let last_y = src.height() as i32 - 1;
    let (ui, vi) = (255 - u, 255 - v);

    //  a b
    //  c d
    let mut w = [ui * vi, u * vi, ui * v, u * v];

    // Off-image neighbors reuse the adjacent valid pixel with zero weight
    let (mut y0, mut y1) = (y, y + 1);
    if y == -1 {
        y0 = y1;
        w[0] = 0;
        w[1] = 0;
    } else if y == last_y {
        y1 = y0;
        w[2] = 0;
        w[3] = 0;
    }
    let (mut x0, mut x1) = (x, x + 1);
    if x == -1 {
        x0 = x1;
        w[0] = 0;
        w[2] = 0;
    } else if x == last_x {
        x1 = x0;
        w[1] = 0;
        w[3] = 0;
    }

    let p = [
        src.read::<S>(x0 as u32, y0 as u32),
        src.read::<S>(x1 as u32, y0 as u32),
        src.read::<S>(x0 as u32, y1 as u32),
        src.read::<S>(x1 as u32, y1 as u32),
    ];
    if let Some(key) = key {
        for (weight, color) in w.iter_mut().zip(&p) {
            if *color == key {
                *weight = 0;
            }
        }
    }

    let ratio: i32 = w.iter().sum();
    // 0 fully transparent, 255 fully opaque
    let alpha = ratio / 255;
    if alpha == 0 {
        return;
    }

    let mix = |channel: fn(&Rgb) -> u8| -> i32 {
        p.iter()
            .zip(&w)
            .map(|(c, &weight)| i32::from(channel(c)) * weight)
            .sum::<i32>()
            / ratio
    };
    let color = Rgb::new(mix(|c| c.r) as u8, mix(|c| c.g) as u8, mix(|c| c.b) as u8);

    if alpha >= 255 {
        dst.write::<D>(dx, dy, color);
    } else {
        let under = dst.read::<D>(dx, dy);
        let inv = 255 - alpha;
        let over = |d: u8, s: u8| ((i32::from(d) * inv + i32::from(s) * alpha) >> 8) as u8;
        dst.write::<D>(
            dx,
            dy,
            Rgb::new(
                over(under.r, color.r),
                over(under.g, color.g),
                over(under.b, color.b),
            ),
        );
    }
}

/// Combine the four block averages around `(x, y)` into destination pixel
/// `(dx, dy)`.
#[allow(clippy::too_many_arguments)]
fn blend_chunks<S: PixelFormat, D: PixelFormat>(
    dst: &mut BitmapMut<'_>,
    dx: u32,
    dy: u32,
    src: &BitmapRef<'_>,
    x: i32,
    y: i32,
    u: i32,
    v: i32,
    plan: &BlitPlan,
    key: Option<Rgb>,
) {
    // Sub-pixel offset measured in blocks rather than pixels
    let ui = ((f64::from(u) / plan.kx) as i32).clamp(0, 255);
    let vi = ((f64::from(v) / plan.ky) as i32).clamp(0, 255);
    let (u, v) = (255 - ui, 255 - vi);

    let under = dst.read::<D>(dx, dy);
    let key = key.map(|k| KeySubstitute::new(k, under));
    let (nx, ny) = (plan.chunk_x, plan.chunk_y);

    let quads = [
        (-nx, -ny, ui * vi),
        (nx, -ny, u * vi),
        (-nx, ny, ui * v),
        (nx, ny, u * v),
    ];

    let (mut r, mut g, mut b, mut ratio) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
    for (w, h, frac) in quads {
        let (c, count) = average_color_as::<S>(src, x, y, w, h, key);
        let weight = count as f64 * f64::from(frac);
        r += f64::from(c.r) * weight;
        g += f64::from(c.g) * weight;
        b += f64::from(c.b) * weight;
        ratio += weight;
    }
    if ratio <= 0.0 {
        return;
    }

    dst.write::<D>(
        dx,
        dy,
        Rgb::new((r / ratio) as u8, (g / ratio) as u8, (b / ratio) as u8),
    );
}
