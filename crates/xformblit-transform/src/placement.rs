//! Placement of rotated objects inside a view
//!
//! Helpers for laying out a picture at an arbitrary angle: the bounding
//! rectangle a rotation produces, the scale at which that rectangle fits a
//! view, and a randomized "scatter" layout that jitters angle and position.

use crate::affine::AffineMatrix;
use crate::{TransformError, TransformResult};
use rand::Rng;
use xformblit_core::Rect;

/// Bounding rectangle of a `width` x `height` object rotated by
/// `angle_deg` about its top-left corner.
///
/// Each rotated corner is rounded to the nearest integer (halves away
/// from zero) before taking the extremes.
pub fn rotated_bounds(width: i32, height: i32, angle_deg: f64) -> Rect {
    let m = AffineMatrix::rotation_degrees(angle_deg);
    let (w, h) = (f64::from(width), f64::from(height));
    let corners = [(0.0, 0.0), (w, 0.0), (0.0, h), (w, h)];

    let (mut x_min, mut y_min) = (i32::MAX, i32::MAX);
    let (mut x_max, mut y_max) = (i32::MIN, i32::MIN);
    for (x, y) in corners {
        let (tx, ty) = m.transform_point(x, y);
        let (tx, ty) = (tx.round() as i32, ty.round() as i32);
        x_min = x_min.min(tx);
        x_max = x_max.max(tx);
        y_min = y_min.min(ty);
        y_max = y_max.max(ty);
    }
    Rect::from_corners(x_min, y_min, x_max, y_max)
}

/// Size of a rotated object scaled to fit a view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    /// Scaled object width
    pub width: i32,
    /// Scaled object height
    pub height: i32,
    /// Width of the scaled object's rotated bounding box
    pub bound_width: i32,
    /// Height of the scaled object's rotated bounding box
    pub bound_height: i32,
    /// Original size divided by scaled size
    pub ratio: f64,
}

/// Scale an `obj_w` x `obj_h` object so that, rotated by `angle_deg`, it
/// just fits a `view_w` x `view_h` view.
///
/// The object is shrunk or enlarged so that the tighter axis of its
/// rotated bounding box matches the view exactly.
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameters`] if any size is not
/// positive.
pub fn fit_rotated(
    view_w: i32,
    view_h: i32,
    obj_w: i32,
    obj_h: i32,
    angle_deg: f64,
) -> TransformResult<Fit> {
    if view_w <= 0 || view_h <= 0 || obj_w <= 0 || obj_h <= 0 {
        return Err(TransformError::InvalidParameters(format!(
            "sizes must be positive: view {view_w}x{view_h}, object {obj_w}x{obj_h}"
        )));
    }
    let bound = rotated_bounds(obj_w, obj_h, angle_deg);
    let width_ratio = f64::from(bound.w) / f64::from(view_w);
    let height_ratio = f64::from(bound.h) / f64::from(view_h);
    let ratio = width_ratio.max(height_ratio);
    if ratio <= 0.0 || !ratio.is_finite() {
        return Err(TransformError::InvalidParameters(format!(
            "degenerate bounding box {}x{} at {angle_deg} degrees",
            bound.w, bound.h
        )));
    }

    let scaled = |v: i32| (f64::from(v) / ratio).round() as i32;
    Ok(Fit {
        width: scaled(obj_w),
        height: scaled(obj_h),
        bound_width: scaled(bound.w),
        bound_height: scaled(bound.h),
        ratio,
    })
}

/// A randomized layout for one object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Left edge of the object's rotated bounding box in the view
    pub left: i32,
    /// Top edge of the object's rotated bounding box in the view
    pub top: i32,
    /// Rotation in degrees
    pub angle_deg: f64,
    /// Scaled size of the object
    pub fit: Fit,
}

impl Placement {
    /// Point at which the top-left corner of the unrotated object must be
    /// drawn so that its rotated bounding box starts at `(left, top)`.
    ///
    /// `width` and `height` are the object's size as actually drawn, which
    /// may differ slightly from the fitted size after rescaling.
    pub fn anchor(&self, width: i32, height: i32) -> (i32, i32) {
        let bound = rotated_bounds(width, height, self.angle_deg);
        (self.left + bound.x.abs(), self.top + bound.y.abs())
    }
}

/// Signed jitter drawn as `a - b / 2` with `a` and `b` uniform in
/// `[0, max)`, giving values in `(-max / 2, max)`.
fn jitter<R: Rng>(rng: &mut R, max: u32) -> i32 {
    if max == 0 {
        return 0;
    }
    let a = rng.random_range(0..max) as i32;
    let b = rng.random_range(0..max) as i32;
    a - b / 2
}

/// Choose a random angle and offset for an `obj_w` x `obj_h` object in a
/// `view_w` x `view_h` view, fit it to what remains of the view and
/// center it there.
///
/// The angle is a whole number of degrees below `max_angle_deg` (rounded),
/// possibly negative. The offsets shift the view by up to
/// `max_deviation` pixels before it is clipped back to its original
/// extent.
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameters`] if a size is not positive
/// or the offsets leave no room in the view.
#[tracing::instrument(level = "debug", skip(rng))]
pub fn scatter_placement<R: Rng>(
    view_w: i32,
    view_h: i32,
    obj_w: i32,
    obj_h: i32,
    max_angle_deg: f64,
    max_deviation: u32,
    rng: &mut R,
) -> TransformResult<Placement> {
    let max_angle = max_angle_deg.round().max(0.0) as u32;
    let angle_deg = f64::from(jitter(rng, max_angle));
    let offset_x = jitter(rng, max_deviation);
    let offset_y = jitter(rng, max_deviation);

    let left = offset_x.max(0);
    let top = offset_y.max(0);
    let right = (view_w + offset_x).min(view_w);
    let bottom = (view_h + offset_y).min(view_h);
    let (adj_w, adj_h) = (right - left, bottom - top);

    let fit = fit_rotated(adj_w, adj_h, obj_w, obj_h, angle_deg)?;
    let placement = Placement {
        left: left + (adj_w - fit.bound_width) / 2,
        top: top + (adj_h - fit.bound_height) / 2,
        angle_deg,
        fit,
    };
    tracing::debug!(?placement, "scatter placement");
    Ok(placement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_rotated_bounds_zero() {
        assert_eq!(rotated_bounds(40, 30, 0.0), Rect::new_unchecked(0, 0, 40, 30));
    }

    #[test]
    fn test_rotated_bounds_quarter_turn() {
        // (40, 0) -> (0, 40), (0, 30) -> (-30, 0)
        assert_eq!(
            rotated_bounds(40, 30, 90.0),
            Rect::new_unchecked(-30, 0, 30, 40)
        );
    }

    #[test]
    fn test_rotated_bounds_diagonal() {
        let r = rotated_bounds(10, 10, 45.0);
        // Corners round to x in {0, 7, -7, 0}, y in {0, 7, 7, 14}
        assert_eq!(r, Rect::new_unchecked(-7, 0, 14, 14));
    }

    #[test]
    fn test_fit_unrotated() {
        let fit = fit_rotated(100, 50, 400, 100, 0.0).unwrap();
        assert!((fit.ratio - 4.0).abs() < 1e-12);
        assert_eq!((fit.width, fit.height), (100, 25));
        assert_eq!((fit.bound_width, fit.bound_height), (100, 25));
    }

    #[test]
    fn test_fit_enlarges() {
        let fit = fit_rotated(100, 100, 10, 20, 0.0).unwrap();
        assert!((fit.ratio - 0.2).abs() < 1e-12);
        assert_eq!((fit.width, fit.height), (50, 100));
    }

    #[test]
    fn test_fit_rotated_stays_in_view() {
        for angle in [-30.0, 10.0, 45.0, 80.0] {
            let fit = fit_rotated(200, 120, 640, 480, angle).unwrap();
            assert!(fit.bound_width <= 200, "angle {angle}: {fit:?}");
            assert!(fit.bound_height <= 120, "angle {angle}: {fit:?}");
            assert!(fit.bound_width == 200 || fit.bound_height == 120);
        }
    }

    #[test]
    fn test_fit_rejects_empty() {
        assert!(fit_rotated(0, 10, 5, 5, 0.0).is_err());
        assert!(fit_rotated(10, 10, 5, -1, 0.0).is_err());
    }

    #[test]
    fn test_scatter_without_jitter_centers() {
        let mut rng = StdRng::seed_from_u64(7);
        let p = scatter_placement(200, 100, 100, 100, 0.0, 0, &mut rng).unwrap();
        assert_eq!(p.angle_deg, 0.0);
        assert_eq!((p.fit.width, p.fit.height), (100, 100));
        assert_eq!((p.left, p.top), (50, 0));
        assert_eq!(p.anchor(100, 100), (50, 0));
    }

    #[test]
    fn test_scatter_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let p = scatter_placement(300, 200, 640, 480, 20.0, 10, &mut rng).unwrap();
            assert!(p.angle_deg > -10.0 && p.angle_deg < 20.0, "{p:?}");
            assert!(p.left >= 0 && p.top >= 0, "{p:?}");
            assert!(p.left + p.fit.bound_width <= 300 + 1, "{p:?}");
            assert!(p.top + p.fit.bound_height <= 200 + 1, "{p:?}");
        }
    }

    #[test]
    fn test_anchor_compensates_rotation() {
        let p = Placement {
            left: 10,
            top: 20,
            angle_deg: 90.0,
            fit: fit_rotated(100, 100, 40, 30, 90.0).unwrap(),
        };
        // Rotating by 90 degrees swings the object 30 pixels left of its corner
        assert_eq!(p.anchor(40, 30), (40, 20));
    }
}
