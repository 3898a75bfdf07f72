//! Affine transformation matrices
//!
//! This module provides:
//! - Affine matrix construction (identity, translation, scale, rotation)
//! - Composition of two transforms
//! - Point mapping and inversion
//! - Projection of a rectangle to its integer bounding box
//!
//! # Affine Matrix
//!
//! Matrices use the row-vector convention, the point multiplying from the
//! left:
//! ```text
//!               | m11  m12  0 |
//! (x, y, 1)  *  | m21  m22  0 |  =  (x', y', 1)
//!               | dx   dy   1 |
//! ```
//!
//! The transformation equations are:
//! ```text
//! x' = x*m11 + y*m21 + dx
//! y' = x*m12 + y*m22 + dy
//! ```

use crate::{TransformError, TransformResult};
use xformblit_core::{Bounds, Rect};

/// Off-diagonal magnitude below which a matrix counts as axis aligned
pub const AXIS_ALIGNED_EPSILON: f64 = 1e-6;

/// Determinant magnitude below which a matrix counts as singular
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// 2D affine transformation matrix (6 coefficients)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineMatrix {
    pub m11: f64,
    pub m12: f64,
    pub m21: f64,
    pub m22: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineMatrix {
    /// Create from raw coefficients
    pub const fn new(m11: f64, m12: f64, m21: f64, m22: f64, dx: f64, dy: f64) -> Self {
        Self {
            m11,
            m12,
            m21,
            m22,
            dx,
            dy,
        }
    }

    /// Create the identity transformation
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Create a translation matrix
    pub const fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Create a scaling matrix
    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Create a rotation about the origin by `radians`.
    ///
    /// With y pointing down, positive angles turn clockwise on screen.
    pub fn rotation_radians(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Create a rotation about the origin by `degrees`.
    pub fn rotation_degrees(degrees: f64) -> Self {
        Self::rotation_radians(degrees.to_radians())
    }

    /// Same linear part with another translation
    pub const fn with_translation(self, dx: f64, dy: f64) -> Self {
        Self { dx, dy, ..self }
    }

    /// Compose two transformations: apply `self`, then `other`.
    ///
    /// In matrix terms this is the product `self * other`.
    pub fn compose(&self, other: &Self) -> Self {
        let a = self;
        let b = other;
        Self {
            m11: a.m11 * b.m11 + a.m12 * b.m21,
            m12: a.m11 * b.m12 + a.m12 * b.m22,
            m21: a.m21 * b.m11 + a.m22 * b.m21,
            m22: a.m21 * b.m12 + a.m22 * b.m22,
            dx: a.dx * b.m11 + a.dy * b.m21 + b.dx,
            dy: a.dx * b.m12 + a.dy * b.m22 + b.dy,
        }
    }

    /// Transform a point through this matrix
    #[inline]
    pub fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.m11 + y * self.m21 + self.dx,
            x * self.m12 + y * self.m22 + self.dy,
        )
    }

    /// Transform an integer point, truncating the result toward zero
    #[inline]
    pub fn transform_point_truncated(&self, x: i32, y: i32) -> (i32, i32) {
        let (tx, ty) = self.transform_point(f64::from(x), f64::from(y));
        (tx as i32, ty as i32)
    }

    /// Determinant of the linear part
    pub fn determinant(&self) -> f64 {
        self.m11 * self.m22 - self.m12 * self.m21
    }

    /// Check if both off-diagonal coefficients are negligible
    pub fn is_axis_aligned(&self) -> bool {
        self.m12.abs() <= AXIS_ALIGNED_EPSILON && self.m21.abs() <= AXIS_ALIGNED_EPSILON
    }

    /// Check if every coefficient is finite
    pub fn is_finite(&self) -> bool {
        [self.m11, self.m12, self.m21, self.m22, self.dx, self.dy]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Compute the inverse transformation
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::SingularMatrix`] if the determinant is
    /// (nearly) zero.
    pub fn inverse(&self) -> TransformResult<Self> {
        let det = self.determinant();
        if det.abs() < SINGULAR_EPSILON || !det.is_finite() {
            return Err(TransformError::SingularMatrix);
        }
        let m11 = self.m22 / det;
        let m12 = -self.m12 / det;
        let m21 = -self.m21 / det;
        let m22 = self.m11 / det;
        Ok(Self {
            m11,
            m12,
            m21,
            m22,
            dx: -(self.dx * m11 + self.dy * m21),
            dy: -(self.dx * m12 + self.dy * m22),
        })
    }

    /// Source pixels consumed per destination pixel along each axis.
    ///
    /// The reciprocal L2 norms of the two matrix columns; values above 1
    /// mean the transform shrinks the image along that axis.
    pub fn magnification(&self) -> (f64, f64) {
        let kx = 1.0 / self.m11.hypot(self.m21);
        let ky = 1.0 / self.m12.hypot(self.m22);
        (kx, ky)
    }

    /// Coefficient-wise comparison within `eps`
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        (self.m11 - other.m11).abs() <= eps
            && (self.m12 - other.m12).abs() <= eps
            && (self.m21 - other.m21).abs() <= eps
            && (self.m22 - other.m22).abs() <= eps
            && (self.dx - other.dx).abs() <= eps
            && (self.dy - other.dy).abs() <= eps
    }

    /// Integer bounding box of a projected rectangle.
    ///
    /// Each of the corners `(left, top)`, `(right, top)`, `(left, bottom)`
    /// and `(right, bottom)` of `bounds` is transformed and truncated toward
    /// zero; the result spans the minimum and maximum of the four.
    pub fn bound_box(&self, bounds: &Bounds) -> Bounds {
        let corners = [
            (bounds.left, bounds.top),
            (bounds.right, bounds.top),
            (bounds.left, bounds.bottom),
            (bounds.right, bounds.bottom),
        ];
        let (x0, y0) = self.transform_point_truncated(corners[0].0, corners[0].1);
        let mut result = Bounds::point(x0, y0);
        for &(x, y) in &corners[1..] {
            let (tx, ty) = self.transform_point_truncated(x, y);
            result.include(tx, ty);
        }
        result
    }

    /// [`AffineMatrix::bound_box`] for a rect, using its exclusive edges as
    /// corner coordinates.
    pub fn bound_rect(&self, rect: &Rect) -> Bounds {
        self.bound_box(&rect.to_bounds())
    }
}
