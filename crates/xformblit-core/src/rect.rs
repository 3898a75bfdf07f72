//! Rect, Bounds - Integer rectangles
//!
//! [`Rect`] is an origin plus extent (half-open on the right and bottom).
//! [`Bounds`] holds the extreme corner coordinates reached by a set of
//! points, as produced when a rectangle is projected through a transform.

use crate::error::{Error, Result};

/// A rectangle region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Rect {
    /// Create a new rect
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "rect dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a rect without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rect from two corner points in any order
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let (x, w) = if x1 <= x2 {
            (x1, x2.saturating_sub(x1))
        } else {
            (x2, x1.saturating_sub(x2))
        };
        let (y, h) = if y1 <= y2 {
            (y1, y2.saturating_sub(y1))
        } else {
            (y2, y1.saturating_sub(y2))
        };
        Self { x, y, w, h }
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// Check if the rect is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Check if a point is inside the rect
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Grow the rect by `n` pixels on every side, saturating at the `i32`
    /// range
    pub fn expand(&self, n: i32) -> Self {
        Self::from_corners(
            self.x.saturating_sub(n),
            self.y.saturating_sub(n),
            self.right().saturating_add(n),
            self.bottom().saturating_add(n),
        )
    }

    /// Corner coordinates as bounds (`right`/`bottom` exclusive edges)
    pub fn to_bounds(&self) -> Bounds {
        Bounds {
            left: self.x,
            top: self.y,
            right: self.right(),
            bottom: self.bottom(),
        }
    }
}

/// Extreme coordinates of a point set
///
/// All four edges are coordinates actually reached, so a scan over the
/// region runs `left..=right` and `top..=bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    /// Bounds of a single point
    pub const fn point(x: i32, y: i32) -> Self {
        Self {
            left: x,
            top: y,
            right: x,
            bottom: y,
        }
    }

    /// Widen to include `(x, y)`
    pub fn include(&mut self, x: i32, y: i32) {
        self.left = self.left.min(x);
        self.right = self.right.max(x);
        self.top = self.top.min(y);
        self.bottom = self.bottom.max(y);
    }

    /// Clip to the pixel grid of a `width` x `height` image.
    ///
    /// Returns `None` when nothing of the bounds lies on the grid.
    pub fn clip(&self, width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let max_x = i32::try_from(width - 1).unwrap_or(i32::MAX);
        let max_y = i32::try_from(height - 1).unwrap_or(i32::MAX);
        let clipped = Self {
            left: self.left.max(0),
            top: self.top.max(0),
            right: self.right.min(max_x),
            bottom: self.bottom.min(max_y),
        };
        if clipped.left > clipped.right || clipped.top > clipped.bottom {
            None
        } else {
            Some(clipped)
        }
    }

    /// Check if `(x, y)` lies within the bounds (inclusive)
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}
