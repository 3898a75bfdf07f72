//! xformblit - Anti-aliased affine blitting for packed RGB bitmaps
//!
//! Draws a rectangle of one 24 or 32 bpp bitmap into another through an
//! arbitrary 2D affine transform (scale, rotation, shear, translation).
//!
//! # Overview
//!
//! - Bilinear filtering when magnifying or mildly shrinking, block
//!   averaging when shrinking further
//! - Optional transparent color key
//! - Views over caller-owned memory ([`BitmapRef`], [`BitmapMut`]) or an
//!   owned [`Bitmap`]
//! - Layout helpers for pictures scattered at random angles
//!
//! # Example
//!
//! ```
//! use xformblit::transform::{BlitOptions, draw_rotated};
//! use xformblit::{BitDepth, Bitmap, Rgb};
//!
//! let picture = Bitmap::new_solid(40, 30, BitDepth::Bit24, Rgb::new(200, 40, 40)).unwrap();
//! let mut canvas = Bitmap::new_solid(100, 100, BitDepth::Bit32, Rgb::WHITE).unwrap();
//!
//! let key = Rgb::new(255, 0, 255);
//! draw_rotated(
//!     &mut canvas.as_view_mut(),
//!     50,
//!     20,
//!     &picture.as_view(),
//!     30.0,
//!     &BlitOptions::default().with_color_key(key),
//! )
//! .unwrap();
//! assert!(canvas.count_color(Rgb::new(200, 40, 40)) > 0);
//! ```
//!
//! Randomized layouts take any [`rand::Rng`]:
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use xformblit::transform::scatter_placement;
//!
//! let mut rng = StdRng::seed_from_u64(3);
//! let p = scatter_placement(320, 240, 640, 480, 20.0, 10, &mut rng).unwrap();
//! assert!(p.fit.bound_width <= 321 && p.fit.bound_height <= 241);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use xformblit_core::*;

// Re-export the transform crate as a module
pub use xformblit_transform as transform;
