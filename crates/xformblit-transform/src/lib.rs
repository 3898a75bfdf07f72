//! xformblit-transform - Affine blits between packed RGB bitmaps
//!
//! This crate provides:
//!
//! - [`AffineMatrix`] - Construction, composition, inversion and bounding
//!   boxes of 2D affine transforms
//! - [`blit`], [`stretch_blit`], [`draw_rotated`] - Anti-aliased transform
//!   blits with an optional transparent color key
//! - [`average_color`] - Block averaging used when shrinking
//! - [`rotated_bounds`], [`fit_rotated`], [`scatter_placement`] - Layout of
//!   rotated pictures inside a view
//!
//! Sources and destinations may each be 24 or 32 bits per pixel. A blit
//! validates its parameters first and then never fails; destination pixels
//! outside the projected source rectangle are never touched.

pub mod affine;
pub mod blit;
pub mod dda;
mod dispatch;
mod error;
pub mod placement;
pub mod sampler;

pub use affine::AffineMatrix;
pub use blit::{BILINEAR_MAX_SHRINK, BlitOptions, BlitPlan, FilterMode, Sampling};
pub use dispatch::{blit, draw_rotated, stretch_blit};
pub use error::{TransformError, TransformResult};
pub use placement::{Fit, Placement, fit_rotated, rotated_bounds, scatter_placement};
pub use sampler::{KeySubstitute, average_color};
