//! xformblit-test - Regression test framework for xformblit
//!
//! Tests run in one of three modes:
//!
//! - **Generate**: Write rendered bitmaps as golden files
//! - **Compare**: Check rendered bitmaps against existing golden files
//! - **Display**: Run tests and keep the rendered bitmaps for inspection
//!
//! # Usage
//!
//! ```ignore
//! use xformblit_test::RegParams;
//!
//! let mut rp = RegParams::new("stretch");
//! rp.compare_values(255.0, f64::from(color.r), 1.0);
//! rp.compare_bitmaps(&expected, &actual);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use xformblit_core::{BitDepth, Bitmap, Rgb};

/// Install a `tracing` subscriber that prints through the test harness.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // xformblit-test is at crates/xformblit-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Horizontal red and vertical green ramps over a constant blue channel.
///
/// Every pixel of a ramp is distinct as long as both sides are at most 256,
/// which makes misplaced pixels easy to spot.
pub fn ramp_bitmap(width: u32, height: u32, depth: BitDepth) -> TestResult<Bitmap> {
    let mut bmp = Bitmap::new(width, height, depth)?;
    let step_x = 255 / width.max(2).saturating_sub(1).max(1);
    let step_y = 255 / height.max(2).saturating_sub(1).max(1);
    for y in 0..height {
        for x in 0..width {
            let r = (x * step_x).min(255) as u8;
            let g = (y * step_y).min(255) as u8;
            bmp.set_rgb(x, y, Rgb::new(r, g, 96))?;
        }
    }
    Ok(bmp)
}

/// Checkerboard of `cell` x `cell` squares in two colors.
pub fn checker_bitmap(
    width: u32,
    height: u32,
    depth: BitDepth,
    cell: u32,
    a: Rgb,
    b: Rgb,
) -> TestResult<Bitmap> {
    let mut bmp = Bitmap::new(width, height, depth)?;
    let cell = cell.max(1);
    for y in 0..height {
        for x in 0..width {
            let c = if (x / cell + y / cell) % 2 == 0 { a } else { b };
            bmp.set_rgb(x, y, c)?;
        }
    }
    Ok(bmp)
}

/// Solid `inner` bitmap surrounded by a `border`-pixel frame of `frame`.
pub fn framed_bitmap(
    width: u32,
    height: u32,
    depth: BitDepth,
    border: u32,
    inner: Rgb,
    frame: Rgb,
) -> TestResult<Bitmap> {
    let mut bmp = Bitmap::new_solid(width, height, depth, frame)?;
    for y in border..height.saturating_sub(border) {
        for x in border..width.saturating_sub(border) {
            bmp.set_rgb(x, y, inner)?;
        }
    }
    Ok(bmp)
}
