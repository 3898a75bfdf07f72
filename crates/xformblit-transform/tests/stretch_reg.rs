//! Stretch blit regression test
//!
//! Tests magnify/shrink round trips, interpolation between source pixels,
//! vertically inverted output for bottom-up memory, and thumbnails of
//! large bitmaps.

use xformblit_core::{BitDepth, Bitmap, Rgb};
use xformblit_test::{RegParams, ramp_bitmap};
use xformblit_transform::{BlitOptions, FilterMode, stretch_blit};

fn stretch(src: &Bitmap, w: u32, h: u32, options: &BlitOptions, invert_y: bool) -> Bitmap {
    let mut dst = Bitmap::new(w, h, src.depth()).unwrap();
    stretch_blit(
        &mut dst.as_view_mut(),
        0,
        0,
        w as i32,
        h as i32,
        &src.as_view(),
        options,
        invert_y,
    )
    .unwrap();
    dst
}

// ==========================================================================
// Test 1: Magnify x2 then shrink x0.5 keeps a uniform color
// ==========================================================================

#[test]
fn stretch_reg_round_trip() {
    let mut rp = RegParams::new("stretch_round_trip");

    let color = Rgb::new(100, 150, 200);
    let src = Bitmap::new_solid(10, 10, BitDepth::Bit24, color).unwrap();
    let options = BlitOptions::default();

    let big = stretch(&src, 20, 20, &options, false);
    let back = stretch(&big, 10, 10, &options, false);
    rp.write_bitmap(&big).unwrap();
    rp.write_bitmap(&back).unwrap();

    // The last row and column blend with the (black) destination edge
    for y in 0..9 {
        for x in 0..9 {
            let c = back.get_rgb(x, y).unwrap();
            rp.compare_values(0.0, f64::from(c.max_channel_diff(color)), 1.0);
        }
    }

    assert!(rp.cleanup(), "stretch_reg round trip tests failed");
}

// ==========================================================================
// Test 2: Magnification interpolates monotonically along a ramp
// ==========================================================================

#[test]
fn stretch_reg_interpolation() {
    let mut rp = RegParams::new("stretch_interpolation");

    let src = ramp_bitmap(16, 16, BitDepth::Bit32).unwrap();
    let dst = stretch(&src, 64, 48, &BlitOptions::default(), false);
    rp.write_bitmap(&dst).unwrap();

    // Stop before the last source column and row, which fade out
    let mut decreasing = 0;
    for y in 0..45 {
        for x in 1..60 {
            let prev = dst.get_rgb(x - 1, y).unwrap();
            let cur = dst.get_rgb(x, y).unwrap();
            if cur.r < prev.r {
                decreasing += 1;
            }
        }
    }
    rp.compare_values(0.0, f64::from(decreasing), 0.0);

    // Destination pixels on source pixel corners reproduce them exactly
    for (sx, sy) in [(0u32, 0u32), (5, 3), (14, 14)] {
        let want = src.get_rgb(sx, sy).unwrap();
        let got = dst.get_rgb(sx * 4, sy * 3).unwrap();
        rp.compare_values(f64::from(want.to_u32()), f64::from(got.to_u32()), 0.0);
    }

    assert!(rp.cleanup(), "stretch_reg interpolation tests failed");
}

// ==========================================================================
// Test 3: Shrinking averages instead of skipping pixels
// ==========================================================================

#[test]
fn stretch_reg_shrink_averages() {
    let mut rp = RegParams::new("stretch_shrink");

    // 1-pixel stripes alternate black and white
    let mut src = Bitmap::new(40, 40, BitDepth::Bit24).unwrap();
    for y in 0..40 {
        for x in (0..40).step_by(2) {
            src.set_rgb(x, y, Rgb::WHITE).unwrap();
        }
    }

    // Averaging gives mid gray where sampling alone would pick one stripe
    let averaged = stretch(&src, 10, 10, &BlitOptions::default(), false);
    let c = averaged.get_rgb(4, 4).unwrap();
    rp.compare_values(127.0, f64::from(c.r), 1.0);

    let sampled = stretch(
        &src,
        10,
        10,
        &BlitOptions::default().with_filter(FilterMode::Bilinear),
        false,
    );
    let c = sampled.get_rgb(4, 4).unwrap();
    rp.compare_values(255.0, f64::from(c.r), 0.0);

    assert!(rp.cleanup(), "stretch_reg shrink tests failed");
}

// ==========================================================================
// Test 4: Inverted stretch flips rows
// ==========================================================================

#[test]
fn stretch_reg_invert_y() {
    let mut rp = RegParams::new("stretch_invert");

    let src = ramp_bitmap(8, 8, BitDepth::Bit24).unwrap();
    let dst = stretch(&src, 8, 8, &BlitOptions::default(), true);

    // Destination row y samples source row 8 - y; row 0 falls on the
    // bottom edge and is left alone
    for y in 1..8 {
        for x in 0..8 {
            let want = src.get_rgb(x, 8 - y).unwrap();
            let got = dst.get_rgb(x, y).unwrap();
            rp.compare_values(f64::from(want.to_u32()), f64::from(got.to_u32()), 0.0);
        }
    }
    rp.compare_values(0.0, f64::from(dst.get_rgb(3, 0).unwrap().to_u32()), 0.0);

    assert!(rp.cleanup(), "stretch_reg invert tests failed");
}

// ==========================================================================
// Test 5: A large bitmap shrunk to a single pixel
// ==========================================================================

#[test]
fn stretch_reg_thumbnail() {
    let mut rp = RegParams::new("stretch_thumbnail");

    // One block average covers all 17.6M source pixels
    let color = Rgb::new(255, 128, 1);
    let src = Bitmap::new_solid(4200, 4200, BitDepth::Bit24, color).unwrap();
    let dst = stretch(&src, 1, 1, &BlitOptions::default(), false);

    let c = dst.get_rgb(0, 0).unwrap();
    rp.compare_values(0.0, f64::from(c.max_channel_diff(color)), 0.0);

    assert!(rp.cleanup(), "stretch_reg thumbnail tests failed");
}
