//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use std::fs;
use std::io::BufWriter;
use std::path::Path;
use xformblit_core::Bitmap;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Generate golden files
    Generate,
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Display mode - run without comparison
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, the index of the current check, the mode and
/// every failure seen so far. Checks never panic; call [`cleanup`] at the
/// end and assert on its result.
///
/// [`cleanup`]: RegParams::cleanup
pub struct RegParams {
    /// Name of the test (e.g., "stretch")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode (generate, compare, or display)
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters, with the mode taken from
    /// `REGTEST_MODE`.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();
        crate::init_logging();

        // Ensure directories exist
        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `actual` is within `delta` of `expected`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Compare two bitmaps for identical colors
    ///
    /// Only RGB values are compared, so bitmaps of different depths may
    /// match.
    pub fn compare_bitmaps(&mut self, expected: &Bitmap, actual: &Bitmap) -> bool {
        self.compare_bitmaps_within(expected, actual, 0)
    }

    /// Compare two bitmaps allowing each channel to differ by `delta`
    pub fn compare_bitmaps_within(
        &mut self,
        expected: &Bitmap,
        actual: &Bitmap,
        delta: u8,
    ) -> bool {
        self.index += 1;

        if expected.width() != actual.width() || expected.height() != actual.height() {
            self.fail(format!(
                "Failure in {}_reg: bitmap comparison for index {} - size mismatch \
                 {}x{} vs {}x{}",
                self.test_name,
                self.index,
                expected.width(),
                expected.height(),
                actual.width(),
                actual.height()
            ));
            return false;
        }

        let (e, a) = (expected.as_view(), actual.as_view());
        for y in 0..expected.height() {
            for x in 0..expected.width() {
                let p1 = e.get_rgb_unchecked(x, y);
                let p2 = a.get_rgb_unchecked(x, y);
                if p1.max_channel_diff(p2) > delta {
                    self.fail(format!(
                        "Failure in {}_reg: bitmap comparison for index {} - pixel mismatch \
                         at ({}, {}): {:?} vs {:?}",
                        self.test_name, self.index, x, y, p1, p2
                    ));
                    return false;
                }
            }
        }

        true
    }

    /// Write a bitmap as PNG to the regout directory and check it against
    /// its golden counterpart
    ///
    /// In generate mode the file becomes the golden file. In compare mode
    /// it must match an existing golden file byte for byte; a missing
    /// golden file is reported but not counted as a failure.
    pub fn write_bitmap(&mut self, bitmap: &Bitmap) -> TestResult<()> {
        self.index += 1;

        let local_path = format!("{}/{}.{:02}.png", regout_dir(), self.test_name, self.index);
        write_png(bitmap, &local_path)?;
        self.check_file(&local_path)
    }

    /// Check a file against its golden counterpart
    fn check_file(&mut self, local_path: &str) -> TestResult<()> {
        let golden_path = format!(
            "{}/{}_golden.{:02}.png",
            golden_dir(),
            self.test_name,
            self.index
        );

        match self.mode {
            RegTestMode::Generate => {
                fs::copy(local_path, &golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden_path).exists() {
                    eprintln!("No golden file for index {}: {}", self.index, golden_path);
                    return Ok(());
                }
                let local_data = fs::read(local_path)?;
                let golden_data = fs::read(&golden_path)?;
                if local_data != golden_data {
                    self.fail(format!(
                        "Failure in {}_reg, index {}: comparing {} with {}",
                        self.test_name, self.index, local_path, golden_path
                    ));
                }
            }
            RegTestMode::Display => {
                eprintln!("Wrote: {}", local_path);
            }
        }

        Ok(())
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

/// Encode `bitmap` as an 8-bit RGB PNG.
fn write_png(bitmap: &Bitmap, path: &str) -> TestResult<()> {
    let image_err = |e: png::EncodingError| TestError::ImageWrite {
        path: path.to_string(),
        message: e.to_string(),
    };

    let view = bitmap.as_view();
    let mut rgb = Vec::with_capacity(bitmap.width() as usize * bitmap.height() as usize * 3);
    for y in 0..bitmap.height() {
        for x in 0..bitmap.width() {
            let c = view.get_rgb_unchecked(x, y);
            rgb.extend_from_slice(&[c.r, c.g, c.b]);
        }
    }

    let file = fs::File::create(path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), bitmap.width(), bitmap.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().map_err(image_err)?;
    writer.write_image_data(&rgb).map_err(image_err)?;
    Ok(())
}
