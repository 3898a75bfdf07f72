//! Fixed-point incremental coordinate stepping
//!
//! Source coordinates are tracked in 1/256 pixel units ([`SHIFT`] fractional
//! bits). A step such as "source x advances by 1.3 pixels per destination
//! column" is `332.8` units, which does not fit an integer; it is split into
//! an integer part and a second-level remainder (again in 1/256 units) that
//! accumulates and is rolled into the coordinate when it overflows. The
//! inner loops then need only integer additions, and the accumulated error
//! stays below one unit (1/256 pixel) per 256 steps.
//!
//! Coordinates and integer parts are `i64`: a strong shrink along one axis
//! makes a single step larger than `i32` can hold.

/// Fractional bits of a fixed-point coordinate
pub const SHIFT: u32 = 8;
/// One pixel in fixed-point units
pub const SCALE: i32 = 1 << SHIFT;

const SCALE_F: f64 = SCALE as f64;

/// A fixed-point increment split into integer and remainder parts.
///
/// Invariants: `remainder` is in `[0, SCALE)` and `carry` is `+1` or `-1`
/// (the sign of the fractional part being accumulated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DdaStep {
    whole: i64,
    remainder: i32,
    carry: i64,
}

impl DdaStep {
    /// Split `units` (already in fixed-point units) into its parts.
    pub fn from_units(units: f64) -> Self {
        let whole = units as i64;
        let remainder = ((units - whole as f64) * SCALE_F) as i32;
        if remainder < 0 {
            Self {
                whole,
                remainder: -remainder,
                carry: -1,
            }
        } else {
            Self {
                whole,
                remainder,
                carry: 1,
            }
        }
    }

    /// Step of `pixels` source pixels.
    pub fn from_pixels(pixels: f64) -> Self {
        Self::from_units(pixels * SCALE_F)
    }

    #[inline]
    pub fn whole(&self) -> i64 {
        self.whole
    }

    #[inline]
    pub fn remainder(&self) -> i32 {
        self.remainder
    }

    #[inline]
    pub fn carry(&self) -> i64 {
        self.carry
    }
}

/// One fixed-point coordinate with its accumulated remainder.
///
/// Invariant: `acc` is in `[0, SCALE)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DdaAxis {
    value: i64,
    acc: i32,
}

impl DdaAxis {
    /// Start at `pixels`, normalizing the remainder to be non-negative.
    pub fn from_pixels(pixels: f64) -> Self {
        let units = pixels * SCALE_F;
        let mut value = units as i64;
        let mut acc = ((units - value as f64) * SCALE_F) as i32;
        if acc < 0 {
            value -= 1;
            acc += SCALE;
        }
        Self { value, acc }
    }

    /// Coordinate in fixed-point units
    #[inline]
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Accumulated second-level remainder
    #[inline]
    pub fn acc(&self) -> i32 {
        self.acc
    }

    /// Integer pixel index (floor)
    #[inline]
    pub fn pixel(&self) -> i64 {
        self.value >> SHIFT
    }

    /// Position between `pixel()` and `pixel() + 1`, in `[0, SCALE)`
    #[inline]
    pub fn fraction(&self) -> i32 {
        (self.value & i64::from(SCALE - 1)) as i32
    }

    /// Accumulate the remainder of `step`, rolling overflow into the value.
    #[inline]
    pub fn carry(&mut self, step: &DdaStep) {
        self.acc += step.remainder;
        if self.acc >= SCALE {
            self.acc -= SCALE;
            self.value += step.carry;
        }
    }

    /// Add the integer part of `step`.
    #[inline]
    pub fn advance(&mut self, step: &DdaStep) {
        self.value += step.whole;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_positive() {
        let s = DdaStep::from_units(332.75);
        assert_eq!(s.whole(), 332);
        assert_eq!(s.remainder(), 192);
        assert_eq!(s.carry(), 1);
    }

    #[test]
    fn test_step_negative() {
        let s = DdaStep::from_units(-332.75);
        assert_eq!(s.whole(), -332);
        assert_eq!(s.remainder(), 192);
        assert_eq!(s.carry(), -1);
    }

    #[test]
    fn test_step_exact() {
        let s = DdaStep::from_pixels(2.0);
        assert_eq!(s.whole(), 512);
        assert_eq!(s.remainder(), 0);
        assert_eq!(s.carry(), 1);
    }

    #[test]
    fn test_axis_negative_start() {
        // -0.5 pixel = -128 units, no remainder
        let a = DdaAxis::from_pixels(-0.5);
        assert_eq!(a.value(), -128);
        assert_eq!(a.acc(), 0);
        assert_eq!(a.pixel(), -1);
        assert_eq!(a.fraction(), 128);

        // -0.75 units: value rounds down, remainder stays positive
        let a = DdaAxis::from_pixels(-0.75 / 256.0);
        assert_eq!(a.value(), -1);
        assert_eq!(a.acc(), 64);
    }

    fn run(start: f64, step: f64, n: i32) -> i64 {
        let step = DdaStep::from_units(step);
        let mut axis = DdaAxis::from_pixels(start / 256.0);
        for _ in 0..n {
            axis.carry(&step);
            axis.advance(&step);
        }
        axis.value()
    }

    #[test]
    fn test_drift_is_bounded() {
        for &step in &[332.8, -332.8, 0.3, -0.3, 255.99, 1.0 / 3.0] {
            let n = 10_000;
            let exact = step * f64::from(n);
            let got = run(0.0, step, n) as f64;
            // Remainders are truncated to 1/256 unit, so the error grows by
            // less than one unit every 256 steps
            let tolerance = f64::from(n) / 256.0 + 2.0;
            assert!(
                (got - exact).abs() <= tolerance,
                "step {step}: got {got}, expected {exact}"
            );
        }
    }

    #[test]
    fn test_step_beyond_i32() {
        // Ten million source pixels per step
        let step = DdaStep::from_pixels(1e7);
        assert_eq!(step.whole(), 2_560_000_000);
        let mut axis = DdaAxis::from_pixels(0.0);
        for _ in 0..3 {
            axis.carry(&step);
            axis.advance(&step);
        }
        assert_eq!(axis.value(), 7_680_000_000);
        assert_eq!(axis.pixel(), 30_000_000);
    }

    #[test]
    fn test_invariants_hold_while_stepping() {
        let step = DdaStep::from_units(-77.123);
        let mut axis = DdaAxis::from_pixels(3.3);
        for _ in 0..1000 {
            axis.carry(&step);
            axis.advance(&step);
            assert!((0..SCALE).contains(&axis.acc()));
            assert!((0..SCALE).contains(&axis.fraction()));
        }
    }
}
