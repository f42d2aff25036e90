//! Running reciprocal sum for harmonic means.
//!
//! Speed and consumption are rates; over equal-distance windows their mean is
//! `n / Σ(1/x)`. The sum never resets on its own, so long trips accumulate
//! float drift. [`HarmonicSum::reset`] is there for callers that want a fresh
//! average.
//!
//! The sample count is not stored here: the fuel average shares the speed
//! sample count.

/// Σ(1/x) over folded samples.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct HarmonicSum {
    sum_inv: f32,
}

impl HarmonicSum {
    pub const fn new() -> Self { Self { sum_inv: 0.0 } }

    /// Fold `value` into the sum. Returns `false` and leaves the sum untouched
    /// when `value` has no usable reciprocal (zero, negative, non-finite).
    pub fn fold(
        &mut self,
        value: f32,
    ) -> bool {
        if !(value.is_finite() && value > 0.0) {
            return false;
        }
        let inv = 1.0 / value;
        if !inv.is_finite() {
            return false;
        }
        self.sum_inv += inv;
        true
    }

    /// `count / Σ(1/x)`, or `None` before the first fold.
    pub fn mean(
        &self,
        count: u32,
    ) -> Option<f32> {
        if count == 0 || self.sum_inv <= 0.0 {
            return None;
        }
        Some(count as f32 / self.sum_inv)
    }

    #[inline]
    pub const fn sum_inv(&self) -> f32 { self.sum_inv }

    pub fn reset(&mut self) { self.sum_inv = 0.0; }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_has_no_mean() {
        let sum = HarmonicSum::new();
        assert!(sum.mean(0).is_none());
        assert!(sum.mean(3).is_none());
    }

    #[test]
    fn test_harmonic_mean_of_two_speeds() {
        // Same distance at 40 and 60 km/h averages to 48 km/h
        let mut sum = HarmonicSum::new();
        assert!(sum.fold(40.0));
        assert!(sum.fold(60.0));
        assert!((sum.mean(2).unwrap() - 48.0).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_values_rejected() {
        let mut sum = HarmonicSum::new();
        assert!(!sum.fold(0.0));
        assert!(!sum.fold(-3.0));
        assert!(!sum.fold(f32::NAN));
        assert!(!sum.fold(f32::INFINITY));
        assert!(!sum.fold(f32::MIN_POSITIVE / 4.0));
        assert_eq!(sum.sum_inv(), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut sum = HarmonicSum::new();
        sum.fold(10.0);
        sum.reset();
        assert_eq!(sum.sum_inv(), 0.0);
        assert!(sum.mean(1).is_none());
    }
}
