//! Vehicle speed from distance pulses per sampling window.
//!
//! `speed = distance_factor * pulses * 3600 / window_seconds`, where the
//! distance factor is `floor(pulse_distance)` under the default
//! [`SpeedScaling::Truncated`](crate::config::SpeedScaling). Samples above
//! [`STATIONARY_SPEED_LIMIT`] feed a harmonic mean and the maximum.

use crate::config::{SECONDS_PER_HOUR, STATIONARY_SPEED_LIMIT, SpeedScaling, TICK_PERIOD_MS, TripConfig};
use crate::harmonic::HarmonicSum;

/// Conversion from window pulses to km/h.
#[derive(Clone, Copy, PartialEq, Debug)]
enum WindowScale {
    /// Whole kilometres per pulse, computed in integers and saturating at `u32::MAX`.
    Whole { km_per_pulse: u64, window_ms: u64 },
    /// km/h per pulse.
    Exact(f32),
}

impl WindowScale {
    fn new(config: &TripConfig) -> Self {
        match config.speed_scaling {
            // `as` saturates; the factor is already floored
            SpeedScaling::Truncated => Self::Whole {
                km_per_pulse: config.speed_distance_factor() as u64,
                window_ms: (u64::from(config.window_ticks) * TICK_PERIOD_MS).max(1),
            },
            SpeedScaling::Exact => Self::Exact(config.speed_distance_factor() * config.hourly_scale()),
        }
    }

    fn speed(
        self,
        pulses: u16,
    ) -> u32 {
        match self {
            Self::Whole { km_per_pulse, window_ms } => {
                let km_per_hour = km_per_pulse
                    .saturating_mul(u64::from(pulses))
                    .saturating_mul(SECONDS_PER_HOUR as u64 * 1000)
                    / window_ms;
                u32::try_from(km_per_hour).unwrap_or(u32::MAX)
            }
            // `as` saturates and maps NaN to 0
            Self::Exact(per_pulse) => (per_pulse * f32::from(pulses)) as u32,
        }
    }
}

/// What happened to the average on this tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpeedSample {
    /// Sample counted and folded into the average.
    Folded,
    /// At or below the stationary limit; average untouched.
    Stationary,
    /// Speed had no usable reciprocal; average untouched.
    Degenerate,
}

impl SpeedSample {
    #[inline]
    pub const fn is_folded(self) -> bool { matches!(self, Self::Folded) }
}

/// Instantaneous and harmonic-mean speed.
#[derive(Clone, Debug)]
pub struct SpeedEstimator {
    scale: WindowScale,
    speed: u32,
    sample_count: u32,
    sum_inv: HarmonicSum,
    avg_speed: u32,
    max_speed: u32,
}

impl SpeedEstimator {
    pub fn new(config: &TripConfig) -> Self {
        Self {
            scale: WindowScale::new(config),
            speed: 0,
            sample_count: 0,
            sum_inv: HarmonicSum::new(),
            avg_speed: 0,
            max_speed: 0,
        }
    }

    /// Recompute speed from the pulses counted in the closed window.
    pub fn update(
        &mut self,
        window_pulses: u16,
    ) -> SpeedSample {
        self.speed = self.scale.speed(window_pulses);

        if self.speed <= STATIONARY_SPEED_LIMIT {
            return SpeedSample::Stationary;
        }
        if !self.sum_inv.fold(self.speed as f32) {
            return SpeedSample::Degenerate;
        }

        self.sample_count += 1;
        if let Some(mean) = self.sum_inv.mean(self.sample_count) {
            self.avg_speed = mean as u32;
        }
        self.max_speed = self.max_speed.max(self.speed);
        SpeedSample::Folded
    }

    /// Clear the harmonic mean, its sample count and the maximum.
    pub fn reset_average(&mut self) {
        self.sample_count = 0;
        self.sum_inv.reset();
        self.avg_speed = 0;
        self.max_speed = 0;
    }

    /// Speed of the last window, km/h.
    #[inline]
    pub const fn speed(&self) -> u32 { self.speed }

    /// Harmonic mean of folded speeds (AvgSpeedCount).
    #[inline]
    pub const fn avg_speed(&self) -> u32 { self.avg_speed }

    #[inline]
    pub const fn max_speed(&self) -> u32 { self.max_speed }

    /// Folded samples so far. Shared with the fuel average.
    #[inline]
    pub const fn sample_count(&self) -> u32 { self.sample_count }

    #[inline]
    pub const fn sum_inv(&self) -> f32 { self.sum_inv.sum_inv() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpeedScaling;

    fn unit_pulse_config() -> TripConfig {
        TripConfig {
            pulse_distance: 1.0,
            ..TripConfig::default()
        }
    }

    #[test]
    fn test_truncated_sub_unity_distance_reads_zero() {
        let mut speed = SpeedEstimator::new(&TripConfig::default());
        assert_eq!(speed.update(1_000), SpeedSample::Stationary);
        assert_eq!(speed.speed(), 0);
    }

    #[test]
    fn test_speed_formula() {
        let config = TripConfig {
            pulse_distance: 2.5,
            ..TripConfig::default()
        };
        let mut speed = SpeedEstimator::new(&config);
        speed.update(3);
        // floor(2.5) * 3 * 3600
        assert_eq!(speed.speed(), 2 * 3 * 3600);
    }

    #[test]
    fn test_whole_factor_is_exact_for_full_counter_range() {
        let config = TripConfig {
            pulse_distance: 3.0,
            ..TripConfig::default()
        };
        let mut speed = SpeedEstimator::new(&config);
        speed.update(u16::MAX);
        assert_eq!(speed.speed(), 707_778_000);

        let config = TripConfig {
            pulse_distance: 5.5,
            ..TripConfig::default()
        };
        let mut speed = SpeedEstimator::new(&config);
        speed.update(60_001);
        assert_eq!(speed.speed(), 1_080_018_000);
    }

    #[test]
    fn test_whole_factor_saturates() {
        let config = TripConfig {
            pulse_distance: 1.0e6,
            ..TripConfig::default()
        };
        let mut speed = SpeedEstimator::new(&config);
        assert_eq!(speed.update(u16::MAX), SpeedSample::Folded);
        assert_eq!(speed.speed(), u32::MAX);
    }

    #[test]
    fn test_whole_factor_with_longer_window() {
        // Six ticks: 1.5 s window, 2400 km/h per km-pulse
        let config = TripConfig {
            pulse_distance: 1.0,
            window_ticks: 6,
            ..TripConfig::default()
        };
        let mut speed = SpeedEstimator::new(&config);
        speed.update(7);
        assert_eq!(speed.speed(), 7 * 2400);
    }

    #[test]
    fn test_exact_scaling() {
        let config = TripConfig::default().with_speed_scaling(SpeedScaling::Exact);
        let mut speed = SpeedEstimator::new(&config);
        // 244 pulses of 0.06823 m in one second ≈ 59.9 km/h
        speed.update(244);
        assert_eq!(speed.speed(), 59);
    }

    #[test]
    fn test_stationary_excluded_from_average() {
        // 1 m per pulse: 3.6 km/h per pulse in a one second window
        let config = TripConfig {
            pulse_distance: 0.001,
            ..TripConfig::default()
        }
        .with_speed_scaling(SpeedScaling::Exact);
        let mut speed = SpeedEstimator::new(&config);

        assert_eq!(speed.update(17), SpeedSample::Folded);
        assert_eq!(speed.speed(), 61);
        assert_eq!(speed.avg_speed(), 61);

        assert_eq!(speed.update(1), SpeedSample::Stationary);
        assert_eq!(speed.speed(), 3);
        assert_eq!(speed.avg_speed(), 61);
        assert_eq!(speed.sample_count(), 1);
    }

    #[test]
    fn test_zero_pulses_never_divides() {
        let mut speed = SpeedEstimator::new(&unit_pulse_config());
        assert_eq!(speed.update(0), SpeedSample::Stationary);
        assert_eq!(speed.sum_inv(), 0.0);
        assert_eq!(speed.avg_speed(), 0);
    }

    #[test]
    fn test_harmonic_average_and_max() {
        let mut speed = SpeedEstimator::new(&unit_pulse_config());

        speed.update(2);
        speed.update(3);
        assert_eq!(speed.sample_count(), 2);
        // 2 / (1/7200 + 1/10800) = 8640
        assert!((8639..=8640).contains(&speed.avg_speed()));
        assert_eq!(speed.max_speed(), 10_800);
    }

    #[test]
    fn test_reset_average() {
        let mut speed = SpeedEstimator::new(&unit_pulse_config());
        speed.update(1);
        assert_eq!(speed.sample_count(), 1);

        speed.reset_average();
        assert_eq!(speed.sample_count(), 0);
        assert_eq!(speed.avg_speed(), 0);
        assert_eq!(speed.max_speed(), 0);
        assert_eq!(speed.sum_inv(), 0.0);
    }
}
