//! Trip computer configuration.
//!
//! All physical constants are compile-time values with `const` assertions,
//! so an impossible calibration fails the build instead of producing garbage
//! on the road. [`TripConfig`] bundles the subset that can be tuned at
//! startup (e.g. the simulator switches to [`SpeedScaling::Exact`]).

use thiserror::Error;

// =============================================================================
// Sensor Constants
// =============================================================================

/// Distance represented by one distance-sensor edge, in kilometres.
pub const PULSE_DISTANCE: f32 = 0.000_068_23;

/// Injector flow constant: litres per second of open time, per injector.
pub const INJECTION_VALUE: f32 = 0.0025;

/// Number of injectors driven by the measured signal.
pub const INJECTOR_COUNT: u8 = 6;

/// Fuel tank capacity in litres. FuelLeft starts here.
pub const TANK_CAPACITY: f32 = 68.0;

const _: () = assert!(PULSE_DISTANCE > 0.0);
const _: () = assert!(INJECTION_VALUE > 0.0);
const _: () = assert!(INJECTOR_COUNT > 0);
const _: () = assert!(TANK_CAPACITY > 0.0);

// =============================================================================
// Sampling Window
// =============================================================================

/// Foreground loop period in milliseconds.
pub const TICK_PERIOD_MS: u64 = 250;

/// Foreground ticks per sampling window.
pub const SAMPLE_WINDOW_TICKS: u8 = 4;

/// Seconds per hour, used to extrapolate per-window values to hourly rates.
pub const SECONDS_PER_HOUR: f32 = 3600.0;

// The speed formula (`pulses * distance * 3600`) assumes a one second window.
const _: () = assert!(TICK_PERIOD_MS * SAMPLE_WINDOW_TICKS as u64 == 1000);

// =============================================================================
// Estimator Thresholds
// =============================================================================

/// Speeds at or below this value (km/h) count as stationary and are excluded
/// from both harmonic means.
pub const STATIONARY_SPEED_LIMIT: u32 = 5;

/// Upper bound (exclusive) for a consumption sample to enter the average.
pub const MAX_VALID_CONSUMPTION: f32 = 100.0;

/// Consumption above this value is shown as a placeholder.
pub const MAX_DISPLAY_CONSUMPTION: f32 = 99.0;

const _: () = assert!(MAX_DISPLAY_CONSUMPTION < MAX_VALID_CONSUMPTION);

// =============================================================================
// Runtime Configuration
// =============================================================================

/// How the per-pulse distance enters the speed formula.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpeedScaling {
    /// `floor(pulse_distance)`, as the original firmware computes it.
    /// With a sub-unity pulse distance every speed reads zero.
    #[default]
    Truncated,
    /// Uses the pulse distance as-is.
    Exact,
}

/// Startup-tunable trip computer parameters.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TripConfig {
    /// Kilometres per distance edge.
    pub pulse_distance: f32,
    /// Litres per second of injector open time, per injector.
    pub injection_value: f32,
    /// Injectors driven by the measured signal.
    pub injector_count: u8,
    /// Foreground ticks per sampling window.
    pub window_ticks: u8,
    /// Initial FuelLeft in litres.
    pub tank_capacity: f32,
    pub speed_scaling: SpeedScaling,
}

impl TripConfig {
    /// Configuration built from the compile-time constants.
    pub const fn new() -> Self {
        Self {
            pulse_distance: PULSE_DISTANCE,
            injection_value: INJECTION_VALUE,
            injector_count: INJECTOR_COUNT,
            window_ticks: SAMPLE_WINDOW_TICKS,
            tank_capacity: TANK_CAPACITY,
            speed_scaling: SpeedScaling::Truncated,
        }
    }

    /// Same configuration with a different speed scaling.
    pub const fn with_speed_scaling(
        mut self,
        scaling: SpeedScaling,
    ) -> Self {
        self.speed_scaling = scaling;
        self
    }

    /// Check that every constant is usable by the estimators.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.pulse_distance.is_finite() && self.pulse_distance > 0.0) {
            return Err(ConfigError::PulseDistance(self.pulse_distance));
        }
        if !(self.injection_value.is_finite() && self.injection_value > 0.0) {
            return Err(ConfigError::InjectionValue(self.injection_value));
        }
        if self.injector_count == 0 {
            return Err(ConfigError::NoInjectors);
        }
        if self.window_ticks == 0 {
            return Err(ConfigError::EmptyWindow);
        }
        if !(self.tank_capacity.is_finite() && self.tank_capacity >= 0.0) {
            return Err(ConfigError::TankCapacity(self.tank_capacity));
        }
        Ok(())
    }

    /// Distance factor used by the speed formula.
    pub fn speed_distance_factor(&self) -> f32 {
        match self.speed_scaling {
            SpeedScaling::Truncated => micromath::F32(self.pulse_distance).floor().0,
            SpeedScaling::Exact => self.pulse_distance,
        }
    }

    /// Sampling window length in seconds.
    pub fn window_seconds(&self) -> f32 { f32::from(self.window_ticks) * TICK_PERIOD_MS as f32 / 1000.0 }

    /// Factor turning a per-window quantity into a per-hour rate.
    pub fn hourly_scale(&self) -> f32 { SECONDS_PER_HOUR / self.window_seconds() }

    /// Litres per second of open time across all injectors.
    pub fn injector_flow(&self) -> f32 { self.injection_value * f32::from(self.injector_count) }
}

impl Default for TripConfig {
    fn default() -> Self { Self::new() }
}

/// Rejected configuration values.
#[derive(Error, Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    #[error("pulse distance must be positive and finite, got {0}")]
    PulseDistance(f32),
    #[error("injection value must be positive and finite, got {0}")]
    InjectionValue(f32),
    #[error("at least one injector is required")]
    NoInjectors,
    #[error("sampling window must span at least one tick")]
    EmptyWindow,
    #[error("tank capacity must be non-negative and finite, got {0}")]
    TankCapacity(f32),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let config = TripConfig::default();
        assert_eq!(config.pulse_distance, PULSE_DISTANCE);
        assert_eq!(config.injector_count, 6);
        assert_eq!(config.window_ticks, 4);
        assert_eq!(config.speed_scaling, SpeedScaling::Truncated);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_truncated_factor_floors_sub_unity_distance() {
        let config = TripConfig::default();
        assert_eq!(config.speed_distance_factor(), 0.0);

        let config = TripConfig {
            pulse_distance: 1.75,
            ..TripConfig::default()
        };
        assert_eq!(config.speed_distance_factor(), 1.0);
    }

    #[test]
    fn test_exact_factor_keeps_distance() {
        let config = TripConfig::default().with_speed_scaling(SpeedScaling::Exact);
        assert_eq!(config.speed_distance_factor(), PULSE_DISTANCE);
    }

    #[test]
    fn test_injector_flow() {
        let config = TripConfig::default();
        assert!((config.injector_flow() - 0.015).abs() < 1e-7);
    }

    #[test]
    fn test_default_window_is_one_second() {
        let config = TripConfig::default();
        assert_eq!(config.window_seconds(), 1.0);
        assert_eq!(config.hourly_scale(), 3600.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = TripConfig {
            pulse_distance: 0.0,
            ..TripConfig::default()
        };
        assert_eq!(bad.validate(), Err(ConfigError::PulseDistance(0.0)));

        let bad = TripConfig {
            injection_value: f32::NAN,
            ..TripConfig::default()
        };
        assert!(matches!(bad.validate(), Err(ConfigError::InjectionValue(_))));

        let bad = TripConfig {
            injector_count: 0,
            ..TripConfig::default()
        };
        assert_eq!(bad.validate(), Err(ConfigError::NoInjectors));

        let bad = TripConfig {
            window_ticks: 0,
            ..TripConfig::default()
        };
        assert_eq!(bad.validate(), Err(ConfigError::EmptyWindow));

        let bad = TripConfig {
            tank_capacity: -1.0,
            ..TripConfig::default()
        };
        assert_eq!(bad.validate(), Err(ConfigError::TankCapacity(-1.0)));
    }
}
