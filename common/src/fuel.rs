//! Fuel consumption from injector open time.
//!
//! Each tick works on the open time measured in the *previous* window: the
//! stored [`InjectorOpenTime`](FuelEstimator::injector_open_time) is consumed
//! first and only then replaced with the window that just closed. The
//! estimator therefore lags the injector timer by exactly one window.
//!
//! While moving, InstantFuelConsumption is L/100 km. While stationary it is
//! the hourly idle rate in L/h. Both share one field; [`ConsumptionUnit`]
//! says which one is in it.

use crate::config::{MAX_VALID_CONSUMPTION, STATIONARY_SPEED_LIMIT, TripConfig};
use crate::harmonic::HarmonicSum;

/// Unit of the current InstantFuelConsumption value.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsumptionUnit {
    /// Distance normalised, litres per 100 km.
    #[default]
    LitresPer100Km,
    /// Idle rate, litres per hour.
    LitresPerHour,
}

impl ConsumptionUnit {
    pub const fn label(self) -> &'static str {
        match self {
            Self::LitresPer100Km => "L/100",
            Self::LitresPerHour => "L/H",
        }
    }
}

/// What happened to the average on this tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FuelSample {
    /// Folded into the harmonic mean.
    Folded,
    /// Moving, but consumption outside (0, 100); average untouched.
    OutOfRange,
    /// Stationary; value is an hourly rate and not averaged.
    Stationary,
    /// Consumption had no usable reciprocal; average untouched.
    Degenerate,
}

/// Instantaneous, average and cumulative fuel figures.
#[derive(Clone, Debug)]
pub struct FuelEstimator {
    /// Litres per second of open time across all injectors.
    injector_flow: f32,
    hourly_scale: f32,
    /// Open time of the previous window in seconds, used on the next tick.
    injector_open_time: f32,
    instant: f32,
    unit: ConsumptionUnit,
    average: f32,
    sum_inv: HarmonicSum,
    used_fuel: f32,
    fuel_left: f32,
}

impl FuelEstimator {
    pub fn new(config: &TripConfig) -> Self {
        Self {
            injector_flow: config.injector_flow(),
            hourly_scale: config.hourly_scale(),
            injector_open_time: 0.0,
            instant: 0.0,
            unit: ConsumptionUnit::LitresPer100Km,
            average: 0.0,
            sum_inv: HarmonicSum::new(),
            used_fuel: 0.0,
            fuel_left: config.tank_capacity,
        }
    }

    /// Run one sampling tick.
    ///
    /// * `speed` - speed computed for this tick, km/h
    /// * `sample_count` - speed sample count after this tick's speed update
    /// * `injector_pulse_time_ms` - open time accumulated in the closed window
    pub fn update(
        &mut self,
        speed: u32,
        sample_count: u32,
        injector_pulse_time_ms: f32,
    ) -> FuelSample {
        let previous_open_time = self.injector_open_time;
        self.injector_open_time = injector_pulse_time_ms / 1000.0;

        // Litres injected in the previous window, and that as an hourly rate
        let window_volume = previous_open_time * self.injector_flow;
        let hourly_volume = window_volume * self.hourly_scale;

        self.used_fuel += window_volume;
        self.fuel_left = (self.fuel_left - window_volume).max(0.0);

        if speed <= STATIONARY_SPEED_LIMIT {
            self.instant = hourly_volume;
            self.unit = ConsumptionUnit::LitresPerHour;
            return FuelSample::Stationary;
        }

        self.instant = (100.0 * hourly_volume) / speed as f32;
        self.unit = ConsumptionUnit::LitresPer100Km;

        if !(self.instant > 0.0 && self.instant < MAX_VALID_CONSUMPTION) {
            return FuelSample::OutOfRange;
        }
        if !self.sum_inv.fold(self.instant) {
            return FuelSample::Degenerate;
        }
        if let Some(mean) = self.sum_inv.mean(sample_count) {
            self.average = mean;
        }
        FuelSample::Folded
    }

    /// Clear FuelSumInv and the average. Totals are kept.
    pub fn reset_average(&mut self) {
        self.sum_inv.reset();
        self.average = 0.0;
    }

    /// InstantFuelConsumption, in [`Self::unit`].
    #[inline]
    pub const fn instant(&self) -> f32 { self.instant }

    #[inline]
    pub const fn unit(&self) -> ConsumptionUnit { self.unit }

    /// AverageFuelConsumption, L/100 km.
    #[inline]
    pub const fn average(&self) -> f32 { self.average }

    /// InjectorOpenTime waiting for the next tick, seconds.
    #[inline]
    pub const fn injector_open_time(&self) -> f32 { self.injector_open_time }

    #[inline]
    pub const fn used_fuel(&self) -> f32 { self.used_fuel }

    #[inline]
    pub const fn fuel_left(&self) -> f32 { self.fuel_left }

    #[inline]
    pub const fn sum_inv(&self) -> f32 { self.sum_inv.sum_inv() }
}

// =============================================================================
// Unit Tests
// =============================================================================
