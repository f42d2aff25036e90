//! Foreground sampling loop state.
//!
//! The foreground loop calls [`SamplingScheduler::tick`] once per
//! [`TICK_PERIOD_MS`](crate::config::TICK_PERIOD_MS). A countdown reloaded to
//! `window_ticks` decides which ticks sample: on those the scheduler takes the
//! window from [`TripShared`], runs the speed estimator and then the fuel
//! estimator, and publishes the new consumption for the distance handler.
//!
//! ```text
//!   COUNTING --(countdown hits 0)--> SAMPLING --(reload)--> COUNTING
//! ```

use crate::config::{ConfigError, TripConfig};
use crate::fuel::{FuelEstimator, FuelSample};
use crate::metrics::{MetricsSink, MetricsView, TripMetrics};
use crate::mode::DisplayMode;
use crate::shared::{TripShared, pulses_to_distance};
use crate::speed::{SpeedEstimator, SpeedSample};

/// Result of one foreground tick.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Still inside the window.
    Counting { remaining: u8 },
    /// The window closed and the estimators ran.
    Sampled(SampleReport),
}

/// What a sampling tick did, for logging by the caller.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleReport {
    pub metrics: TripMetrics,
    pub speed: SpeedSample,
    pub fuel: FuelSample,
    /// PulseOverflows epochs completed since the previous sample.
    pub new_overflow_epochs: u32,
}

/// Countdown plus the estimators it drives.
#[derive(Clone, Debug)]
pub struct SamplingScheduler {
    config: TripConfig,
    countdown: u8,
    /// DistPulseCount at the previous sample.
    last_pulse_count: u16,
    last_overflows: u32,
    speed: SpeedEstimator,
    fuel: FuelEstimator,
    metrics: TripMetrics,
}

impl SamplingScheduler {
    pub fn new(config: TripConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let fuel = FuelEstimator::new(&config);
        let metrics = TripMetrics {
            fuel_left: fuel.fuel_left(),
            ..TripMetrics::default()
        };

        Ok(Self {
            config,
            countdown: config.window_ticks,
            last_pulse_count: 0,
            last_overflows: 0,
            speed: SpeedEstimator::new(&config),
            fuel,
            metrics,
        })
    }

    /// Advance the countdown by one tick, sampling when it runs out.
    pub fn tick(
        &mut self,
        shared: &TripShared,
    ) -> TickOutcome {
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown > 0 {
            return TickOutcome::Counting { remaining: self.countdown };
        }

        self.countdown = self.config.window_ticks;
        TickOutcome::Sampled(self.sample(shared))
    }

    /// One full foreground step: tick, then show the view for the current mode.
    pub fn step(
        &mut self,
        shared: &TripShared,
        sink: &mut impl MetricsSink,
    ) -> TickOutcome {
        let outcome = self.tick(shared);
        sink.show(&self.view(shared.mode().current()));
        outcome
    }

    fn sample(
        &mut self,
        shared: &TripShared,
    ) -> SampleReport {
        let window = shared.sample_window();

        let window_pulses = window.dist_pulse_count.wrapping_sub(self.last_pulse_count);
        self.last_pulse_count = window.dist_pulse_count;

        let new_overflow_epochs = window.pulse_overflows.wrapping_sub(self.last_overflows);
        self.last_overflows = window.pulse_overflows;

        // Fuel runs second: it needs this tick's speed and sample count. The
        // count already includes this window's speed fold.
        let speed = self.speed.update(window_pulses);
        let fuel = self.fuel.update(
            self.speed.speed(),
            self.speed.sample_count(),
            window.injector_pulse_time_ms,
        );
        shared.publish_instant_consumption(self.fuel.instant());

        self.metrics = TripMetrics {
            speed: self.speed.speed(),
            avg_speed: self.speed.avg_speed(),
            max_speed: self.speed.max_speed(),
            instant_consumption: self.fuel.instant(),
            consumption_unit: self.fuel.unit(),
            avg_consumption: self.fuel.average(),
            used_fuel: self.fuel.used_fuel(),
            fuel_left: self.fuel.fuel_left(),
            traveled_distance: pulses_to_distance(window.traveled_pulses, self.config.pulse_distance),
            sailing_distance: pulses_to_distance(window.sailing_pulses, self.config.pulse_distance),
            dist_pulse_count: window.dist_pulse_count,
            pulse_overflows: window.pulse_overflows,
            window_pulses,
            injector_open_time: self.fuel.injector_open_time(),
            sample_count: self.speed.sample_count(),
        };

        SampleReport {
            metrics: self.metrics,
            speed,
            fuel,
            new_overflow_epochs,
        }
    }

    /// Clear both harmonic means and the maximum speed. Totals are kept.
    pub fn reset_averages(&mut self) {
        self.speed.reset_average();
        self.fuel.reset_average();
        self.metrics.avg_speed = 0;
        self.metrics.max_speed = 0;
        self.metrics.avg_consumption = 0.0;
        self.metrics.sample_count = 0;
    }

    /// Metrics from the last sampling tick.
    #[inline]
    pub const fn metrics(&self) -> &TripMetrics { &self.metrics }

    #[inline]
    pub const fn view(
        &self,
        mode: DisplayMode,
    ) -> MetricsView {
        self.metrics.view(mode)
    }

    /// Ticks left before the next sample.
    #[inline]
    pub const fn remaining(&self) -> u8 { self.countdown }

    #[inline]
    pub const fn config(&self) -> &TripConfig { &self.config }

    #[inline]
    pub const fn speed_estimator(&self) -> &SpeedEstimator { &self.speed }

    #[inline]
    pub const fn fuel_estimator(&self) -> &FuelEstimator { &self.fuel }
}

// =============================================================================
// Unit Tests
// =============================================================================
