//! State shared between the edge handlers and the foreground loop.
//!
//! Handlers (interrupt context on the firmware, a producer thread in the
//! simulator) only touch the raw counters in [`PulseCounters`]. The sampling
//! scheduler reads them and hands the injector accumulator back to zero in a
//! single critical section, so a pulse closing between the read and the reset
//! cannot be lost.
//!
//! Distance totals are kept as edge counts and converted to kilometres on
//! read. Adding a 7e-5 km step to an `f32` stalls after a few hundred
//! kilometres; an integer count does not.

use core::cell::RefCell;
use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::distance::{DistanceAccumulator, DistanceEdge};
use crate::mode::ModeCounter;

/// Raw counters written from handler context.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PulseCounters {
    /// Distance edges in the current overflow epoch. Wraps at 16 bits.
    pub dist_pulse_count: u16,
    /// Completed 16-bit epochs while the calibration flag was set.
    pub pulse_overflows: u32,
    /// All distance edges since power-up.
    pub traveled_pulses: u64,
    /// Distance edges seen while the last consumption was not positive.
    pub sailing_pulses: u64,
    /// Injector open time accumulated since the last sample, in milliseconds.
    pub injector_pulse_time_ms: f32,
    /// Last InstantFuelConsumption published by the scheduler.
    pub instant_consumption: f32,
}

impl PulseCounters {
    pub const fn new() -> Self {
        Self {
            dist_pulse_count: 0,
            pulse_overflows: 0,
            traveled_pulses: 0,
            sailing_pulses: 0,
            injector_pulse_time_ms: 0.0,
            instant_consumption: 0.0,
        }
    }
}

impl Default for PulseCounters {
    fn default() -> Self { Self::new() }
}

/// What the scheduler sees at a sampling tick.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindowSample {
    pub dist_pulse_count: u16,
    pub pulse_overflows: u32,
    pub traveled_pulses: u64,
    pub sailing_pulses: u64,
    /// Injector open time of the closed window, in milliseconds.
    pub injector_pulse_time_ms: f32,
}

/// Trip computer state shared across execution contexts.
///
/// Construct once at startup. Firmware keeps it in a `static`; tests and the
/// simulator may own it locally.
pub struct TripShared {
    counters: Mutex<CriticalSectionRawMutex, RefCell<PulseCounters>>,
    calibration: AtomicBool,
    mode: ModeCounter,
}

impl TripShared {
    pub const fn new() -> Self {
        Self {
            counters: Mutex::new(RefCell::new(PulseCounters::new())),
            calibration: AtomicBool::new(false),
            mode: ModeCounter::new(),
        }
    }

    /// Run `f` on the counters inside a critical section.
    ///
    /// Keep `f` short: interrupts are masked while it runs.
    pub fn with_counters<R>(
        &self,
        f: impl FnOnce(&mut PulseCounters) -> R,
    ) -> R {
        self.counters.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Copy of the counters without resetting anything.
    pub fn snapshot(&self) -> PulseCounters { self.with_counters(|counters| *counters) }

    /// Read the window and zero the injector accumulator in one step.
    pub fn sample_window(&self) -> WindowSample {
        self.with_counters(|counters| {
            let sample = WindowSample {
                dist_pulse_count: counters.dist_pulse_count,
                pulse_overflows: counters.pulse_overflows,
                traveled_pulses: counters.traveled_pulses,
                sailing_pulses: counters.sailing_pulses,
                injector_pulse_time_ms: counters.injector_pulse_time_ms,
            };
            counters.injector_pulse_time_ms = 0.0;
            sample
        })
    }

    /// Apply one distance edge. See [`DistanceAccumulator`].
    #[inline]
    pub fn record_distance_edge(&self) -> DistanceEdge { DistanceAccumulator::on_edge(self) }

    /// Credit a closed injector pulse to the current window.
    pub fn add_injector_open_time(
        &self,
        open_ms: f32,
    ) {
        self.with_counters(|counters| counters.injector_pulse_time_ms += open_ms);
    }

    /// Hand the latest InstantFuelConsumption to the distance handler.
    pub fn publish_instant_consumption(
        &self,
        consumption: f32,
    ) {
        self.with_counters(|counters| counters.instant_consumption = consumption);
    }

    /// Set the calibration flag that gates overflow counting.
    pub fn set_calibration(
        &self,
        enabled: bool,
    ) {
        self.calibration.store(enabled, Ordering::Relaxed);
    }

    /// Flip the calibration flag, returning the new value.
    pub fn toggle_calibration(&self) -> bool { !self.calibration.fetch_xor(true, Ordering::Relaxed) }

    #[inline]
    pub fn calibration(&self) -> bool { self.calibration.load(Ordering::Relaxed) }

    /// Display mode selector, advanced by the mode button.
    #[inline]
    pub const fn mode(&self) -> &ModeCounter { &self.mode }
}

impl Default for TripShared {
    fn default() -> Self { Self::new() }
}

/// Convert an edge count to kilometres.
#[inline]
pub fn pulses_to_distance(
    pulses: u64,
    pulse_distance: f32,
) -> f32 {
    (pulses as f64 * f64::from(pulse_distance)) as f32
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_zero() {
        let shared = TripShared::new();
        assert_eq!(shared.snapshot(), PulseCounters::new());
        assert!(!shared.calibration());
    }

    #[test]
    fn test_sample_window_resets_only_injector_time() {
        let shared = TripShared::new();
        shared.with_counters(|c| {
            c.dist_pulse_count = 42;
            c.traveled_pulses = 42;
            c.injector_pulse_time_ms = 12.5;
        });

        let sample = shared.sample_window();
        assert_eq!(sample.dist_pulse_count, 42);
        assert_eq!(sample.injector_pulse_time_ms, 12.5);

        let after = shared.snapshot();
        assert_eq!(after.dist_pulse_count, 42);
        assert_eq!(after.traveled_pulses, 42);
        assert_eq!(after.injector_pulse_time_ms, 0.0);
    }

    #[test]
    fn test_add_injector_open_time_accumulates() {
        let shared = TripShared::new();
        shared.add_injector_open_time(1.5);
        shared.add_injector_open_time(2.0);
        assert_eq!(shared.snapshot().injector_pulse_time_ms, 3.5);
    }

    #[test]
    fn test_record_distance_edge() {
        let shared = TripShared::new();
        let edge = shared.record_distance_edge();
        assert_eq!(edge.pulse_count, 1);
        assert_eq!(shared.snapshot().traveled_pulses, 1);
    }

    #[test]
    fn test_publish_instant_consumption() {
        let shared = TripShared::new();
        shared.publish_instant_consumption(7.5);
        assert_eq!(shared.snapshot().instant_consumption, 7.5);
    }

    #[test]
    fn test_toggle_calibration() {
        let shared = TripShared::new();
        assert!(shared.toggle_calibration());
        assert!(shared.calibration());
        assert!(!shared.toggle_calibration());
        shared.set_calibration(true);
        assert!(shared.calibration());
    }

    #[test]
    fn test_pulses_to_distance() {
        assert_eq!(pulses_to_distance(0, 0.5), 0.0);
        assert!((pulses_to_distance(10, 0.000_068_23) - 0.000_682_3).abs() < 1e-9);
        // Large counts stay accurate where repeated f32 addition would stall
        let km = pulses_to_distance(20_000_000, 0.000_068_23);
        assert!((km - 1364.6).abs() < 0.01);
    }
}
