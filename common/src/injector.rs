//! Injector open-time measurement.
//!
//! The injector drive line idles high and is pulled low while the injector is
//! open. A falling edge records the pulse start, the next rising edge adds
//! the elapsed time to the shared accumulator. A pulse that straddles a
//! sampling tick is credited in full to the window it closes in.

use crate::shared::TripShared;

/// Per-line state owned by the injector edge handler.
#[derive(Clone, Copy, Debug, Default)]
pub struct InjectorPulseTimer {
    /// Timestamp (µs) of the falling edge of the pulse in progress.
    pulse_start_us: Option<u64>,
}

impl InjectorPulseTimer {
    pub const fn new() -> Self { Self { pulse_start_us: None } }

    /// Handle one injector edge.
    ///
    /// `line_low` is the line level after the edge, `now_us` a monotonic
    /// timestamp in microseconds. Returns the pulse duration in milliseconds
    /// when this edge closed a pulse.
    ///
    /// A rising edge without a recorded start (e.g. the first edge after boot)
    /// is ignored. So is a pulse that already closed when the caller read the
    /// level of its falling edge. A repeated falling edge restarts the pulse.
    pub fn on_edge(
        &mut self,
        shared: &TripShared,
        line_low: bool,
        now_us: u64,
    ) -> Option<f32> {
        if line_low {
            self.pulse_start_us = Some(now_us);
            return None;
        }

        let start = self.pulse_start_us.take()?;
        let open_ms = now_us.saturating_sub(start) as f32 / 1000.0;
        shared.add_injector_open_time(open_ms);
        Some(open_ms)
    }

    /// True while a pulse is open.
    #[inline]
    pub const fn is_open(&self) -> bool { self.pulse_start_us.is_some() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pulse_accumulates_milliseconds() {
        let shared = TripShared::new();
        let mut timer = InjectorPulseTimer::new();

        assert_eq!(timer.on_edge(&shared, true, 1_000), None);
        assert!(timer.is_open());
        let open = timer.on_edge(&shared, false, 3_500).unwrap();

        assert!((open - 2.5).abs() < 1e-6);
        assert!(!timer.is_open());
        assert!((shared.snapshot().injector_pulse_time_ms - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_pulses_accumulate_within_window() {
        let shared = TripShared::new();
        let mut timer = InjectorPulseTimer::new();

        for i in 0..4u64 {
            let start = i * 20_000;
            timer.on_edge(&shared, true, start);
            timer.on_edge(&shared, false, start + 2_000);
        }

        assert!((shared.snapshot().injector_pulse_time_ms - 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_rising_edge_without_start_is_ignored() {
        let shared = TripShared::new();
        let mut timer = InjectorPulseTimer::new();

        assert_eq!(timer.on_edge(&shared, false, 5_000), None);
        assert_eq!(shared.snapshot().injector_pulse_time_ms, 0.0);
    }

    #[test]
    fn test_pulse_closed_before_level_read_is_dropped() {
        let shared = TripShared::new();
        let mut timer = InjectorPulseTimer::new();

        // Both edges of a short pulse read back high
        assert_eq!(timer.on_edge(&shared, false, 1_000), None);
        assert_eq!(timer.on_edge(&shared, false, 1_050), None);
        assert!(!timer.is_open());
        assert_eq!(shared.snapshot().injector_pulse_time_ms, 0.0);

        timer.on_edge(&shared, true, 20_000);
        let open = timer.on_edge(&shared, false, 22_000).unwrap();
        assert!((open - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_pulse_spanning_sample_credits_closing_window() {
        let shared = TripShared::new();
        let mut timer = InjectorPulseTimer::new();

        timer.on_edge(&shared, true, 10_000);
        let first = shared.sample_window();
        assert_eq!(first.injector_pulse_time_ms, 0.0);

        timer.on_edge(&shared, false, 13_000);
        let second = shared.sample_window();
        assert!((second.injector_pulse_time_ms - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_repeated_falling_edge_restarts_pulse() {
        let shared = TripShared::new();
        let mut timer = InjectorPulseTimer::new();

        timer.on_edge(&shared, true, 0);
        timer.on_edge(&shared, true, 4_000);
        let open = timer.on_edge(&shared, false, 5_000).unwrap();
        assert!((open - 1.0).abs() < 1e-6);
    }
}
