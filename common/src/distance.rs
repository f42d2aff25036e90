//! Distance edge accounting.
//!
//! Every edge on the distance line (both directions) is one pulse. Distance
//! totals advance on the edge itself, independent of the sampling scheduler.

use crate::shared::{PulseCounters, TripShared};

/// Result of a single distance edge.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DistanceEdge {
    /// DistPulseCount after this edge.
    pub pulse_count: u16,
    /// True when this edge completed a counted 16-bit epoch.
    pub epoch_completed: bool,
    /// True when the edge was also credited to the sailing distance.
    pub sailing: bool,
}

/// Distance edge handler.
pub struct DistanceAccumulator;

impl DistanceAccumulator {
    /// Handle one distance edge.
    pub fn on_edge(shared: &TripShared) -> DistanceEdge {
        let calibrating = shared.calibration();
        shared.with_counters(|counters| Self::record(counters, calibrating))
    }

    /// Apply one edge to the counters. Must run inside the critical section.
    pub fn record(
        counters: &mut PulseCounters,
        calibrating: bool,
    ) -> DistanceEdge {
        counters.dist_pulse_count = counters.dist_pulse_count.wrapping_add(1);

        // Reaching the top of the range closes the epoch; the next edge wraps to 0.
        let epoch_completed = calibrating && counters.dist_pulse_count == u16::MAX;
        if epoch_completed {
            counters.pulse_overflows = counters.pulse_overflows.saturating_add(1);
        }

        counters.traveled_pulses += 1;
        let sailing = counters.instant_consumption <= 0.0;
        if sailing {
            counters.sailing_pulses += 1;
        }

        DistanceEdge {
            pulse_count: counters.dist_pulse_count,
            epoch_completed,
            sailing,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PULSE_DISTANCE;
    use crate::shared::pulses_to_distance;

    #[test]
    fn test_ten_edges_without_calibration() {
        let shared = TripShared::new();
        for _ in 0..10 {
            DistanceAccumulator::on_edge(&shared);
        }

        let counters = shared.snapshot();
        assert_eq!(counters.dist_pulse_count, 10);
        assert_eq!(counters.pulse_overflows, 0);
        let traveled = pulses_to_distance(counters.traveled_pulses, PULSE_DISTANCE);
        assert!((traveled - 0.000_682_3).abs() < 1e-9);
    }

    #[test]
    fn test_sailing_only_when_not_consuming() {
        let shared = TripShared::new();

        // Nothing computed yet: consumption is 0, so the car is coasting
        assert!(DistanceAccumulator::on_edge(&shared).sailing);

        shared.publish_instant_consumption(6.2);
        assert!(!DistanceAccumulator::on_edge(&shared).sailing);

        shared.publish_instant_consumption(0.0);
        assert!(DistanceAccumulator::on_edge(&shared).sailing);

        let counters = shared.snapshot();
        assert_eq!(counters.traveled_pulses, 3);
        assert_eq!(counters.sailing_pulses, 2);
    }

    #[test]
    fn test_overflow_counted_with_calibration() {
        let mut counters = PulseCounters::new();
        counters.dist_pulse_count = u16::MAX - 1;

        let edge = DistanceAccumulator::record(&mut counters, true);
        assert!(edge.epoch_completed);
        assert_eq!(edge.pulse_count, u16::MAX);
        assert_eq!(counters.pulse_overflows, 1);

        let edge = DistanceAccumulator::record(&mut counters, true);
        assert!(!edge.epoch_completed);
        assert_eq!(edge.pulse_count, 0);
        assert_eq!(counters.pulse_overflows, 1);
    }

    #[test]
    fn test_overflow_ignored_without_calibration() {
        let mut counters = PulseCounters::new();
        counters.dist_pulse_count = u16::MAX - 1;

        let edge = DistanceAccumulator::record(&mut counters, false);
        assert!(!edge.epoch_completed);
        DistanceAccumulator::record(&mut counters, false);

        assert_eq!(counters.dist_pulse_count, 0);
        assert_eq!(counters.pulse_overflows, 0);
        assert_eq!(counters.traveled_pulses, 2);
    }
}
