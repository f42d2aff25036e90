//! Computed trip metrics and the per-mode views handed to the display.

use crate::fuel::ConsumptionUnit;
use crate::mode::DisplayMode;

/// Everything the scheduler derived at the last sampling tick.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TripMetrics {
    /// Speed of the last window, km/h.
    pub speed: u32,
    /// Harmonic-mean speed (AvgSpeedCount), km/h.
    pub avg_speed: u32,
    pub max_speed: u32,
    /// InstantFuelConsumption in `consumption_unit`.
    pub instant_consumption: f32,
    pub consumption_unit: ConsumptionUnit,
    /// Harmonic-mean consumption, L/100 km.
    pub avg_consumption: f32,
    /// Litres.
    pub used_fuel: f32,
    /// Litres.
    pub fuel_left: f32,
    /// Kilometres.
    pub traveled_distance: f32,
    /// Kilometres covered while not consuming fuel.
    pub sailing_distance: f32,
    pub dist_pulse_count: u16,
    pub pulse_overflows: u32,
    /// Distance edges counted in the last window.
    pub window_pulses: u16,
    /// Open time of the last closed window, seconds.
    pub injector_open_time: f32,
    /// Speed samples folded into the averages.
    pub sample_count: u32,
}

impl TripMetrics {
    /// The metric set shown in `mode`.
    pub const fn view(
        &self,
        mode: DisplayMode,
    ) -> MetricsView {
        match mode {
            DisplayMode::FuelTotals => MetricsView::FuelTotals {
                used_fuel: self.used_fuel,
                sailing_distance: self.sailing_distance,
                fuel_left: self.fuel_left,
            },
            DisplayMode::Speed => MetricsView::Speed { speed: self.speed },
            DisplayMode::InstantConsumption => MetricsView::InstantConsumption {
                consumption: self.instant_consumption,
                unit: self.consumption_unit,
            },
        }
    }
}

/// Metrics emitted to the display for one mode.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MetricsView {
    FuelTotals {
        used_fuel: f32,
        sailing_distance: f32,
        fuel_left: f32,
    },
    Speed {
        speed: u32,
    },
    InstantConsumption {
        consumption: f32,
        unit: ConsumptionUnit,
    },
}

impl MetricsView {
    pub const fn mode(&self) -> DisplayMode {
        match self {
            Self::FuelTotals { .. } => DisplayMode::FuelTotals,
            Self::Speed { .. } => DisplayMode::Speed,
            Self::InstantConsumption { .. } => DisplayMode::InstantConsumption,
        }
    }
}

/// Consumer of the per-tick view (display driver, console, test recorder).
pub trait MetricsSink {
    fn show(
        &mut self,
        view: &MetricsView,
    );
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metrics() -> TripMetrics {
        TripMetrics {
            speed: 72,
            instant_consumption: 6.4,
            consumption_unit: ConsumptionUnit::LitresPer100Km,
            used_fuel: 1.25,
            fuel_left: 66.75,
            sailing_distance: 0.8,
            ..TripMetrics::default()
        }
    }

    #[test]
    fn test_fuel_totals_view() {
        let view = sample_metrics().view(DisplayMode::FuelTotals);
        assert_eq!(
            view,
            MetricsView::FuelTotals {
                used_fuel: 1.25,
                sailing_distance: 0.8,
                fuel_left: 66.75,
            }
        );
    }

    #[test]
    fn test_speed_view() {
        assert_eq!(sample_metrics().view(DisplayMode::Speed), MetricsView::Speed { speed: 72 });
    }

    #[test]
    fn test_consumption_view() {
        let view = sample_metrics().view(DisplayMode::InstantConsumption);
        assert_eq!(
            view,
            MetricsView::InstantConsumption {
                consumption: 6.4,
                unit: ConsumptionUnit::LitresPer100Km,
            }
        );
    }

    #[test]
    fn test_view_mode_roundtrip() {
        let metrics = sample_metrics();
        for mode in [DisplayMode::FuelTotals, DisplayMode::Speed, DisplayMode::InstantConsumption] {
            assert_eq!(metrics.view(mode).mode(), mode);
        }
    }
}
