//! Simulated vehicle producing distance and injector edges.
//!
//! A repeating drive cycle gives a target speed and fuel demand over time.
//! Each step turns those into distance edges and one injector pulse,
//! delivered through the same handlers the firmware calls from interrupt
//! context.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;

use tracing::{debug, trace};
use tripcomp_common::{InjectorPulseTimer, TripConfig, TripShared};

use crate::timing::VEHICLE_STEP;

/// Idle fuel flow in litres per hour.
const IDLE_FLOW_LPH: f32 = 0.8;

/// Below this speed the engine is treated as idling.
const IDLE_SPEED_KMH: f32 = 5.0;

/// What the engine is doing during a phase.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum FuelDemand {
    /// Burning fuel at the given L/100 km (idle flow when nearly stopped).
    Load(f32),
    /// Overrun fuel cut: injectors stay closed.
    Cut,
}

/// One segment of the drive cycle with linear speed change.
#[derive(Clone, Copy, Debug)]
pub struct Phase {
    pub seconds: f32,
    pub from_kmh: f32,
    pub to_kmh: f32,
    pub demand: FuelDemand,
}

/// City/highway loop including a coast-down on fuel cut.
pub const DRIVE_CYCLE: [Phase; 6] = [
    Phase { seconds: 8.0, from_kmh: 0.0, to_kmh: 0.0, demand: FuelDemand::Load(0.0) },
    Phase { seconds: 15.0, from_kmh: 0.0, to_kmh: 90.0, demand: FuelDemand::Load(9.5) },
    Phase { seconds: 20.0, from_kmh: 90.0, to_kmh: 90.0, demand: FuelDemand::Load(6.2) },
    Phase { seconds: 10.0, from_kmh: 90.0, to_kmh: 35.0, demand: FuelDemand::Cut },
    Phase { seconds: 12.0, from_kmh: 35.0, to_kmh: 35.0, demand: FuelDemand::Load(5.0) },
    Phase { seconds: 6.0, from_kmh: 35.0, to_kmh: 0.0, demand: FuelDemand::Cut },
];

/// Speed and fuel flow at a point in time.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct DriveState {
    pub speed_kmh: f32,
    pub fuel_lph: f32,
}

/// Looping drive cycle.
#[derive(Clone, Copy, Debug)]
pub struct DriveProfile {
    phases: &'static [Phase],
    cycle_seconds: f32,
}

impl DriveProfile {
    pub fn new(phases: &'static [Phase]) -> Self {
        Self {
            phases,
            cycle_seconds: phases.iter().map(|p| p.seconds).sum(),
        }
    }

    pub fn state_at(
        &self,
        seconds: f32,
    ) -> DriveState {
        if self.cycle_seconds <= 0.0 {
            return DriveState { speed_kmh: 0.0, fuel_lph: IDLE_FLOW_LPH };
        }

        let mut t = seconds.rem_euclid(self.cycle_seconds);
        for phase in self.phases {
            if t < phase.seconds {
                let speed_kmh = phase.from_kmh + (phase.to_kmh - phase.from_kmh) * (t / phase.seconds);
                let fuel_lph = match phase.demand {
                    FuelDemand::Cut => 0.0,
                    FuelDemand::Load(_) if speed_kmh < IDLE_SPEED_KMH => IDLE_FLOW_LPH,
                    FuelDemand::Load(per_100km) => per_100km * speed_kmh / 100.0,
                };
                return DriveState { speed_kmh, fuel_lph };
            }
            t -= phase.seconds;
        }
        DriveState { speed_kmh: 0.0, fuel_lph: IDLE_FLOW_LPH }
    }
}

impl Default for DriveProfile {
    fn default() -> Self { Self::new(&DRIVE_CYCLE) }
}

/// Edges emitted by one [`Vehicle::advance`] call.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct StepEdges {
    pub distance: u32,
    pub injector_open_us: u64,
}

/// Converts the drive profile into sensor edges.
pub struct Vehicle {
    profile: DriveProfile,
    pulse_distance_km: f64,
    /// Litres per second of open time, all injectors.
    injector_flow: f64,
    clock_us: u64,
    pulse_carry: f64,
    open_carry_us: f64,
    timer: InjectorPulseTimer,
}

impl Vehicle {
    pub fn new(
        profile: DriveProfile,
        config: &TripConfig,
    ) -> Self {
        Self {
            profile,
            pulse_distance_km: f64::from(config.pulse_distance),
            injector_flow: f64::from(config.injector_flow()),
            clock_us: 0,
            pulse_carry: 0.0,
            open_carry_us: 0.0,
            timer: InjectorPulseTimer::new(),
        }
    }

    /// Simulated time in seconds.
    pub fn elapsed_seconds(&self) -> f32 { self.clock_us as f32 / 1_000_000.0 }

    /// Advance simulated time by `step_us` and deliver the resulting edges.
    pub fn advance(
        &mut self,
        shared: &TripShared,
        step_us: u64,
    ) -> StepEdges {
        let state = self.profile.state_at(self.elapsed_seconds());
        let step_s = step_us as f64 / 1_000_000.0;

        // Distance edges
        let km = f64::from(state.speed_kmh) * step_s / 3600.0;
        self.pulse_carry += km / self.pulse_distance_km;
        let distance = self.pulse_carry.floor() as u32;
        self.pulse_carry -= f64::from(distance);
        for _ in 0..distance {
            shared.record_distance_edge();
        }

        // One injector pulse per step carrying this step's open time
        let litres = f64::from(state.fuel_lph) * step_s / 3600.0;
        self.open_carry_us += litres / self.injector_flow * 1_000_000.0;
        let open_us = (self.open_carry_us.floor() as u64).min(step_us);
        self.open_carry_us -= open_us as f64;
        if open_us > 0 {
            self.timer.on_edge(shared, true, self.clock_us);
            self.timer.on_edge(shared, false, self.clock_us + open_us);
        }

        self.clock_us += step_us;
        trace!(distance, open_us, speed = state.speed_kmh, "vehicle step");

        StepEdges {
            distance,
            injector_open_us: open_us,
        }
    }
}

/// Drive `vehicle` in real time until `stop` is set.
pub fn run(
    mut vehicle: Vehicle,
    shared: &TripShared,
    stop: &AtomicBool,
) {
    let step_us = VEHICLE_STEP.as_micros() as u64;
    let mut next = Instant::now();

    debug!(step_us, "vehicle thread started");
    while !stop.load(Ordering::Relaxed) {
        vehicle.advance(shared, step_us);
        next += VEHICLE_STEP;
        if let Some(wait) = next.checked_duration_since(Instant::now()) {
            thread::sleep(wait);
        }
    }
    debug!(seconds = vehicle.elapsed_seconds(), "vehicle thread stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_SECOND_US: u64 = 1_000_000;

    static CRUISE: [Phase; 1] = [Phase {
        seconds: 100.0,
        from_kmh: 60.0,
        to_kmh: 60.0,
        demand: FuelDemand::Load(6.0),
    }];

    static COAST: [Phase; 1] = [Phase {
        seconds: 100.0,
        from_kmh: 50.0,
        to_kmh: 50.0,
        demand: FuelDemand::Cut,
    }];

    #[test]
    fn test_profile_interpolates_and_loops() {
        let profile = DriveProfile::default();
        // Halfway through the 0 -> 90 acceleration
        let state = profile.state_at(8.0 + 7.5);
        assert!((state.speed_kmh - 45.0).abs() < 1e-3);
        // One full cycle later
        let looped = profile.state_at(71.0 + 8.0 + 7.5);
        assert!((looped.speed_kmh - 45.0).abs() < 1e-3);
    }

    #[test]
    fn test_idle_uses_idle_flow() {
        let state = DriveProfile::default().state_at(1.0);
        assert_eq!(state.speed_kmh, 0.0);
        assert_eq!(state.fuel_lph, IDLE_FLOW_LPH);
    }

    #[test]
    fn test_cruise_edges_per_second() {
        let shared = TripShared::new();
        let config = TripConfig::default();
        let mut vehicle = Vehicle::new(DriveProfile::new(&CRUISE), &config);

        let mut edges = 0;
        let mut open_us = 0;
        for _ in 0..200 {
            let step = vehicle.advance(&shared, ONE_SECOND_US / 200);
            edges += step.distance;
            open_us += step.injector_open_us;
        }

        // 60 km/h over 0.06823 m pulses
        assert!((243..=245).contains(&edges), "edges {edges}");
        assert_eq!(shared.snapshot().traveled_pulses, u64::from(edges));
        // 3.6 L/h is 1 ml/s; at 15 ml/s of open time that is ~66.7 ms
        assert!((66_000..=66_700).contains(&open_us), "open {open_us}");
    }

    #[test]
    fn test_fuel_cut_closes_injectors() {
        let shared = TripShared::new();
        let mut vehicle = Vehicle::new(DriveProfile::new(&COAST), &TripConfig::default());

        for _ in 0..100 {
            assert_eq!(vehicle.advance(&shared, 5_000).injector_open_us, 0);
        }
        assert_eq!(shared.snapshot().injector_pulse_time_ms, 0.0);
        assert!(shared.snapshot().traveled_pulses > 0);
    }
}
