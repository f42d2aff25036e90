//! Trip computer simulator for desktop platforms.
//!
//! A vehicle thread plays the part of the interrupt handlers and feeds
//! distance and injector edges into the shared state, while the main thread
//! runs the 250 ms foreground loop exactly as the firmware does.
//!
//! Headless by default: the mode button is pressed on a timer and the last
//! frame is written to `trip-computer.png`. With `--features window` an SDL
//! window opens and the PIM715 button keys work:
//!
//! - `Y`: next display mode
//! - `X`: toggle calibration
//! - `B`: reset averages
//!
//! Usage: `simulator [seconds]` (headless run time, default 60).
//! Log level via `RUST_LOG`, e.g. `RUST_LOG=tripcomp_simulator=debug`.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

mod popup;
mod screen;
mod timing;
mod vehicle;

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;

use critical_section as _;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use tripcomp_common::widgets::Popup;
use tripcomp_common::{
    FuelSample,
    SamplingScheduler,
    SpeedSample,
    SpeedScaling,
    TickOutcome,
    TripConfig,
    TripShared,
};

use crate::screen::Screen;
use crate::timing::TICK_PERIOD;
#[cfg(not(feature = "window"))]
use crate::timing::{DEFAULT_RUN_TIME, SCRIPTED_MODE_PERIOD};
use crate::vehicle::{DriveProfile, Vehicle};

const SCREENSHOT_PATH: &str = "trip-computer.png";

/// Buttons of the display pack.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Button {
    Mode,
    Calibration,
    ResetAverages,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // floor(pulse distance) would pin every speed at zero
    let config = TripConfig::default().with_speed_scaling(SpeedScaling::Exact);
    let mut scheduler = match SamplingScheduler::new(config) {
        Ok(scheduler) => scheduler,
        Err(e) => {
            error!(error = %e, "invalid trip configuration");
            return;
        }
    };

    let shared = TripShared::new();
    let stop = AtomicBool::new(false);
    let mut screen = Screen::new();

    info!(?config, "trip computer simulator starting");

    thread::scope(|s| {
        let car = Vehicle::new(DriveProfile::default(), &config);
        s.spawn(|| vehicle::run(car, &shared, &stop));

        run_foreground(&mut scheduler, &shared, &mut screen);
        stop.store(true, Ordering::Relaxed);
    });

    let metrics = scheduler.metrics();
    info!(
        traveled_km = metrics.traveled_distance,
        sailing_km = metrics.sailing_distance,
        used_l = metrics.used_fuel,
        avg_speed = metrics.avg_speed,
        max_speed = metrics.max_speed,
        avg_consumption = metrics.avg_consumption,
        "trip summary"
    );
    screen.save_png(Path::new(SCREENSHOT_PATH));
}

#[cfg(not(feature = "window"))]
fn run_foreground(
    scheduler: &mut SamplingScheduler,
    shared: &TripShared,
    screen: &mut Screen,
) {
    let run_time = run_time_from_args();
    info!(seconds = run_time.as_secs(), "running headless");

    let start = Instant::now();
    let mut next_tick = start;
    let mut next_mode_press = start + SCRIPTED_MODE_PERIOD;

    while start.elapsed() < run_time {
        if Instant::now() >= next_mode_press {
            press(Button::Mode, scheduler, shared, screen);
            next_mode_press += SCRIPTED_MODE_PERIOD;
        }

        log_outcome(&scheduler.step(shared, screen));

        next_tick += TICK_PERIOD;
        sleep_until(next_tick);
    }
}

#[cfg(feature = "window")]
fn run_foreground(
    scheduler: &mut SamplingScheduler,
    shared: &TripShared,
    screen: &mut Screen,
) {
    use embedded_graphics_simulator::sdl2::Keycode;
    use embedded_graphics_simulator::{SimulatorEvent, Window};

    let mut window = Window::new("Trip Computer Sim", screen.output_settings());
    window.update(screen.display());

    let mut next_tick = Instant::now();
    loop {
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat: false, .. } => {
                    let button = match keycode {
                        Keycode::Y => Button::Mode,
                        Keycode::X => Button::Calibration,
                        Keycode::B => Button::ResetAverages,
                        _ => continue,
                    };
                    press(button, scheduler, shared, screen);
                }
                _ => {}
            }
        }

        log_outcome(&scheduler.step(shared, screen));
        window.update(screen.display());

        next_tick += TICK_PERIOD;
        sleep_until(next_tick);
    }
}

fn press(
    button: Button,
    scheduler: &mut SamplingScheduler,
    shared: &TripShared,
    screen: &mut Screen,
) {
    match button {
        Button::Mode => {
            let mode = shared.mode().advance();
            info!(?mode, "mode button");
        }
        Button::Calibration => {
            let enabled = shared.toggle_calibration();
            screen.set_calibration(enabled);
            screen.show_popup(Popup::Calibration(enabled));
            info!(enabled, "calibration toggled");
        }
        Button::ResetAverages => {
            scheduler.reset_averages();
            screen.show_popup(Popup::AveragesReset);
            info!("averages reset");
        }
    }
}

fn log_outcome(outcome: &TickOutcome) {
    let TickOutcome::Sampled(report) = outcome else {
        return;
    };
    let m = &report.metrics;

    debug!(
        speed = m.speed,
        window_pulses = m.window_pulses,
        consumption = m.instant_consumption,
        unit = m.consumption_unit.label(),
        avg_speed = m.avg_speed,
        avg_consumption = m.avg_consumption,
        used_l = m.used_fuel,
        "sample"
    );

    if report.new_overflow_epochs > 0 {
        warn!(
            epochs = report.new_overflow_epochs,
            total = m.pulse_overflows,
            "distance counter overflow"
        );
    }
    if report.speed == SpeedSample::Degenerate {
        warn!(speed = m.speed, "speed sample skipped");
    }
    if report.fuel == FuelSample::Degenerate {
        warn!(consumption = m.instant_consumption, "consumption sample skipped");
    }
}

fn sleep_until(deadline: Instant) {
    if let Some(wait) = deadline.checked_duration_since(Instant::now()) {
        thread::sleep(wait);
    }
}

#[cfg(not(feature = "window"))]
fn run_time_from_args() -> std::time::Duration {
    match std::env::args().nth(1) {
        None => DEFAULT_RUN_TIME,
        Some(arg) => match arg.parse::<u64>() {
            Ok(seconds) => std::time::Duration::from_secs(seconds),
            Err(e) => {
                warn!(%arg, error = %e, "bad run time, using default");
                DEFAULT_RUN_TIME
            }
        },
    }
}
