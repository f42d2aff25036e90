//! Timing constants for the simulator.
//!
//! These use `std::time::Duration`, which the `no_std` core does not have.

use std::time::Duration;

use tripcomp_common::config::TICK_PERIOD_MS;

/// Foreground tick, same period as the firmware loop.
pub const TICK_PERIOD: Duration = Duration::from_millis(TICK_PERIOD_MS);

/// Vehicle thread step. Edges produced within one step share a timestamp.
pub const VEHICLE_STEP: Duration = Duration::from_millis(5);

/// Duration that popups remain visible on screen.
pub const POPUP_DURATION: Duration = Duration::from_secs(3);

/// Headless runs press the mode button this often.
#[cfg(not(feature = "window"))]
pub const SCRIPTED_MODE_PERIOD: Duration = Duration::from_secs(10);

/// Headless run length when none is given on the command line.
#[cfg(not(feature = "window"))]
pub const DEFAULT_RUN_TIME: Duration = Duration::from_secs(60);
