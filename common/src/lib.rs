//! Platform-agnostic core of the pulse-timing trip computer.
//!
//! Shared between the simulator and the Pico 2 firmware:
//!
//! - [`shared`]: state written from edge handlers and sampled by the foreground loop
//! - [`injector`], [`distance`]: edge handlers
//! - [`speed`], [`fuel`], [`harmonic`]: estimators
//! - [`scheduler`]: the sampling countdown driving the estimators
//! - [`metrics`], [`mode`]: computed values and the per-mode views
//! - [`config`]: physical constants and [`TripConfig`]
//! - [`format`], [`layout`], [`colors`], [`styles`], [`widgets`]: display
//!
//! # no_std Compatibility
//!
//! The crate is `no_std`; `std` is only linked for unit tests. Cross-context
//! state goes through `embassy-sync`'s critical-section mutex, so the
//! embedding binary must provide a `critical-section` implementation.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// Host critical-section implementation for unit tests
#[cfg(test)]
use critical_section as _;

pub mod colors;
pub mod config;
pub mod distance;
pub mod format;
pub mod fuel;
pub mod harmonic;
pub mod injector;
pub mod layout;
pub mod metrics;
pub mod mode;
pub mod scheduler;
pub mod shared;
pub mod speed;
pub mod styles;
pub mod widgets;

// Re-export commonly used items
pub use config::{ConfigError, SpeedScaling, TripConfig};
pub use distance::{DistanceAccumulator, DistanceEdge};
pub use fuel::{ConsumptionUnit, FuelEstimator, FuelSample};
pub use injector::InjectorPulseTimer;
pub use metrics::{MetricsSink, MetricsView, TripMetrics};
pub use mode::{DisplayMode, ModeCounter};
pub use scheduler::{SampleReport, SamplingScheduler, TickOutcome};
pub use shared::{PulseCounters, TripShared, WindowSample, pulses_to_distance};
pub use speed::{SpeedEstimator, SpeedSample};
