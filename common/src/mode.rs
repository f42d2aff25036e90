//! Display mode selection.
//!
//! The mode button advances a shared counter modulo 3. The counter is written
//! from handler context and read once per foreground tick, so it is a plain
//! atomic rather than part of the critical-section counters.

use core::sync::atomic::{AtomicU8, Ordering};

/// Metric views, in button order.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Used fuel, sailing distance and fuel left.
    #[default]
    FuelTotals,
    /// Instantaneous speed.
    Speed,
    /// Instantaneous fuel consumption.
    InstantConsumption,
}

impl DisplayMode {
    /// Number of modes the counter cycles through.
    pub const COUNT: u8 = 3;

    /// Mode for a raw counter value. Values wrap modulo [`Self::COUNT`].
    pub const fn from_index(index: u8) -> Self {
        match index % Self::COUNT {
            0 => Self::FuelTotals,
            1 => Self::Speed,
            _ => Self::InstantConsumption,
        }
    }

    pub const fn index(self) -> u8 {
        match self {
            Self::FuelTotals => 0,
            Self::Speed => 1,
            Self::InstantConsumption => 2,
        }
    }

    /// Next mode (FuelTotals → Speed → InstantConsumption → FuelTotals).
    #[inline]
    pub const fn next(self) -> Self { Self::from_index(self.index() + 1) }
}

/// Shared ModeCounter, 0..=2.
pub struct ModeCounter(AtomicU8);

impl ModeCounter {
    pub const fn new() -> Self { Self(AtomicU8::new(0)) }

    /// Advance to the next mode. Called on a debounced button press.
    pub fn advance(&self) -> DisplayMode {
        let previous = self
            .0
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |index| {
                Some((index + 1) % DisplayMode::COUNT)
            })
            .unwrap_or_default();
        DisplayMode::from_index(previous + 1)
    }

    #[inline]
    pub fn current(&self) -> DisplayMode { DisplayMode::from_index(self.0.load(Ordering::Relaxed)) }
}

impl Default for ModeCounter {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
