//! Button actions for the trip computer.
//!
//! PIM715 layout: Y cycles the display mode, X toggles calibration (distance
//! counter overflow tracking), B resets the running averages. A is unused.

use tripcomp_common::widgets::Popup;
use tripcomp_common::{DisplayMode, TripShared};

use crate::button::ButtonState;

/// Raw pin levels of the used buttons (true = pin low = pressed).
#[derive(Clone, Copy, Debug, Default)]
pub struct ButtonLevels {
    pub b: bool,
    pub x: bool,
    pub y: bool,
}

/// Debounce state for every used button.
#[derive(Clone, Copy, Debug, Default)]
pub struct Buttons {
    b: ButtonState,
    x: ButtonState,
    y: ButtonState,
}

/// Result of processing one poll of the buttons.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputResult {
    /// Mode after a Y press.
    pub new_mode: Option<DisplayMode>,
    /// Calibration state after an X press.
    pub calibration: Option<bool>,
    /// B was pressed; the foreground loop owns the averages.
    pub reset_requested: bool,
    /// Popup to show (the last button in poll order wins).
    pub show_popup: Option<Popup>,
}

impl InputResult {
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.new_mode.is_none() && self.calibration.is_none() && !self.reset_requested
    }
}

impl Buttons {
    pub const fn new() -> Self {
        Self {
            b: ButtonState::new(),
            x: ButtonState::new(),
            y: ButtonState::new(),
        }
    }

    /// Debounce `levels` and apply mode and calibration changes to `shared`.
    pub fn process(
        &mut self,
        levels: ButtonLevels,
        now_ms: u64,
        shared: &TripShared,
    ) -> InputResult {
        let mut result = InputResult::default();

        if self.y.just_pressed(levels.y, now_ms) {
            result.new_mode = Some(shared.mode().advance());
        }

        if self.x.just_pressed(levels.x, now_ms) {
            let enabled = shared.toggle_calibration();
            result.calibration = Some(enabled);
            result.show_popup = Some(Popup::Calibration(enabled));
        }

        if self.b.just_pressed(levels.b, now_ms) {
            result.reset_requested = true;
            result.show_popup = Some(Popup::AveragesReset);
        }

        result
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const Y: ButtonLevels = ButtonLevels { b: false, x: false, y: true };
    const X: ButtonLevels = ButtonLevels { b: false, x: true, y: false };
    const B: ButtonLevels = ButtonLevels { b: true, x: false, y: false };
    const NONE: ButtonLevels = ButtonLevels { b: false, x: false, y: false };

    #[test]
    fn test_y_advances_mode() {
        let shared = TripShared::new();
        let mut buttons = Buttons::new();

        let result = buttons.process(Y, 0, &shared);
        assert_eq!(result.new_mode, Some(DisplayMode::Speed));
        assert_eq!(shared.mode().current(), DisplayMode::Speed);
        assert_eq!(result.show_popup, None);

        // Held button does not repeat
        assert!(buttons.process(Y, 300, &shared).is_empty());
        assert_eq!(shared.mode().current(), DisplayMode::Speed);
    }

    #[test]
    fn test_mode_wraps_after_three_presses() {
        let shared = TripShared::new();
        let mut buttons = Buttons::new();

        let mut now = 0;
        for _ in 0..3 {
            buttons.process(Y, now, &shared);
            buttons.process(NONE, now + 100, &shared);
            now += 200;
        }
        assert_eq!(shared.mode().current(), DisplayMode::FuelTotals);
    }

    #[test]
    fn test_x_toggles_calibration() {
        let shared = TripShared::new();
        let mut buttons = Buttons::new();

        let on = buttons.process(X, 0, &shared);
        assert_eq!(on.calibration, Some(true));
        assert_eq!(on.show_popup, Some(Popup::Calibration(true)));
        assert!(shared.calibration());

        buttons.process(NONE, 100, &shared);
        let off = buttons.process(X, 200, &shared);
        assert_eq!(off.calibration, Some(false));
        assert!(!shared.calibration());
    }

    #[test]
    fn test_b_requests_reset() {
        let shared = TripShared::new();
        let mut buttons = Buttons::new();

        let result = buttons.process(B, 0, &shared);
        assert!(result.reset_requested);
        assert_eq!(result.show_popup, Some(Popup::AveragesReset));
        assert_eq!(shared.mode().current(), DisplayMode::FuelTotals);
    }

    #[test]
    fn test_idle_buttons_do_nothing() {
        let shared = TripShared::new();
        let mut buttons = Buttons::new();
        for now in 0..20 {
            assert!(buttons.process(NONE, now * 10, &shared).is_empty());
        }
        assert!(!shared.calibration());
    }
}
