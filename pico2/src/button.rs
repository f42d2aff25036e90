//! Button debounce handling.
//!
//! Time-based edge detection so contact bounce on the PIM715 buttons does
//! not register as several presses. Timestamps are passed in by the caller
//! (milliseconds since boot) which keeps this module free of the embassy
//! time driver and testable on the host.

/// Debounce duration in milliseconds.
pub const DEBOUNCE_MS: u64 = 50;

/// Debounce state for one active-low button.
#[derive(Clone, Copy, Debug, Default)]
pub struct ButtonState {
    was_pressed: bool,
    last_change_ms: Option<u64>,
}

impl ButtonState {
    pub const fn new() -> Self {
        Self {
            was_pressed: false,
            last_change_ms: None,
        }
    }

    /// Returns true only on the press edge.
    ///
    /// `is_low` is the raw pin level (low means pressed). Level changes
    /// within [`DEBOUNCE_MS`] of the last accepted change are ignored.
    pub fn just_pressed(
        &mut self,
        is_low: bool,
        now_ms: u64,
    ) -> bool {
        if is_low == self.was_pressed {
            return false;
        }

        if let Some(last) = self.last_change_ms
            && now_ms.saturating_sub(last) < DEBOUNCE_MS
        {
            return false;
        }

        self.was_pressed = is_low;
        self.last_change_ms = Some(now_ms);
        is_low
    }

    #[inline]
    pub const fn is_pressed(&self) -> bool { self.was_pressed }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_edge_fires_once() {
        let mut button = ButtonState::new();
        assert!(button.just_pressed(true, 0));
        assert!(!button.just_pressed(true, 10));
        assert!(!button.just_pressed(true, 500));
        assert!(button.is_pressed());
    }

    #[test]
    fn test_release_is_not_a_press() {
        let mut button = ButtonState::new();
        assert!(button.just_pressed(true, 0));
        assert!(!button.just_pressed(false, 100));
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_bounce_is_ignored() {
        let mut button = ButtonState::new();
        assert!(button.just_pressed(true, 1_000));
        // Contact bounce right after the press
        assert!(!button.just_pressed(false, 1_005));
        assert!(!button.just_pressed(true, 1_010));
        // Still considered held
        assert!(button.is_pressed());
    }

    #[test]
    fn test_second_press_after_debounce() {
        let mut button = ButtonState::new();
        assert!(button.just_pressed(true, 0));
        assert!(!button.just_pressed(false, DEBOUNCE_MS));
        assert!(button.just_pressed(true, 2 * DEBOUNCE_MS));
    }

    #[test]
    fn test_idle_line_never_fires() {
        let mut button = ButtonState::default();
        for now in 0..10 {
            assert!(!button.just_pressed(false, now * 100));
        }
    }
}
