//! GPIO assignment on the Pico 2 with the PIM715 Display Pack fitted.
//!
//! The display pack occupies GPIO 12-20 and 26-28, the sensor lines use
//! free pins on the other header side. `main.rs` takes the matching `PIN_n`
//! peripherals and logs these numbers at startup. Button A (GPIO 12) is
//! not used.

/// Vehicle speed sensor (one edge per `PULSE_DISTANCE`).
pub const DISTANCE_PULSE: u8 = 2;
/// Injector drive line, low while the injector is open.
pub const INJECTOR: u8 = 3;

pub const BUTTON_B: u8 = 13;
pub const BUTTON_X: u8 = 14;
pub const BUTTON_Y: u8 = 15;

pub const DISPLAY_DC: u8 = 16;
pub const DISPLAY_CS: u8 = 17;
pub const DISPLAY_CLK: u8 = 18;
pub const DISPLAY_MOSI: u8 = 19;
pub const DISPLAY_BACKLIGHT: u8 = 20;

/// Button poll period in milliseconds.
pub const BUTTON_POLL_MS: u64 = 10;

#[cfg(test)]
mod tests {
    use super::*;

    const ASSIGNED: [u8; 10] = [
        DISTANCE_PULSE,
        INJECTOR,
        BUTTON_B,
        BUTTON_X,
        BUTTON_Y,
        DISPLAY_DC,
        DISPLAY_CS,
        DISPLAY_CLK,
        DISPLAY_MOSI,
        DISPLAY_BACKLIGHT,
    ];

    #[test]
    fn test_pins_are_distinct_gpios() {
        for (i, pin) in ASSIGNED.iter().enumerate() {
            assert!(*pin < 30, "GPIO{pin} is not on the RP2350A header");
            assert!(!ASSIGNED[i + 1..].contains(pin), "GPIO{pin} assigned twice");
        }
    }

    #[test]
    fn test_sensor_lines_avoid_display_pack() {
        for pin in [DISTANCE_PULSE, INJECTOR] {
            assert!(!(12..=20).contains(&pin) && !(26..=28).contains(&pin));
        }
    }
}
