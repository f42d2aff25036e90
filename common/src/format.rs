//! Display text for metric values.
//!
//! Values that carry no information (no consumption yet, standing still,
//! nothing used) render as dashes rather than a misleading zero. So do
//! values too wide for [`VALUE_CAPACITY`].

use core::fmt::Write;

use heapless::String;

use crate::config::MAX_DISPLAY_CONSUMPTION;

/// Capacity of every formatted value.
pub const VALUE_CAPACITY: usize = 12;

pub type ValueText = String<VALUE_CAPACITY>;

const CONSUMPTION_PLACEHOLDER: &str = "--.-";
const SPEED_PLACEHOLDER: &str = "--";

fn placeholder(text: &str) -> ValueText { ValueText::try_from(text).unwrap_or_default() }

/// Formatted text, or `fallback` when it does not fit [`VALUE_CAPACITY`].
fn render(
    args: core::fmt::Arguments<'_>,
    fallback: &str,
) -> ValueText {
    let mut s = ValueText::new();
    match s.write_fmt(args) {
        Ok(()) => s,
        Err(_) => placeholder(fallback),
    }
}

/// Consumption with one decimal, `--.-` outside (0, 99].
pub fn consumption(value: f32) -> ValueText {
    if !(value > 0.0 && value <= MAX_DISPLAY_CONSUMPTION) {
        return placeholder(CONSUMPTION_PLACEHOLDER);
    }
    render(format_args!("{value:.1}"), CONSUMPTION_PLACEHOLDER)
}

/// Whole km/h, `--` when stationary.
pub fn speed(value: u32) -> ValueText {
    if value == 0 {
        return placeholder(SPEED_PLACEHOLDER);
    }
    render(format_args!("{value}"), SPEED_PLACEHOLDER)
}

/// Litres used with two decimals, `--.-` before any fuel was counted.
pub fn used_fuel(litres: f32) -> ValueText {
    if !(litres > 0.0) {
        return placeholder(CONSUMPTION_PLACEHOLDER);
    }
    render(format_args!("{litres:.2}"), CONSUMPTION_PLACEHOLDER)
}

/// Kilometres with two decimals, `--` before the first pulse.
pub fn distance(km: f32) -> ValueText {
    if !(km > 0.0) {
        return placeholder(SPEED_PLACEHOLDER);
    }
    render(format_args!("{km:.2}"), SPEED_PLACEHOLDER)
}

/// Litres left in the tank, one decimal.
pub fn fuel_left(litres: f32) -> ValueText {
    render(format_args!("{:.1}", litres.max(0.0)), CONSUMPTION_PLACEHOLDER)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consumption() {
        assert_eq!(consumption(6.43).as_str(), "6.4");
        assert_eq!(consumption(99.0).as_str(), "99.0");
        assert_eq!(consumption(0.0).as_str(), "--.-");
        assert_eq!(consumption(-1.0).as_str(), "--.-");
        assert_eq!(consumption(99.5).as_str(), "--.-");
        assert_eq!(consumption(f32::NAN).as_str(), "--.-");
    }

    #[test]
    fn test_speed() {
        assert_eq!(speed(0).as_str(), "--");
        assert_eq!(speed(7).as_str(), "7");
        assert_eq!(speed(128).as_str(), "128");
    }

    #[test]
    fn test_used_fuel() {
        assert_eq!(used_fuel(0.0).as_str(), "--.-");
        assert_eq!(used_fuel(0.5).as_str(), "0.50");
        assert_eq!(used_fuel(12.346).as_str(), "12.35");
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(0.0).as_str(), "--");
        assert_eq!(distance(1.25).as_str(), "1.25");
    }

    #[test]
    fn test_fuel_left() {
        assert_eq!(fuel_left(68.0).as_str(), "68.0");
        assert_eq!(fuel_left(0.0).as_str(), "0.0");
    }

    #[test]
    fn test_large_values_fit() {
        assert_eq!(speed(u32::MAX).as_str(), "4294967295");
        assert_eq!(distance(123_456.78).len(), 9);
    }

    #[test]
    fn test_overflowing_values_fall_back_to_placeholder() {
        assert_eq!(distance(1.0e12).as_str(), "--");
        assert_eq!(used_fuel(1.0e12).as_str(), "--.-");
        assert_eq!(fuel_left(1.0e15).as_str(), "--.-");
        // Eleven characters still fit
        assert_eq!(distance(12_345_678.0).as_str(), "12345678.00");
    }
}
