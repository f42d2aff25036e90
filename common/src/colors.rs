//! RGB565 colors used by the trip display.
//!
//! Standard colors come from the `RgbColor` trait constants; the rest are
//! hand-picked 5-6-5 values.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

/// Backgrounds.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Values and labels.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Popup background.
pub const RED: Rgb565 = Rgb565::RED;

/// Sailing distance, i.e. distance covered on zero fuel.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Calibration indicator in the header.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

/// Idle consumption shown as an hourly rate.
/// RGB565: (31, 32, 0).
pub const ORANGE: Rgb565 = Rgb565::new(31, 32, 0);

/// Divider lines and unit labels.
/// RGB565: (8, 16, 8), roughly 25% brightness.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);

/// Header bar fill.
/// RGB565: (0, 20, 10).
pub const DARK_TEAL: Rgb565 = Rgb565::new(0, 20, 10);
