//! Screen geometry for the 320x240 trip display.
//!
//! All positions are compile-time constants; widgets never compute layout
//! per frame.

use embedded_graphics::prelude::{Point, Size};

/// Display width in pixels (ST7789 on Pimoroni PIM715, landscape).
pub const SCREEN_WIDTH: u32 = 320;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 240;

/// Header bar height in pixels.
pub const HEADER_HEIGHT: u32 = 26;

pub const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;
pub const CENTER_Y: i32 = (SCREEN_HEIGHT / 2) as i32;

/// Height of one row in the three-row fuel totals view.
pub const TOTALS_ROW_HEIGHT: u32 = (SCREEN_HEIGHT - HEADER_HEIGHT) / 3;

/// Area below the header.
pub const BODY_POS: Point = Point::new(0, HEADER_HEIGHT as i32);
pub const BODY_SIZE: Size = Size::new(SCREEN_WIDTH, SCREEN_HEIGHT - HEADER_HEIGHT);

/// Baseline of the big value in the single-value views.
pub const BIG_VALUE_POS: Point = Point::new(CENTER_X, CENTER_Y + 10);

/// Baseline of the unit label under the big value.
pub const BIG_UNIT_POS: Point = Point::new(CENTER_X, CENTER_Y + 45);

/// Baseline of the caption above the big value.
pub const BIG_CAPTION_POS: Point = Point::new(CENTER_X, CENTER_Y - 40);

/// Left padding of labels in the totals view.
pub const TOTALS_LABEL_X: i32 = 12;

/// Right edge of values in the totals view (right-aligned).
pub const TOTALS_VALUE_X: i32 = (SCREEN_WIDTH - 60) as i32;

/// Left edge of units in the totals view.
pub const TOTALS_UNIT_X: i32 = (SCREEN_WIDTH - 50) as i32;

const _: () = assert!(TOTALS_VALUE_X < TOTALS_UNIT_X);
const _: () = assert!(HEADER_HEIGHT + 3 * TOTALS_ROW_HEIGHT <= SCREEN_HEIGHT);

/// Text baseline for row `row` (0..3) of the totals view.
pub const fn totals_row_baseline(row: u32) -> i32 { (HEADER_HEIGHT + row * TOTALS_ROW_HEIGHT + TOTALS_ROW_HEIGHT / 2 + 8) as i32 }
