//! Non-modal popup overlays confirming a button action.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;

use crate::colors::{RED, WHITE};
use crate::layout::{CENTER_X, CENTER_Y, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::styles::{CENTERED, TITLE_STYLE_WHITE};

const POPUP_WIDTH: u32 = 180;
const POPUP_HEIGHT: u32 = 60;
const POPUP_X: i32 = (SCREEN_WIDTH - POPUP_WIDTH) as i32 / 2;
const POPUP_Y: i32 = (SCREEN_HEIGHT - POPUP_HEIGHT) as i32 / 2;

const BORDER_POS: Point = Point::new(POPUP_X - 3, POPUP_Y - 3);
const BORDER_SIZE: Size = Size::new(POPUP_WIDTH + 6, POPUP_HEIGHT + 6);
const BG_POS: Point = Point::new(POPUP_X, POPUP_Y);
const BG_SIZE: Size = Size::new(POPUP_WIDTH, POPUP_HEIGHT);

const TEXT1_POS: Point = Point::new(CENTER_X, CENTER_Y - 5);
const TEXT2_POS: Point = Point::new(CENTER_X, CENTER_Y + 15);
const SINGLE_TEXT_POS: Point = Point::new(CENTER_X, CENTER_Y + 5);

const WHITE_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(WHITE);
const RED_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(RED);

/// Popups the foreground loop can show over a view.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Popup {
    /// Calibration flag toggled; carries the new state.
    Calibration(bool),
    /// Harmonic averages cleared.
    AveragesReset,
}

fn draw_frame<D>(display: &mut D)
where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(BORDER_POS, BORDER_SIZE)
        .into_styled(WHITE_FILL)
        .draw(display)
        .ok();

    Rectangle::new(BG_POS, BG_SIZE)
        .into_styled(RED_FILL)
        .draw(display)
        .ok();
}

pub fn draw_reset_popup<D>(display: &mut D)
where
    D: DrawTarget<Color = Rgb565>,
{
    draw_frame(display);
    Text::with_text_style("AVERAGES", TEXT1_POS, TITLE_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();
    Text::with_text_style("RESET", TEXT2_POS, TITLE_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();
}

pub fn draw_calibration_popup<D>(
    display: &mut D,
    enabled: bool,
) where
    D: DrawTarget<Color = Rgb565>,
{
    draw_frame(display);
    let status = if enabled { "CAL ON" } else { "CAL OFF" };
    Text::with_text_style(status, SINGLE_TEXT_POS, TITLE_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();
}

pub fn draw_popup<D>(
    display: &mut D,
    popup: Popup,
) where
    D: DrawTarget<Color = Rgb565>,
{
    match popup {
        Popup::Calibration(enabled) => draw_calibration_popup(display, enabled),
        Popup::AveragesReset => draw_reset_popup(display),
    }
}
