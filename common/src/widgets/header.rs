//! Header bar: current mode title and the calibration indicator.

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::Text,
};

use crate::colors::DARK_TEAL;
use crate::layout::{HEADER_HEIGHT, SCREEN_WIDTH};
use crate::mode::DisplayMode;
use crate::styles::{CENTERED, LABEL_STYLE_GRAY, LABEL_STYLE_YELLOW, LEFT_ALIGNED, RIGHT_ALIGNED, TITLE_STYLE_WHITE};

const HEADER_RECT_POS: Point = Point::new(0, 0);
const HEADER_RECT_SIZE: Size = Size::new(SCREEN_WIDTH, HEADER_HEIGHT);
const HEADER_TITLE_POS: Point = Point::new((SCREEN_WIDTH / 2) as i32, 19);
const HEADER_PAGE_POS: Point = Point::new(5, 17);
const HEADER_CAL_POS: Point = Point::new((SCREEN_WIDTH - 5) as i32, 17);

const HEADER_FILL_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(DARK_TEAL);

const PAGE_LABELS: [&str; DisplayMode::COUNT as usize] = ["1/3", "2/3", "3/3"];

/// Header title for `mode`.
pub const fn mode_title(mode: DisplayMode) -> &'static str {
    match mode {
        DisplayMode::FuelTotals => "FUEL TOTALS",
        DisplayMode::Speed => "CURRENT SPEED",
        DisplayMode::InstantConsumption => "INSTANT FUEL",
    }
}

pub fn draw_header<D>(
    display: &mut D,
    mode: DisplayMode,
    calibration: bool,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(HEADER_RECT_POS, HEADER_RECT_SIZE)
        .into_styled(HEADER_FILL_STYLE)
        .draw(display)
        .ok();

    Text::with_text_style(mode_title(mode), HEADER_TITLE_POS, TITLE_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();

    Text::with_text_style(PAGE_LABELS[mode.index() as usize], HEADER_PAGE_POS, LABEL_STYLE_GRAY, LEFT_ALIGNED)
        .draw(display)
        .ok();

    if calibration {
        Text::with_text_style("CAL", HEADER_CAL_POS, LABEL_STYLE_YELLOW, RIGHT_ALIGNED)
            .draw(display)
            .ok();
    }
}
