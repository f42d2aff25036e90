//! Low-level drawing primitives shared across widgets.
//!
//! # Feature Flags
//!
//! - **`simple-outline`**: 2-pass shadow instead of the 8-pass outline in
//!   [`draw_value_with_outline`]. Cuts draw calls from 9 to 3 per text on the
//!   firmware.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Text, TextStyle};

use crate::colors::{BLACK, GRAY, WHITE};

const DIVIDER_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(GRAY, 1);

/// Fill a rectangle with `color`.
pub fn fill_area<D>(
    display: &mut D,
    position: Point,
    size: Size,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(position, size)
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
        .ok();
}

/// Horizontal gray divider across the full width at `y`.
pub fn draw_divider<D>(
    display: &mut D,
    y: i32,
    width: u32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Line::new(Point::new(0, y), Point::new(width as i32 - 1, y))
        .into_styled(DIVIDER_STYLE)
        .draw(display)
        .ok();
}

/// BLACK for light text, WHITE for dark text.
#[inline]
fn outline_color_for_text(text_color: Rgb565) -> Rgb565 {
    let raw = text_color.into_storage();
    let r5 = u32::from((raw >> 11) & 0x1F);
    let g6 = u32::from((raw >> 5) & 0x3F);
    let b5 = u32::from(raw & 0x1F);
    let r8 = (r5 << 3) | (r5 >> 2);
    let g8 = (g6 << 2) | (g6 >> 4);
    let b8 = (b5 << 3) | (b5 >> 2);
    let luma = (r8 * 77 + g8 * 150 + b8 * 29) >> 8;

    if luma >= 128 { BLACK } else { WHITE }
}

/// Draw text with a contrasting outline.
pub fn draw_value_with_outline<D>(
    display: &mut D,
    text: &str,
    position: Point,
    font: &MonoFont<'_>,
    text_color: Rgb565,
    text_style: TextStyle,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let outline_char_style = MonoTextStyle::new(font, outline_color_for_text(text_color));
    let main_char_style = MonoTextStyle::new(font, text_color);

    #[cfg(feature = "simple-outline")]
    const OFFSETS: [(i32, i32); 2] = [(1, 1), (1, 0)];

    #[cfg(not(feature = "simple-outline"))]
    const OFFSETS: [(i32, i32); 8] = [(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (0, 1), (1, 1)];

    for (dx, dy) in OFFSETS {
        let offset_pos = Point::new(position.x + dx, position.y + dy);
        Text::with_text_style(text, offset_pos, outline_char_style, text_style)
            .draw(display)
            .ok();
    }

    Text::with_text_style(text, position, main_char_style, text_style)
        .draw(display)
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{ORANGE, YELLOW};

    #[test]
    fn test_outline_contrasts_with_text() {
        assert_eq!(outline_color_for_text(WHITE), BLACK);
        assert_eq!(outline_color_for_text(YELLOW), BLACK);
        assert_eq!(outline_color_for_text(BLACK), WHITE);
        assert_eq!(outline_color_for_text(ORANGE), BLACK);
    }
}
