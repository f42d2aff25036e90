//! Body of the screen for each [`MetricsView`].

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;

use crate::colors::{BLACK, GREEN, ORANGE, WHITE};
use crate::format::{self, ValueText};
use crate::fuel::ConsumptionUnit;
use crate::layout::{
    BIG_CAPTION_POS,
    BIG_UNIT_POS,
    BIG_VALUE_POS,
    BODY_POS,
    BODY_SIZE,
    HEADER_HEIGHT,
    SCREEN_WIDTH,
    TOTALS_LABEL_X,
    TOTALS_ROW_HEIGHT,
    TOTALS_UNIT_X,
    TOTALS_VALUE_X,
    totals_row_baseline,
};
use crate::metrics::MetricsView;
use crate::styles::{
    CENTERED,
    LABEL_STYLE_GRAY,
    LABEL_STYLE_WHITE,
    LEFT_ALIGNED,
    RIGHT_ALIGNED,
    VALUE_FONT,
    VALUE_FONT_MEDIUM,
};
use crate::widgets::primitives::{draw_divider, draw_value_with_outline, fill_area};

/// Clear the body and draw `view` into it.
pub fn draw_view<D>(
    display: &mut D,
    view: &MetricsView,
) where
    D: DrawTarget<Color = Rgb565>,
{
    fill_area(display, BODY_POS, BODY_SIZE, BLACK);

    match *view {
        MetricsView::FuelTotals {
            used_fuel,
            sailing_distance,
            fuel_left,
        } => {
            draw_totals_row(display, 0, "USED FUEL", &format::used_fuel(used_fuel), "L", WHITE);
            draw_totals_row(display, 1, "SAILING", &format::distance(sailing_distance), "KM", GREEN);
            draw_totals_row(display, 2, "FUEL LEFT", &format::fuel_left(fuel_left), "L", WHITE);
            for row in 1..3 {
                draw_divider(display, (HEADER_HEIGHT + row * TOTALS_ROW_HEIGHT) as i32, SCREEN_WIDTH);
            }
        }
        MetricsView::Speed { speed } => {
            draw_big_value(display, "SPEED", &format::speed(speed), "KM/H", WHITE);
        }
        MetricsView::InstantConsumption { consumption, unit } => {
            // Idle rate is not comparable with L/100 km; set it apart
            let color = match unit {
                ConsumptionUnit::LitresPer100Km => WHITE,
                ConsumptionUnit::LitresPerHour => ORANGE,
            };
            draw_big_value(display, "CONSUMPTION", &format::consumption(consumption), unit.label(), color);
        }
    }
}

fn draw_totals_row<D>(
    display: &mut D,
    row: u32,
    label: &str,
    value: &ValueText,
    unit: &str,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let baseline = totals_row_baseline(row);

    Text::with_text_style(label, Point::new(TOTALS_LABEL_X, baseline), LABEL_STYLE_WHITE, LEFT_ALIGNED)
        .draw(display)
        .ok();
    draw_value_with_outline(
        display,
        value,
        Point::new(TOTALS_VALUE_X, baseline),
        VALUE_FONT_MEDIUM,
        color,
        RIGHT_ALIGNED,
    );
    Text::with_text_style(unit, Point::new(TOTALS_UNIT_X, baseline), LABEL_STYLE_GRAY, LEFT_ALIGNED)
        .draw(display)
        .ok();
}

fn draw_big_value<D>(
    display: &mut D,
    caption: &str,
    value: &ValueText,
    unit: &str,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Text::with_text_style(caption, BIG_CAPTION_POS, LABEL_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();
    draw_value_with_outline(display, value, BIG_VALUE_POS, VALUE_FONT, color, CENTERED);
    Text::with_text_style(unit, BIG_UNIT_POS, LABEL_STYLE_GRAY, CENTERED)
        .draw(display)
        .ok();
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use super::*;
    use crate::layout::{SCREEN_HEIGHT, SCREEN_WIDTH};

    /// Counts pixels drawn per color of interest.
    #[derive(Default)]
    struct PixelCounter {
        green: usize,
        orange: usize,
        out_of_bounds: usize,
    }

    impl OriginDimensions for PixelCounter {
        fn size(&self) -> Size { Size::new(SCREEN_WIDTH, SCREEN_HEIGHT) }
    }

    impl DrawTarget for PixelCounter {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(
            &mut self,
            pixels: I,
        ) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            let bounds = self.bounding_box();
            for Pixel(point, color) in pixels {
                if !bounds.contains(point) {
                    self.out_of_bounds += 1;
                }
                if color == GREEN {
                    self.green += 1;
                }
                if color == ORANGE {
                    self.orange += 1;
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_totals_highlight_sailing_distance() {
        let mut display = PixelCounter::default();
        let view = MetricsView::FuelTotals {
            used_fuel: 1.2,
            sailing_distance: 3.4,
            fuel_left: 66.8,
        };
        draw_view(&mut display, &view);
        assert!(display.green > 0);
        assert_eq!(display.out_of_bounds, 0);
    }

    #[test]
    fn test_idle_rate_drawn_in_orange() {
        let mut display = PixelCounter::default();
        let view = MetricsView::InstantConsumption {
            consumption: 0.9,
            unit: ConsumptionUnit::LitresPerHour,
        };
        draw_view(&mut display, &view);
        assert!(display.orange > 0);
    }

    #[test]
    fn test_distance_rate_not_orange() {
        let mut display = PixelCounter::default();
        let view = MetricsView::InstantConsumption {
            consumption: 6.5,
            unit: ConsumptionUnit::LitresPer100Km,
        };
        draw_view(&mut display, &view);
        assert_eq!(display.orange, 0);
        assert_eq!(display.out_of_bounds, 0);
    }
}
