//! Widgets for the trip display.
//!
//! All widgets are generic over `DrawTarget<Color = Rgb565>` so the firmware
//! and the simulator draw with the same code.

mod header;
mod popups;
mod primitives;
mod view;

pub use header::{draw_header, mode_title};
pub use popups::{Popup, draw_calibration_popup, draw_popup, draw_reset_popup};
pub use primitives::{draw_divider, draw_value_with_outline, fill_area};
pub use view::draw_view;
