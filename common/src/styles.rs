//! Pre-computed static text styles.
//!
//! `MonoTextStyle` and `TextStyle` are `const`-constructible, so every style
//! used per frame lives in read-only data instead of being rebuilt by each
//! draw call. `VALUE_FONT` is exposed for styles whose color changes at
//! runtime.

use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_6X10, FONT_10X20},
    },
    pixelcolor::Rgb565,
    text::{Alignment, TextStyle, TextStyleBuilder},
};
use profont::{PROFONT_18_POINT, PROFONT_24_POINT};

use crate::colors::{GRAY, WHITE, YELLOW};

// =============================================================================
// Text Alignment Styles
// =============================================================================

pub const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).build();

pub const LEFT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Left).build();

pub const RIGHT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Right).build();

// =============================================================================
// Fonts
// =============================================================================

/// Big value font (`ProFont` 24pt).
pub const VALUE_FONT: &MonoFont = &PROFONT_24_POINT;

/// Value font for the three-row totals view (`ProFont` 18pt).
pub const VALUE_FONT_MEDIUM: &MonoFont = &PROFONT_18_POINT;

// =============================================================================
// Text Styles
// =============================================================================

/// Small white text for captions.
pub const LABEL_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, WHITE);

/// Small gray text for unit labels.
pub const LABEL_STYLE_GRAY: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, GRAY);

/// Small yellow text for the calibration indicator.
pub const LABEL_STYLE_YELLOW: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, YELLOW);

/// Header title and popup text (10x20 pixels).
pub const TITLE_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_10X20, WHITE);

/// Medium white values in the totals view.
pub const VALUE_STYLE_MEDIUM: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_18_POINT, WHITE);
