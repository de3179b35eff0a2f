//! Pre-computed static text styles for the measurement screen.
//!
//! Styles are `const` so they live in the binary's read-only data and cost
//! nothing to reference from the draw functions.

use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_6X10, FONT_10X20},
    },
    pixelcolor::Rgb565,
    text::{Alignment, TextStyle, TextStyleBuilder},
};
use profont::PROFONT_24_POINT;

use crate::colors::{LIGHT_GRAY, WHITE};

/// Centered text alignment. Used for the title, status, and speed value.
pub const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).build();

/// Status font (10x20 pixels). Exposed for dynamic-color status styles:
/// `MonoTextStyle::new(STATUS_FONT, color)`.
pub const STATUS_FONT: &MonoFont = &FONT_10X20;

/// Small white text for the corner hints.
pub const HINT_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, LIGHT_GRAY);

/// Medium white text for the header title.
pub const TITLE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_10X20, WHITE);

/// Large white text for the angular speed value.
pub const VALUE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_24_POINT, WHITE);

/// Medium text for the frequency and power line.
pub const INFO_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_10X20, LIGHT_GRAY);
