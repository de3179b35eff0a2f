//! Color constants for the measurement screen.
//!
//! Rgb565 is native to the ST7789, so these values go into the framebuffer
//! unconverted.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

/// Background and dark text.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Primary text on the dark background.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Ready state and locked results.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Warm-up phase.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

/// Counting window indicator.
/// RGB565: (31, 32, 0) - slightly darker than yellow.
pub const ORANGE: Rgb565 = Rgb565::new(31, 32, 0);

/// Header bar fill.
/// RGB565: (0, 20, 10) - blue-green, darker than full cyan.
pub const DARK_TEAL: Rgb565 = Rgb565::new(0, 20, 10);

/// Secondary text (frequency/power line).
/// RGB565: (16, 32, 16) - roughly half brightness.
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(16, 32, 16);
