//! The measurement status screen.
//!
//! One full-screen layout: header bar, status label, the angular speed value
//! (or a `--` sentinel while no result is shown), and a frequency/power line.
//! Drawn only when the presenter reports the frame dirty.

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use heapless::String;
use tacho_pico2::measure::MeasurementState;
use tacho_pico2::presenter::{DisplayFrame, status_label};

use crate::colors::{BLACK, DARK_TEAL, GREEN, ORANGE, YELLOW};
use crate::styles::{CENTERED, HINT_STYLE, INFO_STYLE, STATUS_FONT, TITLE_STYLE, VALUE_STYLE};

const HEADER_RECT: Rectangle = Rectangle::new(Point::new(0, 0), Size::new(320, 26));
const HEADER_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(DARK_TEAL);
const TITLE_POS: Point = Point::new(160, 19);
const STATUS_POS: Point = Point::new(160, 84);
const VALUE_POS: Point = Point::new(160, 144);
const INFO_POS: Point = Point::new(160, 204);
const HINT_POS: Point = Point::new(6, 234);

const fn status_color(state: MeasurementState) -> Rgb565 {
    match state {
        MeasurementState::Idle => GREEN,
        MeasurementState::WarmingUp => YELLOW,
        MeasurementState::Counting => ORANGE,
        MeasurementState::Locked => GREEN,
    }
}

/// Draw one frame of the status screen into the framebuffer.
pub fn draw_status_screen<D>(
    display: &mut D,
    frame: &DisplayFrame,
) where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(BLACK).ok();

    HEADER_RECT.into_styled(HEADER_FILL).draw(display).ok();
    Text::with_text_style("MOTOR RIG", TITLE_POS, TITLE_STYLE, CENTERED)
        .draw(display)
        .ok();

    let status_style = MonoTextStyle::new(STATUS_FONT, status_color(frame.status));
    Text::with_text_style(status_label(frame.status), STATUS_POS, status_style, CENTERED)
        .draw(display)
        .ok();

    let mut value: String<24> = String::new();
    match frame.angular_speed {
        Some(speed) => {
            let _ = write!(value, "{speed:.2} rad/s");
        }
        None => {
            let _ = write!(value, "--");
        }
    }
    Text::with_text_style(&value, VALUE_POS, VALUE_STYLE, CENTERED)
        .draw(display)
        .ok();

    let mut info: String<32> = String::new();
    let _ = write!(info, "f: {:.0} Hz   P: {}", frame.frequency, frame.level.label());
    Text::with_text_style(&info, INFO_POS, INFO_STYLE, CENTERED)
        .draw(display)
        .ok();

    Text::new("SW1 start/reset  SW2 50%  SW3 75%/100%", HINT_POS, HINT_STYLE)
        .draw(display)
        .ok();
}
