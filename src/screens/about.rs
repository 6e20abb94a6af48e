//! Product name and version. Help opens it from anywhere, Esc leaves.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Line;
use embedded_graphics::text::Text;

use crate::config::SCREEN_WIDTH;
use crate::styles::{CENTERED, INK_STROKE, SMALL_STYLE, TEXT_STYLE, TITLE_STYLE};

const TITLE: &str = "LCD Panel";
const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));
const HINT: &str = "ESC to return";

const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;
const TITLE_POS: Point = Point::new(CENTER_X, 16);
const RULE_Y: i32 = 21;
const VERSION_POS: Point = Point::new(CENTER_X, 38);
const HINT_POS: Point = Point::new(CENTER_X, 60);

pub(super) fn draw<D>(display: &mut D)
where
    D: DrawTarget<Color = BinaryColor>,
{
    Text::with_text_style(TITLE, TITLE_POS, TITLE_STYLE, CENTERED)
        .draw(display)
        .ok();
    Line::new(Point::new(16, RULE_Y), Point::new(SCREEN_WIDTH as i32 - 17, RULE_Y))
        .into_styled(INK_STROKE)
        .draw(display)
        .ok();
    Text::with_text_style(VERSION, VERSION_POS, TEXT_STYLE, CENTERED)
        .draw(display)
        .ok();
    Text::with_text_style(HINT, HINT_POS, SMALL_STYLE, CENTERED)
        .draw(display)
        .ok();
}
