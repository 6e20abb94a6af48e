//! Modal prompt overlays.
//!
//! Both prompts clear the area they cover before drawing, so they stay legible
//! over whatever the screen drew underneath.
//!
//! - [`draw_confirm_box`]: bordered box over the lower part of the screen, used
//!   by the power menu.
//! - [`draw_prompt_line`]: single unbordered line at the bottom edge, used by
//!   the service list where rows leave no room for a box.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Baseline, Text};

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::styles::{CENTERED, INK_STROKE, PAPER_FILL, SMALL_STYLE};

// =============================================================================
// Confirm Box Layout Constants
// =============================================================================

const BOX_WIDTH: u32 = 120;
const BOX_HEIGHT: u32 = 20;
const BOX_X: i32 = (SCREEN_WIDTH - BOX_WIDTH) as i32 / 2;
const BOX_Y: i32 = (SCREEN_HEIGHT - BOX_HEIGHT) as i32 - 1;

const BOX_POS: Point = Point::new(BOX_X, BOX_Y);
const BOX_SIZE: Size = Size::new(BOX_WIDTH, BOX_HEIGHT);

/// Baseline of the box text (6x10 font, vertically centered).
const BOX_TEXT_POS: Point = Point::new((SCREEN_WIDTH / 2) as i32, BOX_Y + 13);

// =============================================================================
// Prompt Line Layout Constants
// =============================================================================

/// Height of the cleared strip behind the prompt line.
const LINE_HEIGHT: u32 = 11;
const LINE_POS: Point = Point::new(0, (SCREEN_HEIGHT - LINE_HEIGHT) as i32);
const LINE_SIZE: Size = Size::new(SCREEN_WIDTH, LINE_HEIGHT);

// =============================================================================
// Drawing Functions
// =============================================================================

/// Draw a bordered confirmation box with one centered line of text.
pub fn draw_confirm_box<D>(
    display: &mut D,
    text: &str,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    Rectangle::new(BOX_POS, BOX_SIZE)
        .into_styled(PAPER_FILL)
        .draw(display)
        .ok();
    Rectangle::new(BOX_POS, BOX_SIZE)
        .into_styled(INK_STROKE)
        .draw(display)
        .ok();

    Text::with_text_style(text, BOX_TEXT_POS, SMALL_STYLE, CENTERED)
        .draw(display)
        .ok();
}

/// Draw one line of small text along the bottom edge.
pub fn draw_prompt_line<D>(
    display: &mut D,
    text: &str,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    Rectangle::new(LINE_POS, LINE_SIZE)
        .into_styled(PAPER_FILL)
        .draw(display)
        .ok();

    Text::with_baseline(text, LINE_POS + Point::new(0, 1), SMALL_STYLE, Baseline::Top)
        .draw(display)
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::Framebuffer;

    #[test]
    fn test_confirm_box_border() {
        let mut fb = Framebuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        draw_confirm_box(&mut fb, "Reboot? (OK/ESC)");

        let (x0, y0) = (BOX_X as u32, BOX_Y as u32);
        assert!(fb.is_dark(x0, y0));
        assert!(fb.is_dark(x0 + BOX_WIDTH - 1, y0 + BOX_HEIGHT - 1));
        assert!(!fb.is_dark(x0 - 1, y0));
        // Text inside the border
        let inner = (y0 + 2..y0 + BOX_HEIGHT - 2).any(|y| (x0 + 2..x0 + BOX_WIDTH - 2).any(|x| fb.is_dark(x, y)));
        assert!(inner);
    }

    #[test]
    fn test_prompt_line_clears_strip() {
        let mut fb = Framebuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        for x in 0..SCREEN_WIDTH {
            fb.set(x, SCREEN_HEIGHT - 1, true);
        }
        draw_prompt_line(&mut fb, "");
        assert_eq!(fb.dark_count(), 0);
    }
}
