//! Power menu.
//!
//! Two entries, Shutdown and Reboot. Enter opens a confirmation box for the
//! selected entry; the box is answered through the dialog rules in
//! [`crate::state::handle_key`], and the render scheduler performs the action.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;

use super::ScreenContext;
use crate::config::MENU_ITEM_COUNT;
use crate::state::{DialogKind, Key};
use crate::styles::{TEXT_CHAR_WIDTH, TEXT_STYLE};
use crate::widgets::draw_confirm_box;

const ITEMS: [&str; MENU_ITEM_COUNT] = ["Shutdown", "Reboot"];

const FIRST_BASELINE: i32 = 16;
const ITEM_SPACING: i32 = 20;

/// Label column, after the two-character selection prefix.
const LABEL_X: i32 = 2 * TEXT_CHAR_WIDTH as i32;

pub(super) fn draw<D>(
    display: &mut D,
    ctx: &ScreenContext<'_>,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    let selected = ctx.nav.menu_index();
    for (i, item) in ITEMS.iter().enumerate() {
        let y = FIRST_BASELINE + i as i32 * ITEM_SPACING;
        if i == selected {
            Text::new("> ", Point::new(0, y), TEXT_STYLE)
                .draw(display)
                .ok();
        }
        Text::new(item, Point::new(LABEL_X, y), TEXT_STYLE)
            .draw(display)
            .ok();
    }

    if ctx.nav.in_dialog() {
        let kind = ctx.nav.dialog_kind();
        if kind != DialogKind::None {
            draw_confirm_box(display, kind.prompt());
        }
    }
}

pub(super) fn handle_key(
    key: Key,
    ctx: &ScreenContext<'_>,
) -> bool {
    let nav = ctx.nav;
    let index = nav.menu_index();
    match key {
        Key::Up if index > 0 => {
            nav.set_menu_index(index - 1);
            true
        }
        Key::Down if index + 1 < MENU_ITEM_COUNT => {
            nav.set_menu_index(index + 1);
            true
        }
        Key::Enter => {
            let kind = DialogKind::from_menu_index(index);
            if kind == DialogKind::None {
                return false;
            }
            nav.set_dialog_kind(kind);
            nav.set_in_dialog(true);
            true
        }
        _ => false,
    }
}
