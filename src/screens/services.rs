//! Running services with stop / restart.
//!
//! # Layout
//!
//! ```text
//! > cron         |
//!   dbus         |   3 visible rows, 16px apart from baseline 12
//!   ssh          |   2px scrollbar thumb at the right edge
//! Stop cron? (OK/ESC)   prompt line while an action is armed
//! ```
//!
//! # Keys
//!
//! Up / Down move the selection (clamped, no wrap) and scroll the 3-row
//! window so the selection stays visible. Enter arms Stop on the selected
//! service, which opens the action prompt. While the prompt is open, Left arms
//! Stop, Right arms Restart, Enter confirms and Esc cancels; see
//! [`handle_action_key`].

use core::fmt::Write;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use heapless::String;

use super::ScreenContext;
use crate::config::{SCREEN_WIDTH, SERVICE_WINDOW};
use crate::state::{DialogResult, Key, ServiceAction};
use crate::styles::{SMALL_CHAR_WIDTH, TEXT_CHAR_WIDTH, TEXT_STYLE};
use crate::widgets::{SCROLLBAR_WIDTH, draw_prompt_line, draw_scrollbar, truncate};

// =============================================================================
// Layout Constants
// =============================================================================

/// Baseline of the first row; also the top of the scrollbar area.
const LIST_TOP: i32 = 12;
const ROW_HEIGHT: i32 = 16;
const LIST_HEIGHT: u32 = SERVICE_WINDOW as u32 * ROW_HEIGHT as u32;

const SCROLLBAR_X: i32 = (SCREEN_WIDTH - SCROLLBAR_WIDTH - 1) as i32;

/// Row text budget: full width minus the prefix and room for the scrollbar.
const NAME_CHARS: usize = (SCREEN_WIDTH / TEXT_CHAR_WIDTH) as usize - 2 - 3;

/// Prompt line text budget (6px font).
const PROMPT_CHARS: usize = (SCREEN_WIDTH / SMALL_CHAR_WIDTH) as usize;

const PROMPT_SUFFIX: &str = "? (OK/ESC)";

/// Baseline of the empty-list message.
const EMPTY_Y: i32 = 16;

// =============================================================================
// Scrolling
// =============================================================================

/// First visible row for a `window`-row view of `len` items.
///
/// Keeps `selected` inside the window, moving the view as little as possible
/// from `offset`, and keeps the view inside the list.
pub fn scroll_offset(
    selected: usize,
    offset: usize,
    len: usize,
    window: usize,
) -> usize {
    if len <= window {
        return 0;
    }
    let offset = if selected < offset {
        selected
    } else if selected >= offset + window {
        selected + 1 - window
    } else {
        offset
    };
    offset.min(len - window)
}

// =============================================================================
// Drawing
// =============================================================================

pub(super) fn draw<D>(
    display: &mut D,
    ctx: &ScreenContext<'_>,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    let nav = ctx.nav;
    let services = ctx.telemetry.running_services();

    if services.is_empty() {
        if nav.service_action().is_armed() {
            nav.set_service_action(ServiceAction::None);
        }
        Text::new("No services found", Point::new(0, EMPTY_Y), TEXT_STYLE)
            .draw(display)
            .ok();
        return;
    }

    let len = services.len();
    let selected = nav.service_index().min(len - 1);
    let offset = scroll_offset(selected, nav.service_view_offset(), len, SERVICE_WINDOW);
    nav.set_service_view_offset(offset);

    for (row, (index, name)) in services
        .iter()
        .enumerate()
        .skip(offset)
        .take(SERVICE_WINDOW)
        .enumerate()
    {
        let prefix = if index == selected { "> " } else { "  " };
        let mut line: String<32> = String::new();
        let _ = write!(line, "{prefix}{}", truncate(name, NAME_CHARS));
        Text::new(&line, Point::new(0, LIST_TOP + row as i32 * ROW_HEIGHT), TEXT_STYLE)
            .draw(display)
            .ok();
    }

    draw_scrollbar(display, SCROLLBAR_X, LIST_TOP, LIST_HEIGHT, len, SERVICE_WINDOW, offset);

    let action = nav.service_action();
    if action.is_armed() {
        let name_chars = PROMPT_CHARS
            .saturating_sub(action.label().len() + 1 + PROMPT_SUFFIX.len())
            .max(3);
        let mut prompt: String<48> = String::new();
        let _ = write!(
            prompt,
            "{} {}{PROMPT_SUFFIX}",
            action.label(),
            truncate(&services[selected], name_chars)
        );
        draw_prompt_line(display, &prompt);
    }
}

// =============================================================================
// Key Handling
// =============================================================================

/// Keys while no action is armed.
pub(super) fn handle_key(
    key: Key,
    ctx: &ScreenContext<'_>,
) -> bool {
    let nav = ctx.nav;
    let len = ctx.telemetry.service_count();
    if len == 0 {
        return false;
    }

    let current = nav.service_index().min(len - 1);
    let selected = match key {
        Key::Up if current > 0 => current - 1,
        Key::Down if current + 1 < len => current + 1,
        Key::Enter => {
            nav.set_service_index(current);
            nav.set_service_action(ServiceAction::Stop);
            return true;
        }
        _ => return false,
    };

    nav.set_service_index(selected);
    nav.set_service_view_offset(scroll_offset(selected, nav.service_view_offset(), len, SERVICE_WINDOW));
    true
}

/// Keys while an action is armed. Everything but the four prompt keys is
/// swallowed.
pub fn handle_action_key(
    key: Key,
    ctx: &ScreenContext<'_>,
) -> bool {
    let nav = ctx.nav;
    let arm = |action: ServiceAction| {
        let changed = nav.service_action() != action;
        nav.set_service_action(action);
        changed
    };
    match key {
        Key::Left => arm(ServiceAction::Stop),
        Key::Right => arm(ServiceAction::Restart),
        Key::Enter => {
            nav.set_dialog_result(DialogResult::Confirmed);
            true
        }
        Key::Esc => {
            nav.set_service_action(ServiceAction::None);
            nav.set_dialog_result(DialogResult::Cancelled);
            true
        }
        _ => false,
    }
}
