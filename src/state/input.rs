//! Key press dispatch.
//!
//! Applies one key press to the [`NavigationState`]. Rules are tried in order
//! and the first one that owns the key wins:
//!
//! 0. Confirmation pending: every key is ignored until the render scheduler
//!    has taken the result, so the confirmed action cannot be retargeted.
//! 1. Confirmation dialog open: Enter confirms, Esc cancels.
//! 2. Service action prompt open: Left / Right pick the action, Enter
//!    confirms, Esc cancels.
//! 3. About screen: Esc goes back to screen 0.
//! 4. Global keys: Help opens About, Left / Right cycle screens, Esc toggles
//!    the power menu.
//! 5. Everything else goes to the current screen.
//!
//! Confirmed and cancelled results are only recorded here. The render
//! scheduler consumes them, performs the action and is the only place a
//! result goes back to none.

use super::{DialogResult, Key, NavigationState};
use crate::screens::{Screen, ScreenContext, handle_action_key};

/// Apply `key`. Returns whether a redraw is needed.
pub fn handle_key(
    key: Key,
    ctx: &ScreenContext<'_>,
) -> bool {
    let nav = ctx.nav;
    if nav.dialog_result() == DialogResult::Confirmed {
        return false;
    }
    if nav.in_dialog() {
        return handle_dialog_key(nav, key);
    }

    let screen = Screen::from_index(nav.screen_index()).unwrap_or_default();

    if screen == Screen::ServiceManager && nav.service_action().is_armed() {
        return handle_action_key(key, ctx);
    }

    if screen == Screen::About {
        if key != Key::Esc {
            return false;
        }
        nav.go_home();
        return true;
    }

    match key {
        Key::Help => {
            nav.set_in_menu(false);
            nav.set_screen_index(Screen::About.index());
            true
        }
        Key::Left => cycle_to(nav, screen.prev()),
        Key::Right => cycle_to(nav, screen.next()),
        Key::Esc if nav.in_menu() => {
            nav.go_home();
            true
        }
        Key::Esc => {
            nav.enter_menu(Screen::Menu.index());
            true
        }
        _ => screen.handle_key(key, ctx),
    }
}

/// Confirmation dialog: only Enter and Esc act, both close it.
fn handle_dialog_key(
    nav: &NavigationState,
    key: Key,
) -> bool {
    let result = match key {
        Key::Enter => DialogResult::Confirmed,
        Key::Esc => DialogResult::Cancelled,
        _ => return false,
    };
    nav.set_dialog_result(result);
    nav.set_in_dialog(false);
    true
}

/// Move to `target`, entering the menu modal when landing on it.
fn cycle_to(
    nav: &NavigationState,
    target: Screen,
) -> bool {
    nav.set_screen_index(target.index());
    if target == Screen::Menu {
        nav.set_menu_index(0);
        nav.set_in_menu(true);
    } else {
        nav.set_in_menu(false);
    }
    true
}
