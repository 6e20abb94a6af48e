//! Shared navigation state.
//!
//! Written by the key reader thread, read (and partly reset) by the render
//! scheduler. Every field is its own atomic; there is no lock and no
//! cross-field consistency beyond what the key handlers establish in program
//! order. The redraw channel provides the happens-before edge between a key
//! press and the render pass it triggers.
//!
//! `dialog_result` is the one hand-off field: the key reader stores a result,
//! the scheduler takes it with a `swap`, so a result is consumed by exactly one
//! render pass.

use core::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};

use super::{DialogKind, DialogResult, ServiceAction};

/// Cursor fields are independent.
const CURSOR: Ordering = Ordering::Relaxed;
/// Modal fields order against each other.
const MODAL: Ordering = Ordering::SeqCst;

/// Navigation cursors and modal flags.
#[derive(Debug, Default)]
pub struct NavigationState {
    current_screen: AtomicUsize,
    in_menu: AtomicBool,
    menu_index: AtomicUsize,
    in_dialog: AtomicBool,
    dialog_kind: AtomicU8,
    dialog_result: AtomicU8,
    net_iface_index: AtomicUsize,
    service_index: AtomicUsize,
    service_view_offset: AtomicUsize,
    service_action: AtomicU8,
}

/// Plain copy of every field at one point in time.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct NavigationSnapshot {
    pub current_screen: usize,
    pub in_menu: bool,
    pub menu_index: usize,
    pub in_dialog: bool,
    pub dialog_kind: DialogKind,
    pub dialog_result: DialogResult,
    pub net_iface_index: usize,
    pub service_index: usize,
    pub service_view_offset: usize,
    pub service_action: ServiceAction,
}

impl NavigationState {
    /// Normal mode on screen 0.
    pub fn new() -> Self { Self::default() }

    // -------------------------------------------------------------------------
    // Screen
    // -------------------------------------------------------------------------

    #[inline]
    pub fn screen_index(&self) -> usize { self.current_screen.load(MODAL) }

    #[inline]
    pub fn set_screen_index(
        &self,
        index: usize,
    ) {
        self.current_screen.store(index, MODAL);
    }

    // -------------------------------------------------------------------------
    // Menu
    // -------------------------------------------------------------------------

    #[inline]
    pub fn in_menu(&self) -> bool { self.in_menu.load(MODAL) }

    #[inline]
    pub fn set_in_menu(
        &self,
        on: bool,
    ) {
        self.in_menu.store(on, MODAL);
    }

    #[inline]
    pub fn menu_index(&self) -> usize { self.menu_index.load(CURSOR) }

    #[inline]
    pub fn set_menu_index(
        &self,
        index: usize,
    ) {
        self.menu_index.store(index, CURSOR);
    }

    // -------------------------------------------------------------------------
    // Dialog
    // -------------------------------------------------------------------------

    #[inline]
    pub fn in_dialog(&self) -> bool { self.in_dialog.load(MODAL) }

    #[inline]
    pub fn set_in_dialog(
        &self,
        on: bool,
    ) {
        self.in_dialog.store(on, MODAL);
    }

    #[inline]
    pub fn dialog_kind(&self) -> DialogKind { DialogKind::from_u8(self.dialog_kind.load(MODAL)) }

    #[inline]
    pub fn set_dialog_kind(
        &self,
        kind: DialogKind,
    ) {
        self.dialog_kind.store(kind as u8, MODAL);
    }

    #[inline]
    pub fn dialog_result(&self) -> DialogResult { DialogResult::from_u8(self.dialog_result.load(MODAL)) }

    #[inline]
    pub fn set_dialog_result(
        &self,
        result: DialogResult,
    ) {
        self.dialog_result.store(result as u8, MODAL);
    }

    /// Consume the pending result, leaving `None` behind.
    #[inline]
    pub fn take_dialog_result(&self) -> DialogResult {
        DialogResult::from_u8(self.dialog_result.swap(DialogResult::None as u8, MODAL))
    }

    // -------------------------------------------------------------------------
    // Lists
    // -------------------------------------------------------------------------

    #[inline]
    pub fn net_iface_index(&self) -> usize { self.net_iface_index.load(CURSOR) }

    #[inline]
    pub fn set_net_iface_index(
        &self,
        index: usize,
    ) {
        self.net_iface_index.store(index, CURSOR);
    }

    #[inline]
    pub fn service_index(&self) -> usize { self.service_index.load(CURSOR) }

    #[inline]
    pub fn set_service_index(
        &self,
        index: usize,
    ) {
        self.service_index.store(index, CURSOR);
    }

    #[inline]
    pub fn service_view_offset(&self) -> usize { self.service_view_offset.load(CURSOR) }

    #[inline]
    pub fn set_service_view_offset(
        &self,
        offset: usize,
    ) {
        self.service_view_offset.store(offset, CURSOR);
    }

    #[inline]
    pub fn service_action(&self) -> ServiceAction { ServiceAction::from_u8(self.service_action.load(MODAL)) }

    #[inline]
    pub fn set_service_action(
        &self,
        action: ServiceAction,
    ) {
        self.service_action.store(action as u8, MODAL);
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Open the power menu with the first entry selected.
    pub fn enter_menu(
        &self,
        menu_screen: usize,
    ) {
        self.set_screen_index(menu_screen);
        self.set_menu_index(0);
        self.set_in_menu(true);
    }

    /// Leave every modal and go back to screen 0.
    pub fn go_home(&self) {
        self.set_in_dialog(false);
        self.set_dialog_kind(DialogKind::None);
        self.set_in_menu(false);
        self.set_menu_index(0);
        self.set_screen_index(0);
    }

    pub fn snapshot(&self) -> NavigationSnapshot {
        NavigationSnapshot {
            current_screen: self.screen_index(),
            in_menu: self.in_menu(),
            menu_index: self.menu_index(),
            in_dialog: self.in_dialog(),
            dialog_kind: self.dialog_kind(),
            dialog_result: self.dialog_result(),
            net_iface_index: self.net_iface_index(),
            service_index: self.service_index(),
            service_view_offset: self.service_view_offset(),
            service_action: self.service_action(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_normal_mode() {
        let nav = NavigationState::new();
        assert_eq!(nav.snapshot(), NavigationSnapshot::default());
    }

    #[test]
    fn test_take_dialog_result_consumes_once() {
        let nav = NavigationState::new();
        nav.set_dialog_result(DialogResult::Confirmed);
        assert_eq!(nav.take_dialog_result(), DialogResult::Confirmed);
        assert_eq!(nav.take_dialog_result(), DialogResult::None);
    }

    #[test]
    fn test_go_home_resets_modals() {
        let nav = NavigationState::new();
        nav.enter_menu(3);
        nav.set_menu_index(1);
        nav.set_in_dialog(true);
        nav.set_dialog_kind(DialogKind::Reboot);

        nav.go_home();
        let snap = nav.snapshot();
        assert_eq!(snap.current_screen, 0);
        assert!(!snap.in_menu);
        assert_eq!(snap.menu_index, 0);
        assert!(!snap.in_dialog);
        assert_eq!(snap.dialog_kind, DialogKind::None);
    }
}
