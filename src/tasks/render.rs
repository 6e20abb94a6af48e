//! Render scheduler.
//!
//! Owns the framebuffer and the write side of the serial link. Each wake-up
//! (redraw request or 1 s tick) runs one render pass:
//!
//! 1. Consume the pending dialog result and perform the confirmed action.
//! 2. Resolve the requested screen; an out-of-range index keeps the previous
//!    screen.
//! 3. Clear, draw, encode and transmit one frame.
//!
//! A transmit failure ends [`Scheduler::run`] with the error.

use std::io::Write;
use std::sync::Arc;

use crossbeam_channel::{Receiver, never, select, tick};
use log::{debug, info, warn};

use crate::actions::ProcessActions;
use crate::config::{REDRAW_INTERVAL, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::device::DisplayLink;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::protocol::WireFrame;
use crate::screens::{Screen, ScreenContext};
use crate::state::{DialogKind, DialogResult, NavigationState, ServiceAction};
use crate::telemetry::Telemetry;

/// Render loop state.
pub struct Scheduler<W: Write> {
    link: DisplayLink<W>,
    framebuffer: Framebuffer,
    nav: Arc<NavigationState>,
    telemetry: Arc<dyn Telemetry>,
    actions: Arc<dyn ProcessActions>,
    /// Last successfully resolved screen.
    screen: Screen,
}

impl<W: Write> Scheduler<W> {
    pub fn new(
        link: DisplayLink<W>,
        nav: Arc<NavigationState>,
        telemetry: Arc<dyn Telemetry>,
        actions: Arc<dyn ProcessActions>,
    ) -> Self {
        Self {
            link,
            framebuffer: Framebuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            nav,
            telemetry,
            actions,
            screen: Screen::default(),
        }
    }

    #[inline]
    pub fn link(&self) -> &DisplayLink<W> { &self.link }

    #[inline]
    pub fn framebuffer(&self) -> &Framebuffer { &self.framebuffer }

    #[inline]
    pub const fn screen(&self) -> Screen { self.screen }

    /// Initialize the display, then render on every redraw request or tick.
    ///
    /// Only returns on a device error.
    pub fn run(
        mut self,
        redraw: Receiver<()>,
    ) -> Result<()> {
        self.link.init()?;

        let ticker = tick(REDRAW_INTERVAL);
        let mut redraw = redraw;
        info!("Render loop started");

        loop {
            let mut disconnected = false;
            select! {
                recv(redraw) -> msg => disconnected = msg.is_err(),
                recv(ticker) -> _ => {}
            }
            if disconnected {
                warn!("Keypad reader gone, redrawing on the timer only");
                redraw = never();
            }

            self.render_pass()?;
        }
    }

    /// One complete wake-up: dialog dispatch, screen resolve, draw, transmit.
    pub fn render_pass(&mut self) -> Result<()> {
        self.dispatch_dialog_result();
        self.resolve_screen();

        self.framebuffer.clear();
        let ctx = ScreenContext {
            nav: &self.nav,
            telemetry: self.telemetry.as_ref(),
        };
        self.screen.draw(&mut self.framebuffer, &ctx);

        let frame = WireFrame::encode(&self.framebuffer)?;
        self.link.send_frame(&frame)?;
        debug!("Rendered {}", self.screen.name());
        Ok(())
    }

    fn dispatch_dialog_result(&self) {
        match self.nav.take_dialog_result() {
            DialogResult::None => {}
            DialogResult::Confirmed => self.perform_confirmed(),
            DialogResult::Cancelled => {
                debug!("Dialog cancelled");
                // A dialog reopened since the cancel keeps its kind
                if !self.nav.in_dialog() {
                    self.nav.set_dialog_kind(DialogKind::None);
                }
            }
        }
    }

    fn perform_confirmed(&self) {
        let nav = &self.nav;
        match nav.dialog_kind() {
            DialogKind::Shutdown => {
                self.actions.perform_shutdown();
                nav.go_home();
            }
            DialogKind::Reboot => {
                self.actions.perform_reboot();
                nav.go_home();
            }
            DialogKind::None => {
                let action = nav.service_action();
                if !action.is_armed() {
                    return;
                }
                let services = self.telemetry.running_services();
                match services.get(nav.service_index()) {
                    Some(name) => self.actions.perform_service_action(name, action),
                    None => warn!("Selected service is no longer running, {} skipped", action.verb()),
                }
                nav.set_service_action(ServiceAction::None);
            }
        }
    }

    fn resolve_screen(&mut self) {
        let index = self.nav.screen_index();
        match Screen::from_index(index) {
            Some(screen) => {
                if screen != self.screen {
                    debug!("Screen {} -> {}", self.screen.name(), screen.name());
                }
                self.screen = screen;
            }
            None => debug!("Ignoring screen index {index}, keeping {}", self.screen.name()),
        }
    }
}
