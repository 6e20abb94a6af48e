//! Keypad reader thread.
//!
//! Blocks on one-byte reads from the serial port, decodes key codes, applies
//! them to the shared [`NavigationState`] and asks the render scheduler for a
//! redraw when something changed.
//!
//! # Redraw Coalescing
//!
//! The redraw channel has capacity 1 and is fed with `try_send`. A burst of key
//! presses before the scheduler wakes leaves a single pending signal; the
//! render pass that consumes it sees the final state.

use std::io::{self, Read};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Sender, TrySendError};
use log::{debug, info, warn};

use crate::config::READ_TIMEOUT;
use crate::screens::ScreenContext;
use crate::state::{Key, NavigationState, handle_key};
use crate::telemetry::Telemetry;

/// Ask for a redraw unless one is already pending.
pub fn request_redraw(redraw: &Sender<()>) {
    match redraw.try_send(()) {
        Ok(()) | Err(TrySendError::Full(())) => {}
        Err(TrySendError::Disconnected(())) => debug!("Redraw request dropped, scheduler gone"),
    }
}

/// Serial keypad input bound to the navigation state.
pub struct KeyReader<R: Read> {
    port: R,
    nav: Arc<NavigationState>,
    telemetry: Arc<dyn Telemetry>,
    redraw: Sender<()>,
}

impl<R: Read> KeyReader<R> {
    pub fn new(
        port: R,
        nav: Arc<NavigationState>,
        telemetry: Arc<dyn Telemetry>,
        redraw: Sender<()>,
    ) -> Self {
        Self {
            port,
            nav,
            telemetry,
            redraw,
        }
    }

    /// Handle one received byte. Returns whether it changed the state.
    pub fn process_byte(
        &self,
        byte: u8,
    ) -> bool {
        let Some(key) = Key::from_code(byte) else {
            debug!("Ignoring keypad byte {byte:#04x}");
            return false;
        };

        let ctx = ScreenContext {
            nav: &self.nav,
            telemetry: self.telemetry.as_ref(),
        };
        let changed = handle_key(key, &ctx);
        debug!("Key {key:?} changed={changed}");
        if changed {
            request_redraw(&self.redraw);
        }
        changed
    }

    /// Read keys until the port reports end of input.
    ///
    /// Timeouts are silent. Other read errors are logged and followed by a
    /// pause of one read timeout.
    pub fn run(mut self) {
        info!("Keypad reader started");
        let mut buf = [0u8; 1];
        loop {
            match self.port.read(&mut buf) {
                Ok(0) => {
                    info!("Keypad input closed");
                    return;
                }
                Ok(_) => {
                    self.process_byte(buf[0]);
                }
                Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::Interrupted) => {}
                Err(e) => {
                    warn!("Keypad read error: {e}");
                    thread::sleep(READ_TIMEOUT);
                }
            }
        }
    }
}

impl<R: Read + Send + 'static> KeyReader<R> {
    /// Run the reader on a named background thread.
    pub fn spawn(self) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("keypad".into())
            .spawn(move || self.run())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crossbeam_channel::bounded;

    use super::*;
    use crate::screens::Screen;
    use crate::telemetry::StaticTelemetry;

    fn reader<R: Read>(port: R) -> (KeyReader<R>, crossbeam_channel::Receiver<()>) {
        let (tx, rx) = bounded(1);
        let reader = KeyReader::new(
            port,
            Arc::new(NavigationState::new()),
            Arc::new(StaticTelemetry::default()),
            tx,
        );
        (reader, rx)
    }

    #[test]
    fn test_redraw_requests_coalesce() {
        let (reader, rx) = reader(io::empty());
        assert!(reader.process_byte(Key::Right.code()));
        assert!(reader.process_byte(Key::Right.code()));
        assert!(reader.process_byte(Key::Down.code()));
        assert_eq!(rx.len(), 1);
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_unchanged_press_does_not_redraw() {
        let (reader, rx) = reader(io::empty());
        // Up on the system screen has no effect
        assert!(!reader.process_byte(Key::Up.code()));
        assert!(rx.is_empty());
    }

    #[test]
    fn test_unknown_byte_ignored() {
        let (reader, rx) = reader(io::empty());
        assert!(!reader.process_byte(0x00));
        assert!(!reader.process_byte(b'z'));
        assert!(rx.is_empty());
        assert_eq!(reader.nav.screen_index(), 0);
    }

    #[test]
    fn test_run_consumes_stream() {
        let bytes = vec![Key::Esc.code(), 0xFF, Key::Down.code()];
        let (reader, rx) = reader(Cursor::new(bytes));
        let nav = Arc::clone(&reader.nav);
        reader.run();

        assert_eq!(nav.screen_index(), Screen::Menu.index());
        assert!(nav.in_menu());
        assert_eq!(nav.menu_index(), 1);
        assert_eq!(rx.len(), 1);
    }

    #[test]
    fn test_disconnected_scheduler_is_harmless() {
        let (reader, rx) = reader(io::empty());
        drop(rx);
        assert!(reader.process_byte(Key::Left.code()));
    }
}
