//! Serial LCD link: init sequence and frame transmission.
//!
//! The module has no acknowledgement channel. Pacing is done with fixed settle
//! delays after each command, so [`LinkTiming`] is the only flow control.

use std::io::Write;
use std::thread;
use std::time::Duration;

use log::{debug, info};

use crate::config::{COMMAND_SETTLE, FIRST_GRAPHICS_SETTLE, GRAPHICS_SETTLE};
use crate::error::{Error, Result};
use crate::protocol::{BankOrder, Command, WireFrame};

/// Settle delays between commands.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LinkTiming {
    /// After each init command.
    pub command_settle: Duration,
    /// After "start graphics" on the first frame.
    pub first_graphics_settle: Duration,
    /// After "start graphics" on later frames.
    pub graphics_settle: Duration,
}

impl LinkTiming {
    /// No delays at all. Used with in-memory writers.
    pub const fn none() -> Self {
        Self {
            command_settle: Duration::ZERO,
            first_graphics_settle: Duration::ZERO,
            graphics_settle: Duration::ZERO,
        }
    }
}

impl Default for LinkTiming {
    fn default() -> Self {
        Self {
            command_settle: COMMAND_SETTLE,
            first_graphics_settle: FIRST_GRAPHICS_SETTLE,
            graphics_settle: GRAPHICS_SETTLE,
        }
    }
}

/// Write side of the display link.
///
/// Generic over the writer so tests can capture the byte stream.
pub struct DisplayLink<W: Write> {
    port: W,
    timing: LinkTiming,
    order: BankOrder,
    frames_sent: u64,
}

impl<W: Write> DisplayLink<W> {
    pub fn new(
        port: W,
        timing: LinkTiming,
        order: BankOrder,
    ) -> Self {
        Self {
            port,
            timing,
            order,
            frames_sent: 0,
        }
    }

    /// Frames transmitted since start-up.
    #[inline]
    pub const fn frames_sent(&self) -> u64 { self.frames_sent }

    /// Borrow the underlying writer.
    #[inline]
    pub fn port(&self) -> &W { &self.port }

    /// Reset, home and clear the display.
    pub fn init(&mut self) -> Result<()> {
        for cmd in Command::INIT_SEQUENCE {
            self.write_command(cmd, self.timing.command_settle)?;
        }
        self.port.flush()?;
        info!("Display initialized");
        Ok(())
    }

    /// Transmit one encoded frame.
    ///
    /// The first frame after start-up waits longer after "start graphics".
    pub fn send_frame(
        &mut self,
        frame: &WireFrame,
    ) -> Result<()> {
        let settle = if self.frames_sent == 0 {
            self.timing.first_graphics_settle
        } else {
            self.timing.graphics_settle
        };
        self.write_command(Command::StartGraphics, settle)?;

        for window in frame.windows(self.order) {
            self.write_data(window)?;
        }
        self.port.flush()?;

        self.frames_sent += 1;
        debug!("Frame {} sent ({} bytes)", self.frames_sent, frame.len());
        Ok(())
    }

    /// Send a command sequence, then wait for the controller.
    fn write_command(
        &mut self,
        cmd: Command,
        settle: Duration,
    ) -> Result<()> {
        self.write_data(cmd.bytes())?;
        if !settle.is_zero() {
            thread::sleep(settle);
        }
        Ok(())
    }

    /// Single write call. Anything less than the full buffer is fatal.
    fn write_data(
        &mut self,
        data: &[u8],
    ) -> Result<()> {
        let written = self.port.write(data)?;
        if written != data.len() {
            return Err(Error::ShortWrite {
                written,
                expected: data.len(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::config::{FRAME_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH, WINDOW_SIZE};
    use crate::framebuffer::Framebuffer;

    /// Writer that accepts at most `limit` bytes per call.
    struct ChokedWriter {
        limit: usize,
    }

    impl Write for ChokedWriter {
        fn write(
            &mut self,
            buf: &[u8],
        ) -> io::Result<usize> {
            Ok(buf.len().min(self.limit))
        }

        fn flush(&mut self) -> io::Result<()> { Ok(()) }
    }

    /// Writer whose every call fails.
    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(
            &mut self,
            _buf: &[u8],
        ) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "unplugged"))
        }

        fn flush(&mut self) -> io::Result<()> { Ok(()) }
    }

    fn link() -> DisplayLink<Vec<u8>> { DisplayLink::new(Vec::new(), LinkTiming::none(), BankOrder::EvenFirst) }

    #[test]
    fn test_init_sequence() {
        let mut link = link();
        link.init().unwrap();
        assert_eq!(link.port(), &[0x1B, 0x40, 0x0B, 0x0C]);
    }

    #[test]
    fn test_frame_layout() {
        let mut fb = Framebuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        // Pixel in block group 0 lands in window 0, group 1 in window 2
        fb.set(0, 0, true);
        fb.set(0, 8, true);
        let frame = WireFrame::encode(&fb).unwrap();

        let mut link = link();
        link.send_frame(&frame).unwrap();
        let out = link.port();

        assert_eq!(out.len(), 2 + FRAME_SIZE);
        assert_eq!(out[..2], [0x1B, 0x47]);
        let payload = &out[2..];
        // First pass: windows 0 and 2 are back to back
        assert_eq!(payload[0], 1);
        assert_eq!(payload[WINDOW_SIZE], 1);
        assert_eq!(payload.iter().filter(|&&b| b != 0).count(), 2);
        assert_eq!(link.frames_sent(), 1);
    }

    #[test]
    fn test_each_frame_restarts_graphics() {
        let frame = WireFrame::encode(&Framebuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT)).unwrap();
        let mut link = link();
        link.send_frame(&frame).unwrap();
        link.send_frame(&frame).unwrap();

        let out = link.port();
        assert_eq!(out.len(), 2 * (2 + FRAME_SIZE));
        assert_eq!(out[2 + FRAME_SIZE..][..2], [0x1B, 0x47]);
        assert_eq!(link.frames_sent(), 2);
    }

    #[test]
    fn test_short_write_is_fatal() {
        let mut link = DisplayLink::new(ChokedWriter { limit: 1 }, LinkTiming::none(), BankOrder::EvenFirst);
        let err = link.init().unwrap_err();
        assert!(matches!(err, Error::ShortWrite { written: 1, expected: 2 }));
    }

    #[test]
    fn test_io_error_is_fatal() {
        let frame = WireFrame::encode(&Framebuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT)).unwrap();
        let mut link = DisplayLink::new(BrokenWriter, LinkTiming::none(), BankOrder::EvenFirst);
        assert!(matches!(link.send_frame(&frame), Err(Error::Io(_))));
        assert_eq!(link.frames_sent(), 0);
    }
}
