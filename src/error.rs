//! Error type for the device path.
//!
//! Only the serial link and frame assembly can fail. Telemetry and navigation
//! never produce errors: they degrade to zeroed values or clamp indices.

use core::fmt;
use std::io;

/// Result alias used across the library.
pub type Result<T> = core::result::Result<T, Error>;

/// Fatal errors on the way from framebuffer to device.
#[derive(Debug)]
pub enum Error {
    /// Opening or configuring the serial port failed.
    Serial(serialport::Error),
    /// A read or write on the serial port failed.
    Io(io::Error),
    /// The port accepted fewer bytes than were handed to it.
    ShortWrite { written: usize, expected: usize },
    /// Packed frame data could not be brought to the device frame size.
    FrameSize { actual: usize, expected: usize },
}

impl fmt::Display for Error {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Serial(e) => write!(f, "serial port error: {e}"),
            Self::Io(e) => write!(f, "serial I/O error: {e}"),
            Self::ShortWrite { written, expected } => {
                write!(f, "serial write error: wrote only {written} of {expected} bytes")
            }
            Self::FrameSize { actual, expected } => write!(
                f,
                "pixel data is {actual} bytes, expected {expected} and not a whole number of scanlines"
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serial(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::ShortWrite { .. } | Self::FrameSize { .. } => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self { Self::Io(e) }
}

impl From<serialport::Error> for Error {
    fn from(e: serialport::Error) -> Self { Self::Serial(e) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_write_message() {
        let err = Error::ShortWrite { written: 3, expected: 64 };
        assert_eq!(err.to_string(), "serial write error: wrote only 3 of 64 bytes");
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = Error::from(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
