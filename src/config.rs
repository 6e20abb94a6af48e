//! Application configuration constants.
//!
//! Everything the panel needs to know about the attached LCD module and its
//! serial link is fixed at compile time. The only runtime setting is the serial
//! device path, taken from the command line.
//!
//! Derived values (`BYTES_PER_SCANLINE`, `FRAME_SIZE`, window counts) are
//! computed as `const` so the encoder and the tests share one source of truth.

use std::time::Duration;

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels. Must be a multiple of 8.
pub const SCREEN_WIDTH: u32 = 128;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 64;

/// Packed bytes per scanline (8 horizontal pixels per byte).
pub const BYTES_PER_SCANLINE: usize = (SCREEN_WIDTH / 8) as usize;

/// Payload bytes per frame, identical before and after column transposition.
pub const FRAME_SIZE: usize = BYTES_PER_SCANLINE * SCREEN_HEIGHT as usize;

// =============================================================================
// Device Addressing
// =============================================================================

/// Source bytes covered by one column block group (8 scanlines of 16 bytes).
pub const BLOCK_GROUP_BYTES: usize = 8 * 16;

/// Source bytes per bit-plane inside a block group.
pub const PLANE_STRIDE_BYTES: usize = 16;

/// Size of one transmission window. Windows alternate between two passes.
pub const WINDOW_SIZE: usize = 64;

// =============================================================================
// Serial Link
// =============================================================================

/// Serial device used when no path is given on the command line.
pub const DEFAULT_SERIAL_DEVICE: &str = "/dev/ttyS1";

/// Line speed (8N1, no flow control).
pub const BAUD_RATE: u32 = 115_200;

/// Read timeout for the keypad reader. Bounds how long a blocked read waits.
pub const READ_TIMEOUT: Duration = Duration::from_millis(100);

// =============================================================================
// Timing Configuration
// =============================================================================

/// Pause after each init command (reset, home, clear).
///
/// The device has no acknowledgement channel, so pacing is purely time based.
pub const COMMAND_SETTLE: Duration = Duration::from_millis(5);

/// Pause after "start graphics" on the first frame after start-up.
pub const FIRST_GRAPHICS_SETTLE: Duration = Duration::from_millis(500);

/// Pause after "start graphics" on every later frame.
pub const GRAPHICS_SETTLE: Duration = Duration::from_millis(50);

/// Periodic redraw interval when no key is pressed.
pub const REDRAW_INTERVAL: Duration = Duration::from_secs(1);

/// CPU sampling window used when no earlier sample exists.
pub const CPU_SAMPLE_WINDOW: Duration = Duration::from_millis(100);

// =============================================================================
// Screen Layout
// =============================================================================

/// Rows visible at once in the service list.
pub const SERVICE_WINDOW: usize = 3;

/// Number of entries in the power menu.
pub const MENU_ITEM_COUNT: usize = 2;
