//! Wire format of the serial graphic LCD.
//!
//! The controller does not take scanlines. It takes column bytes grouped into
//! blocks of 8 scanlines, where each scanline of a block contributes one bit
//! plane. A frame travels as:
//!
//! ```text
//! 1B 47                         start graphics
//! <settle>
//! cols[0..64]   cols[128..192] ...   even 64-byte windows
//! cols[64..128] cols[192..256] ...   odd 64-byte windows
//! ```
//!
//! Encoding a [`Framebuffer`] is three steps: pack (bottom-up scanlines), reverse
//! the scanline order, transpose into columns. For the 128x64 panel this puts
//! pixel (x, y) at bit `y % 8` of `cols[(y / 8) * 128 + x]`.

use log::warn;

use crate::config::{BLOCK_GROUP_BYTES, PLANE_STRIDE_BYTES, WINDOW_SIZE};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;

// =============================================================================
// Device Commands
// =============================================================================

/// Control sequences understood by the LCD module.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    /// Reset controller state (`ESC @`).
    Reset,
    /// Move the cursor home (`VT`).
    Home,
    /// Clear the display (`FF`).
    Clear,
    /// Switch to graphics mode; payload bytes follow (`ESC G`).
    StartGraphics,
}

impl Command {
    /// Sequence sent once at start-up, each command followed by a settle delay.
    pub const INIT_SEQUENCE: [Self; 3] = [Self::Reset, Self::Home, Self::Clear];

    pub const fn bytes(self) -> &'static [u8] {
        match self {
            Self::Reset => &[0x1B, 0x40],
            Self::Home => &[0x0B],
            Self::Clear => &[0x0C],
            Self::StartGraphics => &[0x1B, 0x47],
        }
    }
}

// =============================================================================
// Transmission Order
// =============================================================================

/// Which 64-byte windows go out in the first pass.
///
/// The device latches the two halves of each block group in separate passes.
/// `EvenFirst` matches the modules seen so far.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum BankOrder {
    #[default]
    EvenFirst,
    OddFirst,
}

impl BankOrder {
    /// Window index parity sent in the first pass.
    const fn first_parity(self) -> usize {
        match self {
            Self::EvenFirst => 0,
            Self::OddFirst => 1,
        }
    }
}

// =============================================================================
// Encoding Steps
// =============================================================================

/// Bring packed pixel data to exactly `expected` bytes.
///
/// Longer data is truncated. Shorter data made of whole scanlines is padded
/// with light pixels. Anything else cannot be laid out and is rejected.
pub fn fit_frame(
    mut packed: Vec<u8>,
    expected: usize,
    bytes_per_scanline: usize,
) -> Result<Vec<u8>> {
    let actual = packed.len();
    if actual > expected {
        packed.truncate(expected);
    } else if actual < expected {
        if bytes_per_scanline == 0 || actual % bytes_per_scanline != 0 {
            return Err(Error::FrameSize { actual, expected });
        }
        warn!(
            "Frame is {} scanlines short, padding with blank rows",
            (expected - actual) / bytes_per_scanline
        );
        packed.resize(expected, 0);
    }
    Ok(packed)
}

/// Reverse scanline order: the last scanline comes first.
pub fn reverse_scanlines(
    packed: &[u8],
    bytes_per_scanline: usize,
) -> Vec<u8> {
    packed
        .chunks(bytes_per_scanline)
        .rev()
        .flatten()
        .copied()
        .collect()
}

/// Transpose scanline bytes into the controller's column layout.
///
/// Scanline `k` lands in block group `k * bps / 128` on bit plane
/// `(k * bps % 128) / 16`. Each set source bit adds its plane mask to one
/// column byte (MSB = first column of the byte). Planes accumulate by addition,
/// so a doubled bit carries into the next plane instead of vanishing.
pub fn transpose_columns(
    scanlines: &[u8],
    width: u32,
    height: u32,
) -> Vec<u8> {
    let bytes_per_scanline = (width / 8) as usize;
    let width = width as usize;
    let mut cols = vec![0u8; bytes_per_scanline * height as usize];

    for (k, scanline) in scanlines
        .chunks_exact(bytes_per_scanline)
        .take(height as usize)
        .enumerate()
    {
        let block_offset = k * bytes_per_scanline;
        let block_group = block_offset / BLOCK_GROUP_BYTES;
        let plane = (block_offset % BLOCK_GROUP_BYTES) / PLANE_STRIDE_BYTES;
        let mask = 1u8 << (plane & 7);

        for (j, &byte) in scanline.iter().enumerate() {
            let column_base = block_group * width + j * 8;
            for b in 0..8 {
                if byte & (0x80 >> b) == 0 {
                    continue;
                }
                if let Some(col) = cols.get_mut(column_base + b) {
                    *col = col.wrapping_add(mask);
                }
            }
        }
    }
    cols
}

// =============================================================================
// Wire Frame
// =============================================================================

/// One encoded frame of column bytes, ready for transmission.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct WireFrame {
    cols: Vec<u8>,
}

impl WireFrame {
    /// Encode a framebuffer snapshot.
    pub fn encode(fb: &Framebuffer) -> Result<Self> {
        Self::from_packed(fb.pack(), fb.width(), fb.height())
    }

    /// Encode already packed scanline data for a `width` x `height` panel.
    pub fn from_packed(
        packed: Vec<u8>,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let bytes_per_scanline = (width / 8) as usize;
        let packed = fit_frame(packed, bytes_per_scanline * height as usize, bytes_per_scanline)?;
        let scanlines = reverse_scanlines(&packed, bytes_per_scanline);
        Ok(Self {
            cols: transpose_columns(&scanlines, width, height),
        })
    }

    #[inline]
    pub fn columns(&self) -> &[u8] { &self.cols }

    #[inline]
    pub fn len(&self) -> usize { self.cols.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.cols.is_empty() }

    /// Payload windows in transmission order: one parity, then the other.
    pub fn windows(
        &self,
        order: BankOrder,
    ) -> impl Iterator<Item = &[u8]> + '_ {
        let first = order.first_parity();
        let pass = move |parity: usize| {
            self.cols
                .chunks(WINDOW_SIZE)
                .enumerate()
                .filter(move |(i, _)| i % 2 == parity)
                .map(|(_, w)| w)
        };
        pass(first).chain(pass(1 - first))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BYTES_PER_SCANLINE, FRAME_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH};

    fn single_pixel_frame(
        x: u32,
        y: u32,
    ) -> WireFrame {
        let mut fb = Framebuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        fb.set(x, y, true);
        WireFrame::encode(&fb).unwrap()
    }

    /// Assert exactly one non-zero column byte.
    fn assert_only(
        frame: &WireFrame,
        index: usize,
        value: u8,
    ) {
        for (i, &c) in frame.columns().iter().enumerate() {
            let want = if i == index { value } else { 0 };
            assert_eq!(c, want, "column {i}");
        }
    }

    #[test]
    fn test_command_bytes() {
        let init: Vec<u8> = Command::INIT_SEQUENCE
            .iter()
            .flat_map(|c| c.bytes().iter().copied())
            .collect();
        assert_eq!(init, [0x1B, 0x40, 0x0B, 0x0C]);
        assert_eq!(Command::StartGraphics.bytes(), &[0x1B, 0x47]);
    }

    #[test]
    fn test_blank_frame_encodes_to_zeros() {
        let fb = Framebuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        let frame = WireFrame::encode(&fb).unwrap();
        assert_eq!(frame.len(), FRAME_SIZE);
        assert!(frame.columns().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_top_left_pixel() {
        assert_only(&single_pixel_frame(0, 0), 0, 1);
    }

    #[test]
    fn test_pixel_in_second_block_group() {
        // y = 10: group 1, plane 2; x = 9: column 9 of that group
        assert_only(&single_pixel_frame(9, 10), 128 + 9, 4);
    }

    #[test]
    fn test_bottom_right_pixel() {
        assert_only(&single_pixel_frame(127, 63), 1023, 128);
    }

    #[test]
    fn test_column_of_eight_fills_one_byte() {
        let mut fb = Framebuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        for y in 16..24 {
            fb.set(40, y, true);
        }
        let frame = WireFrame::encode(&fb).unwrap();
        assert_only(&frame, 2 * 128 + 40, 0xFF);
    }

    #[test]
    fn test_transpose_accumulates() {
        // On a 16-pixel-wide panel scanlines 0 and 1 both map to plane 0 of
        // group 0, so the same column bit is added twice.
        let mut scanlines = vec![0u8; 2 * 128];
        scanlines[0] = 0x80;
        scanlines[2] = 0x80;
        let cols = transpose_columns(&scanlines, 16, 128);
        assert_eq!(cols[0], 2);
        assert!(cols[1..].iter().all(|&c| c == 0));
    }

    #[test]
    fn test_reverse_scanlines() {
        let packed = [1, 2, 3, 4, 5, 6];
        assert_eq!(reverse_scanlines(&packed, 2), [5, 6, 3, 4, 1, 2]);
    }

    #[test]
    fn test_fit_frame_truncates() {
        let fitted = fit_frame(vec![7; FRAME_SIZE + 5], FRAME_SIZE, BYTES_PER_SCANLINE).unwrap();
        assert_eq!(fitted.len(), FRAME_SIZE);
    }

    #[test]
    fn test_fit_frame_pads_whole_scanlines() {
        let short = vec![0xFF; FRAME_SIZE - 2 * BYTES_PER_SCANLINE];
        let fitted = fit_frame(short, FRAME_SIZE, BYTES_PER_SCANLINE).unwrap();
        assert_eq!(fitted.len(), FRAME_SIZE);
        assert!(fitted[FRAME_SIZE - 2 * BYTES_PER_SCANLINE..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_fit_frame_rejects_partial_scanline() {
        let err = fit_frame(vec![0; FRAME_SIZE - 3], FRAME_SIZE, BYTES_PER_SCANLINE).unwrap_err();
        assert!(matches!(
            err,
            Error::FrameSize { actual, expected } if actual == FRAME_SIZE - 3 && expected == FRAME_SIZE
        ));
    }

    #[test]
    fn test_window_order_even_first() {
        let packed: Vec<u8> = vec![0; FRAME_SIZE];
        let mut frame = WireFrame::from_packed(packed, SCREEN_WIDTH, SCREEN_HEIGHT).unwrap();
        // Tag each window with its index so the order is visible
        for (i, w) in frame.cols.chunks_mut(WINDOW_SIZE).enumerate() {
            w.fill(i as u8);
        }

        let order: Vec<u8> = frame.windows(BankOrder::EvenFirst).map(|w| w[0]).collect();
        assert_eq!(order, [0, 2, 4, 6, 8, 10, 12, 14, 1, 3, 5, 7, 9, 11, 13, 15]);

        let order: Vec<u8> = frame.windows(BankOrder::OddFirst).map(|w| w[0]).collect();
        assert_eq!(order, [1, 3, 5, 7, 9, 11, 13, 15, 0, 2, 4, 6, 8, 10, 12, 14]);
    }

    #[test]
    fn test_windows_cover_every_byte_once() {
        let mut fb = Framebuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        fb.set(3, 3, true);
        let frame = WireFrame::encode(&fb).unwrap();
        let total: usize = frame.windows(BankOrder::default()).map(<[u8]>::len).sum();
        assert_eq!(total, FRAME_SIZE);
    }
}
