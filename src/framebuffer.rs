//! 1-bit framebuffer and scanline packing.
//!
//! The framebuffer is an `embedded-graphics` draw target, so screens render into
//! it with ordinary `Text`, `Rectangle` and `Line` primitives. `BinaryColor::On`
//! is a dark pixel, `BinaryColor::Off` is light (the cleared state).
//!
//! # Packed Layout
//!
//! [`Framebuffer::pack`] produces the device's scanline format:
//!
//! ```text
//! packed row 0        = framebuffer row H-1 (vertical flip)
//! byte (row, n)       = pixels x = 8n .. 8n+7 of that row
//! bit 7 of each byte  = leftmost pixel, 1 = dark
//! ```

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// Monochrome pixel grid with fixed dimensions.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    /// Row-major, `true` = dark.
    pixels: Vec<bool>,
}

impl Framebuffer {
    /// Create a cleared framebuffer.
    ///
    /// # Panics
    ///
    /// Panics if `width` is not a multiple of 8; packing works on whole bytes.
    pub fn new(
        width: u32,
        height: u32,
    ) -> Self {
        assert!(width % 8 == 0, "framebuffer width must be a multiple of 8");
        Self {
            width,
            height,
            pixels: vec![false; (width * height) as usize],
        }
    }

    #[inline]
    pub const fn width(&self) -> u32 { self.width }

    #[inline]
    pub const fn height(&self) -> u32 { self.height }

    /// Packed bytes per scanline.
    #[inline]
    pub const fn bytes_per_scanline(&self) -> usize { (self.width / 8) as usize }

    /// Set every pixel to light.
    pub fn clear(&mut self) { self.pixels.fill(false); }

    /// Whether the pixel at (x, y) is dark. Out-of-range reads are light.
    pub fn is_dark(
        &self,
        x: u32,
        y: u32,
    ) -> bool {
        self.index(x, y).is_some_and(|i| self.pixels[i])
    }

    /// Set a single pixel. Out-of-range writes are dropped.
    pub fn set(
        &mut self,
        x: u32,
        y: u32,
        dark: bool,
    ) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = dark;
        }
    }

    /// Number of dark pixels.
    pub fn dark_count(&self) -> usize { self.pixels.iter().filter(|&&p| p).count() }

    /// Pack into bottom-up scanline bytes, MSB = leftmost pixel.
    ///
    /// The result is always `width / 8 * height` bytes.
    pub fn pack(&self) -> Vec<u8> {
        let bytes_per_scanline = self.bytes_per_scanline();
        let mut packed = vec![0u8; bytes_per_scanline * self.height as usize];

        for (row, scanline) in packed.chunks_exact_mut(bytes_per_scanline).enumerate() {
            let y = self.height - 1 - row as u32;
            for (x_byte, byte) in scanline.iter_mut().enumerate() {
                for bit in 0..8u32 {
                    if self.is_dark(x_byte as u32 * 8 + bit, y) {
                        *byte |= 0x80 >> bit;
                    }
                }
            }
        }
        packed
    }

    /// Rebuild a framebuffer from [`pack`](Self::pack) output.
    ///
    /// Missing trailing bytes read as light pixels.
    pub fn unpack(
        width: u32,
        height: u32,
        packed: &[u8],
    ) -> Self {
        let mut fb = Self::new(width, height);
        let bytes_per_scanline = fb.bytes_per_scanline();

        for (row, scanline) in packed.chunks(bytes_per_scanline).take(height as usize).enumerate() {
            let y = height - 1 - row as u32;
            for (x_byte, &byte) in scanline.iter().enumerate() {
                for bit in 0..8u32 {
                    fb.set(x_byte as u32 * 8 + bit, y, byte & (0x80 >> bit) != 0);
                }
            }
        }
        fb
    }

    #[inline]
    fn index(
        &self,
        x: u32,
        y: u32,
    ) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size { Size::new(self.width, self.height) }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                self.set(point.x as u32, point.y as u32, color.is_on());
            }
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    use super::*;
    use crate::config::{FRAME_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH};

    /// Deterministic scatter of dark pixels.
    fn speckled(
        width: u32,
        height: u32,
    ) -> Framebuffer {
        let mut fb = Framebuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                fb.set(x, y, (x * 7 + y * 13) % 5 == 0 || x == y);
            }
        }
        fb
    }

    #[test]
    fn test_new_is_cleared() {
        let fb = Framebuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        assert_eq!(fb.dark_count(), 0);
        assert!(fb.pack().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_packed_size() {
        let fb = Framebuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        assert_eq!(fb.pack().len(), FRAME_SIZE);
    }

    #[test]
    fn test_pack_flips_vertically() {
        let mut fb = Framebuffer::new(16, 4);
        fb.set(0, 0, true); // top-left
        fb.set(15, 3, true); // bottom-right

        let packed = fb.pack();
        // Bottom row comes first, its last pixel is bit 0 of byte 1
        assert_eq!(packed[..2], [0x00, 0x01]);
        // Top row comes last, its first pixel is bit 7 of byte 0
        assert_eq!(packed[6..], [0x80, 0x00]);
    }

    #[test]
    fn test_pack_unpack_round_trip() {
        for (w, h) in [(8, 1), (16, 3), (24, 9), (SCREEN_WIDTH, SCREEN_HEIGHT)] {
            let fb = speckled(w, h);
            assert_eq!(Framebuffer::unpack(w, h, &fb.pack()), fb, "{w}x{h}");
        }
    }

    #[test]
    fn test_clear_resets_pixels() {
        let mut fb = speckled(SCREEN_WIDTH, SCREEN_HEIGHT);
        assert!(fb.dark_count() > 0);
        fb.clear();
        assert_eq!(fb.dark_count(), 0);
    }

    #[test]
    fn test_draw_foreground_wins() {
        let mut fb = Framebuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        Rectangle::new(Point::new(0, 0), Size::new(8, 8))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut fb)
            .ok();
        Rectangle::new(Point::new(4, 4), Size::new(8, 8))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
            .draw(&mut fb)
            .ok();

        assert!(fb.is_dark(0, 0));
        assert!(fb.is_dark(3, 7));
        assert!(!fb.is_dark(4, 4));
        assert!(!fb.is_dark(11, 11));
    }

    #[test]
    fn test_draw_clips_out_of_range() {
        let mut fb = Framebuffer::new(16, 16);
        fb.draw_iter([
            Pixel(Point::new(-1, 0), BinaryColor::On),
            Pixel(Point::new(0, 16), BinaryColor::On),
            Pixel(Point::new(15, 15), BinaryColor::On),
        ])
        .ok();
        assert_eq!(fb.dark_count(), 1);
    }
}
