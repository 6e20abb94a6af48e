//! 8x8 monochrome icons.
//!
//! One byte per row, top row first, bit 7 = leftmost pixel. Drawing emits only
//! the set bits, so an icon never erases what is under it.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

pub type Icon = [u8; 8];

pub const CPU: Icon = [
    0b0011_1100,
    0b0100_0010,
    0b1010_0101,
    0b1011_1101,
    0b1011_1101,
    0b1010_0101,
    0b0100_0010,
    0b0011_1100,
];

pub const RAM: Icon = [
    0b1111_1111,
    0b1001_1001,
    0b1011_1101,
    0b1011_1101,
    0b1011_1101,
    0b1011_1101,
    0b1001_1001,
    0b1111_1111,
];

pub const DISK: Icon = [
    0b0011_1100,
    0b0100_0010,
    0b1001_1001,
    0b1011_1101,
    0b1011_1101,
    0b1001_1001,
    0b0100_0010,
    0b0011_1100,
];

pub const CLOCK: Icon = [
    0b0011_1100,
    0b0100_0010,
    0b1001_1001,
    0b1010_0101,
    0b1010_0001,
    0b1001_1001,
    0b0100_0010,
    0b0011_1100,
];

/// Ethernet plug.
pub const PLUG: Icon = [
    0b0010_0100,
    0b0010_0100,
    0b0111_1110,
    0b0111_1110,
    0b0011_1100,
    0b0001_1000,
    0b0001_1000,
    0b0001_1000,
];

/// Connected network (globe).
pub const NET: Icon = [
    0b0011_1100,
    0b0101_1010,
    0b1001_1001,
    0b1111_1111,
    0b1001_1001,
    0b0101_1010,
    0b0011_1100,
    0b0000_0000,
];

/// Network without an address.
pub const NET_ERROR: Icon = [
    0b1000_0001,
    0b0100_0010,
    0b0010_0100,
    0b0001_1000,
    0b0001_1000,
    0b0010_0100,
    0b0100_0010,
    0b1000_0001,
];

pub const ARROW_UP: Icon = [
    0b0001_1000,
    0b0011_1100,
    0b0111_1110,
    0b1101_1011,
    0b0001_1000,
    0b0001_1000,
    0b0001_1000,
    0b0001_1000,
];

pub const ARROW_DOWN: Icon = [
    0b0001_1000,
    0b0001_1000,
    0b0001_1000,
    0b0001_1000,
    0b1101_1011,
    0b0111_1110,
    0b0011_1100,
    0b0001_1000,
];

/// Set pixels of `icon` with its top-left corner at `origin`.
pub fn icon_pixels(
    icon: &Icon,
    origin: Point,
) -> impl Iterator<Item = Pixel<BinaryColor>> + '_ {
    icon.iter().enumerate().flat_map(move |(row, &bits)| {
        (0..8i32)
            .filter(move |&col| bits & (0x80u8 >> col) != 0)
            .map(move |col| Pixel(origin + Point::new(col, row as i32), BinaryColor::On))
    })
}

/// Draw an icon with its top-left corner at (`x`, `y`).
pub fn draw_icon<D>(
    display: &mut D,
    x: i32,
    y: i32,
    icon: &Icon,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    display.draw_iter(icon_pixels(icon, Point::new(x, y))).ok();
}
