//! Pre-computed static styles.
//!
//! `MonoTextStyle::new` and `PrimitiveStyle::with_fill` are const fn in
//! embedded-graphics 0.8, so every style a screen needs is built at compile
//! time and shared by reference instead of being constructed per frame.
//!
//! On this panel `BinaryColor::On` is ink (dark) and `Off` is paper.

use embedded_graphics::{
    mono_font::{
        MonoTextStyle,
        ascii::{FONT_6X10, FONT_7X13},
    },
    pixelcolor::BinaryColor,
    primitives::PrimitiveStyle,
    text::{Alignment, TextStyle, TextStyleBuilder},
};
use profont::PROFONT_14_POINT;

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Centered text. Used for the About screen.
pub const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).build();

// =============================================================================
// Text Styles
// =============================================================================

/// Body text on every screen (7x13).
pub const TEXT_STYLE: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(&FONT_7X13, BinaryColor::On);

/// Compact text for the service action prompt (6x10).
pub const SMALL_STYLE: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);

/// About screen title (`ProFont` 14pt).
pub const TITLE_STYLE: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(&PROFONT_14_POINT, BinaryColor::On);

// =============================================================================
// Primitive Styles
// =============================================================================

pub const INK_FILL: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_fill(BinaryColor::On);

pub const PAPER_FILL: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_fill(BinaryColor::Off);

pub const INK_STROKE: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_stroke(BinaryColor::On, 1);

// =============================================================================
// Layout
// =============================================================================

/// Glyph advance of the body font, for truncation math.
pub const TEXT_CHAR_WIDTH: u32 = 7;

/// Glyph advance of the small font.
pub const SMALL_CHAR_WIDTH: u32 = 6;
