//! Low-level drawing primitives shared across screens.
//!
//! # Scrollbar
//!
//! The list scrollbar is a 2px wide thumb with no track. Its height is the
//! visible share of the list (minimum 3px) and its top moves linearly with the
//! view offset, so the first and last offsets pin it to the ends of the area.

use std::borrow::Cow;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::styles::INK_FILL;

/// Scrollbar thumb width in pixels.
pub const SCROLLBAR_WIDTH: u32 = 2;

/// Smallest thumb that is still visible.
const MIN_THUMB_HEIGHT: u32 = 3;

/// Thumb geometry within a list area of `area_height` pixels.
///
/// Returns `(top, height)` relative to the area, or `None` when the whole list
/// fits and no scrollbar is needed.
pub fn scrollbar_thumb(
    len: usize,
    window: usize,
    offset: usize,
    area_height: u32,
) -> Option<(u32, u32)> {
    if len <= window || area_height == 0 {
        return None;
    }
    let height = ((window as u64 * area_height as u64) / len as u64) as u32;
    let height = height.clamp(MIN_THUMB_HEIGHT.min(area_height), area_height);

    let range = (area_height - height) as usize;
    let positions = len - window;
    let top = offset.min(positions) * range / positions;
    Some((top as u32, height))
}

/// Draw a vertical scrollbar at column `x` over `top .. top + area_height`.
pub fn draw_scrollbar<D>(
    display: &mut D,
    x: i32,
    top: i32,
    area_height: u32,
    len: usize,
    window: usize,
    offset: usize,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    let Some((thumb_top, thumb_height)) = scrollbar_thumb(len, window, offset, area_height) else {
        return;
    };
    Rectangle::new(
        Point::new(x, top + thumb_top as i32),
        Size::new(SCROLLBAR_WIDTH, thumb_height),
    )
    .into_styled(INK_FILL)
    .draw(display)
    .ok();
}

/// Shorten `text` to at most `max_chars`, marking the cut with `..`.
pub fn truncate(
    text: &str,
    max_chars: usize,
) -> Cow<'_, str> {
    if text.chars().count() <= max_chars {
        return Cow::Borrowed(text);
    }
    if max_chars < 3 {
        return Cow::Owned(text.chars().take(max_chars).collect());
    }
    let mut short: String = text.chars().take(max_chars - 2).collect();
    short.push_str("..");
    Cow::Owned(short)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::Framebuffer;

    #[test]
    fn test_no_scrollbar_when_list_fits() {
        assert_eq!(scrollbar_thumb(3, 3, 0, 48), None);
        assert_eq!(scrollbar_thumb(0, 3, 0, 48), None);
    }

    #[test]
    fn test_thumb_follows_offset() {
        // 10 items, window 3, 48px: thumb 14px, 34px travel over 7 positions
        assert_eq!(scrollbar_thumb(10, 3, 0, 48), Some((0, 14)));
        assert_eq!(scrollbar_thumb(10, 3, 7, 48), Some((34, 14)));
        assert_eq!(scrollbar_thumb(10, 3, 99, 48), Some((34, 14)), "offset clamped");
    }

    #[test]
    fn test_thumb_minimum_height() {
        assert_eq!(scrollbar_thumb(1000, 3, 0, 48), Some((0, 3)));
    }

    #[test]
    fn test_draw_scrollbar() {
        let mut fb = Framebuffer::new(128, 64);
        draw_scrollbar(&mut fb, 125, 12, 48, 10, 3, 7);
        assert!(fb.is_dark(125, 12 + 34));
        assert!(fb.is_dark(126, 12 + 47));
        assert!(!fb.is_dark(125, 12 + 33));
        assert_eq!(fb.dark_count(), 2 * 14);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("sshd", 10), "sshd");
        assert_eq!(truncate("systemd-journald", 10), "systemd-..");
        assert_eq!(truncate("systemd-journald", 10).chars().count(), 10);
        assert_eq!(truncate("abcdef", 2), "ab");
    }
}
