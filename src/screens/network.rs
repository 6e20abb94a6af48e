//! Network interfaces, one per page.
//!
//! ```text
//! [plug] eth0 (1/2)
//! [net ] IP: 192.168.1.20        or  [err] Up, no IP
//! [ up ] RX: 12 KB/s
//! [down] TX: 3 KB/s
//! ```
//!
//! Up / Down step through the interfaces with wraparound.

use core::fmt::Write;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use heapless::String;

use super::ScreenContext;
use crate::state::Key;
use crate::styles::{TEXT_CHAR_WIDTH, TEXT_STYLE};
use crate::widgets::{draw_icon, icons, truncate};

const TEXT_X: i32 = 10;
const ROW_BASELINES: [i32; 4] = [12, 28, 44, 60];
const ICON_RISE: i32 = 8;

/// Baseline of the empty-list message.
const EMPTY_Y: i32 = 16;

/// Characters left for the interface name beside " (nn/nn)".
const NAME_CHARS: usize = ((128 - TEXT_X as u32) / TEXT_CHAR_WIDTH) as usize - 8;

pub(super) fn draw<D>(
    display: &mut D,
    ctx: &ScreenContext<'_>,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    let ifaces = ctx.telemetry.network_interfaces();
    if ifaces.is_empty() {
        Text::new("No interfaces", Point::new(0, EMPTY_Y), TEXT_STYLE)
            .draw(display)
            .ok();
        return;
    }

    let mut index = ctx.nav.net_iface_index();
    if index >= ifaces.len() {
        index = 0;
    }
    let iface = &ifaces[index];

    let mut title: String<32> = String::new();
    let _ = write!(title, "{} ({}/{})", truncate(&iface.name, NAME_CHARS), index + 1, ifaces.len());

    let mut addr: String<32> = String::new();
    let addr_icon = if iface.ip.is_empty() {
        let _ = write!(addr, "{}, no IP", if iface.up { "Up" } else { "Down" });
        &icons::NET_ERROR
    } else {
        let _ = write!(addr, "IP: {}", iface.ip);
        &icons::NET
    };

    let mut rx: String<24> = String::new();
    let _ = write!(rx, "RX: {} KB/s", iface.rx_bytes_per_sec / 1024);

    let mut tx: String<24> = String::new();
    let _ = write!(tx, "TX: {} KB/s", iface.tx_bytes_per_sec / 1024);

    let rows: [(&icons::Icon, &str); 4] = [
        (&icons::PLUG, title.as_str()),
        (addr_icon, addr.as_str()),
        (&icons::ARROW_UP, rx.as_str()),
        (&icons::ARROW_DOWN, tx.as_str()),
    ];
    for ((icon, text), baseline) in rows.into_iter().zip(ROW_BASELINES) {
        draw_icon(display, 0, baseline - ICON_RISE, icon);
        Text::new(text, Point::new(TEXT_X, baseline), TEXT_STYLE)
            .draw(display)
            .ok();
    }
}

pub(super) fn handle_key(
    key: Key,
    ctx: &ScreenContext<'_>,
) -> bool {
    if !matches!(key, Key::Up | Key::Down) {
        return false;
    }
    let count = ctx.telemetry.interface_count();
    if count == 0 {
        return false;
    }

    let current = ctx.nav.net_iface_index().min(count - 1);
    let next = match key {
        Key::Up => (current + count - 1) % count,
        _ => (current + 1) % count,
    };
    ctx.nav.set_net_iface_index(next);
    next != current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::Framebuffer;
    use crate::state::NavigationState;
    use crate::telemetry::{CountOnlyTelemetry, NetworkInterface, StaticTelemetry};

    fn press(
        nav: &NavigationState,
        telemetry: &StaticTelemetry,
        key: Key,
    ) -> bool {
        handle_key(key, &ScreenContext { nav, telemetry })
    }

    #[test]
    fn test_down_wraps() {
        let nav = NavigationState::new();
        let telemetry = StaticTelemetry::with_interfaces(3);
        assert!(press(&nav, &telemetry, Key::Down));
        assert!(press(&nav, &telemetry, Key::Down));
        assert_eq!(nav.net_iface_index(), 2);
        assert!(press(&nav, &telemetry, Key::Down));
        assert_eq!(nav.net_iface_index(), 0);
    }

    #[test]
    fn test_up_wraps() {
        let nav = NavigationState::new();
        let telemetry = StaticTelemetry::with_interfaces(3);
        assert!(press(&nav, &telemetry, Key::Up));
        assert_eq!(nav.net_iface_index(), 2);
    }

    #[test]
    fn test_no_interfaces_is_noop() {
        let nav = NavigationState::new();
        let telemetry = StaticTelemetry::default();
        assert!(!press(&nav, &telemetry, Key::Down));
        assert!(!press(&nav, &telemetry, Key::Up));
        assert_eq!(nav.net_iface_index(), 0);
    }

    #[test]
    fn test_single_interface_unchanged() {
        let nav = NavigationState::new();
        let telemetry = StaticTelemetry::with_interfaces(1);
        assert!(!press(&nav, &telemetry, Key::Down));
    }

    #[test]
    fn test_keys_use_interface_count() {
        let nav = NavigationState::new();
        let telemetry = CountOnlyTelemetry { interfaces: 2, ..CountOnlyTelemetry::default() };
        let ctx = ScreenContext { nav: &nav, telemetry: &telemetry };
        assert!(handle_key(Key::Down, &ctx));
        assert!(handle_key(Key::Down, &ctx));
        assert_eq!(nav.net_iface_index(), 0);
    }

    #[test]
    fn test_stale_index_draws_first() {
        let nav = NavigationState::new();
        nav.set_net_iface_index(7);
        let telemetry = StaticTelemetry {
            interfaces: vec![NetworkInterface {
                name: "eth0".into(),
                ip: "10.0.0.2".into(),
                up: true,
                rx_bytes_per_sec: 4096,
                tx_bytes_per_sec: 0,
            }],
            ..StaticTelemetry::default()
        };
        let mut fb = Framebuffer::new(128, 64);
        draw(&mut fb, &ScreenContext { nav: &nav, telemetry: &telemetry });
        // Plug icon of row 0 and text of all four rows
        assert!((4..12).any(|y| (0..8).any(|x| fb.is_dark(x, y))));
        assert!((52..60).any(|y| (10..128).any(|x| fb.is_dark(x, y))));
    }
}
