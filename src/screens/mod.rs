//! Screen registry.
//!
//! The panel has a fixed, closed set of screens, indexed in registry order:
//!
//! | Index | Screen | Cyclable | Local keys |
//! |-------|--------|----------|------------|
//! | 0 | [`Screen::SystemInfo`] | yes | none |
//! | 1 | [`Screen::NetworkInfo`] | yes | Up / Down pick interface |
//! | 2 | [`Screen::About`] | no (Help only) | none |
//! | 3 | [`Screen::Menu`] | yes | Up / Down / Enter |
//! | 4 | [`Screen::ServiceManager`] | yes | Up / Down / Enter |
//!
//! Screens hold no state of their own. Cursors and modal flags live in
//! [`NavigationState`]; telemetry comes from the [`Telemetry`] provider. Both
//! reach a screen through [`ScreenContext`].

mod about;
mod menu;
mod network;
mod services;
mod system_info;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

pub use services::{handle_action_key, scroll_offset};

use crate::state::{Key, NavigationState};
use crate::telemetry::Telemetry;

/// What a screen may read and mutate while drawing or handling a key.
#[derive(Clone, Copy)]
pub struct ScreenContext<'a> {
    pub nav: &'a NavigationState,
    pub telemetry: &'a dyn Telemetry,
}

/// Available screens, in registry order.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Screen {
    /// CPU, memory, disk and uptime.
    #[default]
    SystemInfo,
    /// One network interface at a time.
    NetworkInfo,
    /// Product name and version. Reached with Help, left with Esc.
    About,
    /// Power menu with shutdown / reboot confirmation.
    Menu,
    /// Running services with stop / restart.
    ServiceManager,
}

impl Screen {
    /// Registry order.
    pub const ALL: [Self; 5] = [
        Self::SystemInfo,
        Self::NetworkInfo,
        Self::About,
        Self::Menu,
        Self::ServiceManager,
    ];

    pub const COUNT: usize = Self::ALL.len();

    #[inline]
    pub const fn index(self) -> usize { self as usize }

    /// Screen at `index`, or `None` when out of range.
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT { Some(Self::ALL[index]) } else { None }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::SystemInfo => "system",
            Self::NetworkInfo => "network",
            Self::About => "about",
            Self::Menu => "menu",
            Self::ServiceManager => "services",
        }
    }

    /// Whether Left / Right may land on this screen.
    #[inline]
    pub const fn is_cyclable(self) -> bool { !matches!(self, Self::About) }

    /// Next cyclable screen, wrapping.
    pub const fn next(self) -> Self { self.step(1) }

    /// Previous cyclable screen, wrapping.
    pub const fn prev(self) -> Self { self.step(Self::COUNT - 1) }

    const fn step(
        self,
        by: usize,
    ) -> Self {
        let mut index = (self.index() + by) % Self::COUNT;
        if !Self::ALL[index].is_cyclable() {
            index = (index + by) % Self::COUNT;
        }
        Self::ALL[index]
    }

    /// Render this screen. The caller clears the target first.
    pub fn draw<D>(
        self,
        display: &mut D,
        ctx: &ScreenContext<'_>,
    ) where
        D: DrawTarget<Color = BinaryColor>,
    {
        match self {
            Self::SystemInfo => system_info::draw(display, ctx),
            Self::NetworkInfo => network::draw(display, ctx),
            Self::About => about::draw(display),
            Self::Menu => menu::draw(display, ctx),
            Self::ServiceManager => services::draw(display, ctx),
        }
    }

    /// Screen-local key handling. Returns whether anything changed.
    pub fn handle_key(
        self,
        key: Key,
        ctx: &ScreenContext<'_>,
    ) -> bool {
        match self {
            Self::SystemInfo | Self::About => false,
            Self::NetworkInfo => network::handle_key(key, ctx),
            Self::Menu => menu::handle_key(key, ctx),
            Self::ServiceManager => services::handle_key(key, ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::Framebuffer;
    use crate::telemetry::StaticTelemetry;

    #[test]
    fn test_index_round_trip() {
        for screen in Screen::ALL {
            assert_eq!(Screen::from_index(screen.index()), Some(screen));
        }
        assert_eq!(Screen::from_index(Screen::COUNT), None);
    }

    #[test]
    fn test_next_skips_about() {
        assert_eq!(Screen::NetworkInfo.next(), Screen::Menu);
        assert_eq!(Screen::ServiceManager.next(), Screen::SystemInfo);
    }

    #[test]
    fn test_prev_skips_about() {
        assert_eq!(Screen::Menu.prev(), Screen::NetworkInfo);
        assert_eq!(Screen::SystemInfo.prev(), Screen::ServiceManager);
    }

    #[test]
    fn test_left_cycle_visits_cyclable_set() {
        let mut screen = Screen::SystemInfo;
        let mut visited = Vec::new();
        for _ in 0..Screen::COUNT - 1 {
            screen = screen.prev();
            visited.push(screen.index());
        }
        assert_eq!(visited, [4, 3, 1, 0]);
    }

    #[test]
    fn test_right_cycle_returns_home() {
        let mut screen = Screen::SystemInfo;
        for _ in 0..Screen::COUNT - 1 {
            screen = screen.next();
            assert!(screen.is_cyclable());
        }
        assert_eq!(screen, Screen::SystemInfo);
    }

    #[test]
    fn test_every_screen_draws_something() {
        let nav = NavigationState::new();
        let telemetry = StaticTelemetry::default();
        let ctx = ScreenContext {
            nav: &nav,
            telemetry: &telemetry,
        };
        for screen in Screen::ALL {
            let mut fb = Framebuffer::new(128, 64);
            screen.draw(&mut fb, &ctx);
            assert!(fb.dark_count() > 0, "{} drew nothing", screen.name());
        }
    }
}
