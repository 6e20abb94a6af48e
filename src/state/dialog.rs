//! Modal dialog and service action values.
//!
//! All three enums live in `AtomicU8` fields of
//! [`NavigationState`](super::NavigationState), so each maps to and from a
//! byte. Code 0 is always the idle value and unknown codes decode to it.

/// Which power action the confirmation dialog asks about.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[repr(u8)]
pub enum DialogKind {
    #[default]
    None = 0,
    Shutdown = 1,
    Reboot = 2,
}

impl DialogKind {
    #[inline]
    pub const fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::Shutdown,
            2 => Self::Reboot,
            _ => Self::None,
        }
    }

    /// Dialog opened by the power menu entry at `index`.
    #[inline]
    pub const fn from_menu_index(index: usize) -> Self {
        match index {
            0 => Self::Shutdown,
            1 => Self::Reboot,
            _ => Self::None,
        }
    }

    /// Confirmation prompt shown in the dialog box.
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Shutdown => "Shutdown? (OK/ESC)",
            Self::Reboot => "Reboot? (OK/ESC)",
        }
    }
}

/// Outcome of a modal, left for the render scheduler to consume.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[repr(u8)]
pub enum DialogResult {
    #[default]
    None = 0,
    Confirmed = 1,
    Cancelled = 2,
}

impl DialogResult {
    #[inline]
    pub const fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::Confirmed,
            2 => Self::Cancelled,
            _ => Self::None,
        }
    }
}

/// Action armed on the selected service.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[repr(u8)]
pub enum ServiceAction {
    #[default]
    None = 0,
    Stop = 1,
    Restart = 2,
}

impl ServiceAction {
    #[inline]
    pub const fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::Stop,
            2 => Self::Restart,
            _ => Self::None,
        }
    }

    #[inline]
    pub const fn is_armed(self) -> bool { !matches!(self, Self::None) }

    /// `systemctl` verb.
    pub const fn verb(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Stop => "stop",
            Self::Restart => "restart",
        }
    }

    /// Label shown in the confirmation line.
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Stop => "Stop",
            Self::Restart => "Restart",
        }
    }
}
