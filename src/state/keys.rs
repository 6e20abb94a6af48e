//! Keypad key codes.

/// One key of the 7-key pad. Each press arrives as a single byte.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Key {
    Help = 0x41,
    Left = 0x42,
    Esc = 0x43,
    Up = 0x44,
    Enter = 0x45,
    Down = 0x46,
    Right = 0x47,
}

impl Key {
    /// Decode a keypad byte. Unknown bytes yield `None`.
    #[inline]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0x41 => Some(Self::Help),
            0x42 => Some(Self::Left),
            0x43 => Some(Self::Esc),
            0x44 => Some(Self::Up),
            0x45 => Some(Self::Enter),
            0x46 => Some(Self::Down),
            0x47 => Some(Self::Right),
            _ => None,
        }
    }

    #[inline]
    pub const fn code(self) -> u8 { self as u8 }
}

impl TryFrom<u8> for Key {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> { Self::from_code(code).ok_or(code) }
}
