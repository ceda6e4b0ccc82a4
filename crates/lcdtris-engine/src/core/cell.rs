use serde::{Deserialize, Serialize};

/// A 16-bit panel colour.
///
/// Channels are 5 bits wide and packed as `b << 11 | g << 6 | r`, the order the
/// LCD controller is initialised with. Bit 5 (the green LSB) is always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb565(u16);

impl Rgb565 {
    pub const BLACK: Self = Self::from_rgb5(0, 0, 0);
    pub const WHITE: Self = Self::from_rgb5(31, 31, 31);
    pub const RED: Self = Self::from_rgb5(31, 0, 0);
    pub const YELLOW: Self = Self::from_rgb5(31, 31, 0);
    pub const MENU_GREEN: Self = Self::from_rgb5(10, 31, 10);
    pub const LIME: Self = Self::from_rgb5(15, 31, 0);

    /// Packs three 5-bit channels; higher bits of each channel are dropped.
    #[must_use]
    pub const fn from_rgb5(r: u8, g: u8, b: u8) -> Self {
        let r = (r & 0x1f) as u16;
        let g = (g & 0x1f) as u16;
        let b = (b & 0x1f) as u16;
        Self((b << 11) | (g << 6) | r)
    }

    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Returns the `(r, g, b)` channels, each in `0..=31`.
    #[must_use]
    pub const fn channels(self) -> (u8, u8, u8) {
        let r = (self.0 & 0x1f) as u8;
        let g = ((self.0 >> 6) & 0x1f) as u8;
        let b = ((self.0 >> 11) & 0x1f) as u8;
        (r, g, b)
    }

    /// Expands the channels to 8 bits for host-side rendering.
    #[must_use]
    pub const fn to_rgb8(self) -> (u8, u8, u8) {
        const fn expand(c: u8) -> u8 {
            (c << 3) | (c >> 2)
        }
        let (r, g, b) = self.channels();
        (expand(r), expand(g), expand(b))
    }
}

/// Tetromino family. Every orientation of a family shares a colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Family {
    Square = 0,
    Bar = 1,
    Z = 2,
    S = 3,
    L = 4,
    T = 5,
    J = 6,
}

impl Family {
    pub const LEN: usize = 7;
    pub const ALL: [Self; Self::LEN] = [
        Self::Square,
        Self::Bar,
        Self::Z,
        Self::S,
        Self::L,
        Self::T,
        Self::J,
    ];

    /// Cell code stored in the grid once a piece of this family locks (`3..=9`).
    #[must_use]
    pub const fn locked_code(self) -> u8 {
        self as u8 + 3
    }

    #[must_use]
    pub const fn from_locked_code(code: u8) -> Option<Self> {
        match code {
            3..=9 => Some(Self::ALL[(code - 3) as usize]),
            _ => None,
        }
    }

    #[must_use]
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Square => Rgb565::from_rgb5(31, 31, 0),
            Self::Bar => Rgb565::from_rgb5(0, 31, 31),
            Self::Z => Rgb565::from_rgb5(31, 0, 0),
            Self::S => Rgb565::from_rgb5(0, 31, 0),
            Self::L => Rgb565::from_rgb5(0, 0, 31),
            Self::T => Rgb565::from_rgb5(15, 0, 31),
            Self::J => Rgb565::from_rgb5(31, 15, 31),
        }
    }
}

/// A single cell of the LCD grid.
///
/// `Falling` carries the family of the active piece so a renderer can colour
/// it without looking up the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Falling(Family),
    Wall,
    Locked(Family),
}

impl Cell {
    /// Numeric cell code: 0 empty, 1 falling, 2 wall, 3..=9 locked.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Falling(_) => 1,
            Self::Wall => 2,
            Self::Locked(family) => family.locked_code(),
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Walls and locked blocks stop pieces; the falling piece never does.
    #[must_use]
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Wall | Self::Locked(_))
    }

    #[must_use]
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Empty => Rgb565::BLACK,
            Self::Wall => Rgb565::WHITE,
            Self::Falling(family) | Self::Locked(family) => family.color(),
        }
    }
}
