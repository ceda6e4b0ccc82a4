use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    InvalidShapeCode,
    core::{BLOCK_SIZE, Cell, Family},
};

#[derive(Debug, Clone, Copy)]
struct ShapeDef {
    family: Family,
    /// Block positions `(bx, by)`, with `by` counted upwards from the anchor row.
    blocks: [(u8, u8); 4],
    successor: u8,
}

const fn def(family: Family, blocks: [(u8, u8); 4], successor: u8) -> ShapeDef {
    ShapeDef {
        family,
        blocks,
        successor,
    }
}

const SHAPES: [ShapeDef; ShapeCode::LEN] = {
    use Family::{Bar, J, L, S, Square, T, Z};
    [
        def(Square, [(0, 0), (1, 0), (0, 1), (1, 1)], 0),
        def(Bar, [(0, 0), (0, 1), (0, 2), (0, 3)], 2),
        def(Bar, [(0, 0), (1, 0), (2, 0), (3, 0)], 1),
        def(Z, [(1, 0), (2, 0), (0, 1), (1, 1)], 4),
        def(Z, [(0, 0), (0, 1), (1, 1), (1, 2)], 3),
        def(S, [(0, 0), (1, 0), (1, 1), (2, 1)], 6),
        def(S, [(1, 0), (0, 1), (1, 1), (0, 2)], 5),
        def(L, [(0, 0), (1, 0), (0, 1), (0, 2)], 8),
        def(L, [(0, 0), (1, 0), (2, 0), (2, 1)], 9),
        def(L, [(1, 0), (1, 1), (0, 2), (1, 2)], 10),
        def(L, [(0, 0), (0, 1), (1, 1), (2, 1)], 7),
        def(T, [(0, 0), (1, 0), (2, 0), (1, 1)], 12),
        def(T, [(1, 0), (0, 1), (1, 1), (1, 2)], 13),
        def(T, [(1, 0), (0, 1), (1, 1), (2, 1)], 14),
        def(T, [(0, 0), (0, 1), (1, 1), (0, 2)], 11),
        def(J, [(0, 0), (1, 0), (1, 1), (1, 2)], 16),
        def(J, [(2, 0), (0, 1), (1, 1), (2, 1)], 17),
        def(J, [(0, 0), (0, 1), (0, 2), (1, 2)], 18),
        def(J, [(0, 0), (1, 0), (2, 0), (0, 1)], 15),
    ]
};

const fn bounding_blocks(blocks: &[(u8, u8); 4]) -> (u8, u8) {
    let mut w = 0;
    let mut h = 0;
    let mut i = 0;
    while i < blocks.len() {
        let (bx, by) = blocks[i];
        if bx + 1 > w {
            w = bx + 1;
        }
        if by + 1 > h {
            h = by + 1;
        }
        i += 1;
    }
    (w, h)
}

/// One of the 19 orientation variants (codes `0..=18`).
///
/// Each variant is four 6×6 blocks. Its anchor is the bottom-left cell of
/// the bounding box, so a cell at offset `(dx, dy)` lands on the grid at
/// `(x0 + dx, y0 - dy)`.
///
/// # Example
///
/// ```
/// use lcdtris_engine::{Family, ShapeCode};
///
/// let bar = ShapeCode::new(1)?;
/// assert_eq!(bar.family(), Family::Bar);
/// assert_eq!(bar.bounding_box(), (6, 24));
/// assert_eq!(bar.rotated().code(), 2);
/// # Ok::<(), lcdtris_engine::InvalidShapeCode>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ShapeCode(u8);

impl fmt::Debug for ShapeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShapeCode({}:{:?})", self.0, self.family())
    }
}

impl fmt::Display for ShapeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<u8> for ShapeCode {
    type Error = InvalidShapeCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::new(code)
    }
}

impl From<ShapeCode> for u8 {
    fn from(shape: ShapeCode) -> Self {
        shape.0
    }
}

impl ShapeCode {
    pub const LEN: usize = 19;
    pub const SQUARE: Self = Self(0);

    pub const fn new(code: u8) -> Result<Self, InvalidShapeCode> {
        if (code as usize) < Self::LEN {
            Ok(Self(code))
        } else {
            Err(InvalidShapeCode { code })
        }
    }

    #[must_use]
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Iterates all orientation variants in code order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::LEN as u8).map(Self)
    }

    const fn def(self) -> &'static ShapeDef {
        &SHAPES[self.0 as usize]
    }

    #[must_use]
    pub const fn family(self) -> Family {
        self.def().family
    }

    /// Cell value written when this shape locks.
    #[must_use]
    pub const fn locked_color(self) -> Cell {
        Cell::Locked(self.family())
    }

    /// Cell value written while this shape is falling.
    #[must_use]
    pub const fn falling_cell(self) -> Cell {
        Cell::Falling(self.family())
    }

    /// Bounding box `(width, height)` in grid cells.
    #[must_use]
    pub const fn bounding_box(self) -> (i16, i16) {
        let (w, h) = bounding_blocks(&self.def().blocks);
        (w as i16 * BLOCK_SIZE, h as i16 * BLOCK_SIZE)
    }

    /// Block offsets `(bx, by)` in block units, `by` pointing up.
    #[must_use]
    pub const fn blocks(self) -> &'static [(u8, u8); 4] {
        &self.def().blocks
    }

    /// Returns whether the cell at `(dx, dy)` belongs to the shape.
    #[must_use]
    pub fn contains(self, dx: i16, dy: i16) -> bool {
        if dx < 0 || dy < 0 {
            return false;
        }
        let (bx, by) = (dx / BLOCK_SIZE, dy / BLOCK_SIZE);
        self.blocks()
            .iter()
            .any(|&(x, y)| i16::from(x) == bx && i16::from(y) == by)
    }

    /// Iterates every occupied cell offset `(dx, dy)`, `dy` pointing up.
    pub fn cells(self) -> impl Iterator<Item = (i16, i16)> {
        self.blocks().iter().flat_map(|&(bx, by)| {
            let (x0, y0) = (i16::from(bx) * BLOCK_SIZE, i16::from(by) * BLOCK_SIZE);
            (0..BLOCK_SIZE).flat_map(move |j| (0..BLOCK_SIZE).map(move |i| (x0 + i, y0 + j)))
        })
    }

    /// Grid positions covered when anchored at `(x0, y0)`.
    pub fn positions(self, x0: i16, y0: i16) -> impl Iterator<Item = (i16, i16)> {
        self.cells().map(move |(dx, dy)| (x0 + dx, y0 - dy))
    }

    /// Next orientation in the family's clockwise cycle. The square maps to itself.
    #[must_use]
    pub const fn rotated(self) -> Self {
        Self(self.def().successor)
    }
}
