//! Collision probes.
//!
//! Each shape carries a short list of probe offsets per direction. A probe is
//! `(dx, dy)` relative to the anchor with `dy` pointing down; the direction is
//! blocked when any probed cell is solid.

use crate::core::{BLOCK_SIZE, Board, ShapeCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Direction {
    Below,
    Left,
    Right,
}

impl Direction {
    const fn index(self) -> usize {
        match self {
            Self::Below => 0,
            Self::Left => 1,
            Self::Right => 2,
        }
    }
}

type Probes = &'static [(i16, i16)];

/// `[below, left, right]` probes per shape code.
const PROBES: [[Probes; 3]; ShapeCode::LEN] = [
    [
        &[(0, 1), (6, 1)],
        &[(-1, 0), (-1, -6)],
        &[(12, 0), (12, -6)],
    ],
    [
        &[(0, 1)],
        &[(-1, 0), (-1, -6), (-1, -12), (-1, -18)],
        &[(6, 0), (6, -6), (6, -12), (6, -18)],
    ],
    [
        &[(0, 1), (6, 1), (12, 1), (18, 1)],
        &[(-1, 0)],
        &[(24, 0)],
    ],
    [
        &[(0, -5), (6, 1), (12, 1)],
        &[(5, 0), (-1, -6)],
        &[(18, 0), (12, -6)],
    ],
    [
        &[(0, 1), (6, -5)],
        &[(-1, 0), (-1, -6), (5, -12)],
        &[(6, 0), (12, -6), (12, -12)],
    ],
    [
        &[(0, 1), (6, 1), (12, -5)],
        &[(-1, 0), (5, -6)],
        &[(12, 0), (18, -6)],
    ],
    [
        &[(0, -5), (6, 1)],
        &[(5, 0), (-1, -6), (-1, -12)],
        &[(12, 0), (12, -6), (6, -12)],
    ],
    [
        &[(0, 1), (6, 1)],
        &[(-1, 0), (-1, -6), (-1, -12)],
        &[(12, 0), (6, -6), (6, -12)],
    ],
    [
        &[(0, 1), (6, 1), (12, 1)],
        &[(-1, 0), (11, -6)],
        &[(18, 0), (18, -6)],
    ],
    [
        &[(0, -11), (6, 1)],
        &[(5, 0), (5, -6), (-1, -12)],
        &[(12, 0), (12, -6), (12, -12)],
    ],
    [
        &[(0, 1), (6, -5), (12, -5)],
        &[(-1, 0), (-1, -6)],
        &[(6, 0), (18, -6)],
    ],
    [
        &[(0, 1), (6, 1), (12, 1)],
        &[(-1, 0), (5, -6)],
        &[(18, 0), (12, -6)],
    ],
    [
        &[(0, -5), (6, 1)],
        &[(5, 0), (-1, -6), (5, -12)],
        &[(12, 0), (12, -6), (12, -12)],
    ],
    [
        &[(0, -5), (6, 1), (12, -5)],
        &[(5, 0), (-1, -6)],
        &[(12, 0), (18, -6)],
    ],
    [
        &[(0, 1), (6, -5)],
        &[(-1, 0), (-1, -6), (-1, -12)],
        &[(6, 0), (12, -6), (6, -12)],
    ],
    [
        &[(0, 1), (6, 1)],
        &[(-1, 0), (5, -6), (5, -12)],
        &[(12, 0), (12, -6), (12, -12)],
    ],
    [
        &[(0, -5), (6, -5), (12, 1)],
        &[(11, 0), (-1, -6)],
        &[(18, 0), (18, -6)],
    ],
    [
        &[(0, 1), (6, -11)],
        &[(-1, 0), (-1, -6), (-1, -12)],
        &[(6, 0), (6, -6), (12, -12)],
    ],
    [
        &[(0, 1), (6, 1), (12, 1)],
        &[(-1, 0), (-1, -6)],
        &[(18, 0), (6, -6)],
    ],
];

/// Probe offsets for `shape` moving in `direction`.
#[must_use]
pub fn probes(shape: ShapeCode, direction: Direction) -> &'static [(i16, i16)] {
    PROBES[usize::from(shape.code())][direction.index()]
}

impl Board {
    /// Returns whether `shape` at `(x0, y0)` cannot move one step in `direction`.
    #[must_use]
    pub fn is_blocked(&self, shape: ShapeCode, x0: i16, y0: i16, direction: Direction) -> bool {
        probes(shape, direction)
            .iter()
            .any(|&(dx, dy)| self.is_solid(x0 + dx, y0 + dy))
    }

    #[must_use]
    pub fn is_blocked_below(&self, shape: ShapeCode, x0: i16, y0: i16) -> bool {
        self.is_blocked(shape, x0, y0, Direction::Below)
    }

    #[must_use]
    pub fn is_blocked_left(&self, shape: ShapeCode, x0: i16, y0: i16) -> bool {
        self.is_blocked(shape, x0, y0, Direction::Left)
    }

    #[must_use]
    pub fn is_blocked_right(&self, shape: ShapeCode, x0: i16, y0: i16) -> bool {
        self.is_blocked(shape, x0, y0, Direction::Right)
    }

    /// Returns whether the next orientation of `shape` would overlap a solid
    /// cell when anchored at `(x0, y0)`.
    ///
    /// Unlike painting, the whole footprint is checked, including rows 0 and 1.
    #[must_use]
    pub fn is_blocked_on_rotate(&self, shape: ShapeCode, x0: i16, y0: i16) -> bool {
        let next = shape.rotated();
        next != shape
            && next
                .positions(x0, y0)
                .any(|(x, y)| self.is_solid(x, y))
    }

    /// Returns whether a piece that just locked at `(x0, y0)` stacked up to
    /// the spawn row.
    ///
    /// True only when the piece locked one gravity step below the spawn row
    /// and the cell under its anchor is solid.
    #[must_use]
    pub fn reached_top(&self, _shape: ShapeCode, x0: i16, y0: i16) -> bool {
        y0 - BLOCK_SIZE == 0 && self.is_solid(x0, y0 + 1)
    }
}
