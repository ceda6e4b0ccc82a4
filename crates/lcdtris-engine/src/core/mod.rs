pub use self::{board::*, cell::*, collision::*, shape::*};

pub(crate) mod board;
pub(crate) mod cell;
pub(crate) mod collision;
pub(crate) mod shape;

/// Width and height of the LCD grid in cells.
pub const GRID_SIZE: usize = 128;
/// Side of one tetromino block in grid cells.
pub const BLOCK_SIZE: i16 = 6;

pub const LEFT_WALL_X: usize = 56;
pub const RIGHT_WALL_X: usize = 117;
pub const FLOOR_Y: usize = 127;

/// First playable column (just right of the left wall).
pub const PLAYABLE_LEFT: usize = LEFT_WALL_X + 1;
/// Last playable column (just left of the right wall).
pub const PLAYABLE_RIGHT: usize = RIGHT_WALL_X - 1;
pub const PLAYABLE_WIDTH: usize = PLAYABLE_RIGHT - PLAYABLE_LEFT + 1;
/// Number of playable rows (`0..FLOOR_Y`).
pub const PLAYABLE_HEIGHT: usize = FLOOR_Y;

const _: () = assert!(PLAYABLE_WIDTH == 60);
const _: () = assert!(PLAYABLE_WIDTH % BLOCK_SIZE as usize == 0);
