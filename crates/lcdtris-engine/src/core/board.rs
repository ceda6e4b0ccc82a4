use std::ops::RangeInclusive;

use crate::core::{
    Cell, FLOOR_Y, GRID_SIZE, LEFT_WALL_X, PLAYABLE_HEIGHT, PLAYABLE_LEFT, PLAYABLE_RIGHT,
    PLAYABLE_WIDTH, RIGHT_WALL_X, ShapeCode,
};

/// Cells at or above this row are never written by [`Board::paint_shape`].
const PAINT_MIN_Y: i16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BoardRow {
    cells: [Cell; GRID_SIZE],
}

impl BoardRow {
    const EMPTY: Self = Self {
        cells: [Cell::Empty; GRID_SIZE],
    };

    const FRAMED: Self = {
        let mut cells = [Cell::Empty; GRID_SIZE];
        cells[LEFT_WALL_X] = Cell::Wall;
        cells[RIGHT_WALL_X] = Cell::Wall;
        Self { cells }
    };

    const FLOOR: Self = {
        let mut cells = [Cell::Empty; GRID_SIZE];
        let mut x = LEFT_WALL_X;
        while x <= RIGHT_WALL_X {
            cells[x] = Cell::Wall;
            x += 1;
        }
        Self { cells }
    };

    fn solid_count(&self) -> usize {
        self.cells[PLAYABLE_LEFT..=PLAYABLE_RIGHT]
            .iter()
            .filter(|c| c.is_solid())
            .count()
    }

    fn is_full(&self) -> bool {
        self.solid_count() == PLAYABLE_WIDTH
    }
}

/// Tracks which cells changed since the last flush, one column mask per row.
#[derive(Debug, Clone)]
struct DirtyMap {
    rows: [u128; GRID_SIZE],
}

impl DirtyMap {
    const CLEAN: Self = Self {
        rows: [0; GRID_SIZE],
    };

    fn mark(&mut self, x: usize, y: usize) {
        self.rows[y] |= 1u128 << x;
    }

    fn mark_all(&mut self) {
        self.rows = [u128::MAX; GRID_SIZE];
    }

    fn is_clean(&self) -> bool {
        self.rows.iter().all(|&mask| mask == 0)
    }
}

/// The 128×128 LCD grid.
///
/// `Board` owns every cell; all writes go through its methods so the wall
/// frame stays intact and every change is recorded for the next incremental
/// repaint ([`Board::take_dirty`]).
///
/// # Layout
///
/// - **Left wall**: column 56
/// - **Right wall**: column 117
/// - **Floor**: row 127
/// - **Playable area**: columns 57..=116 (60 cells) × rows 0..=126
///
/// # Example
///
/// ```
/// use lcdtris_engine::{Board, Cell, ShapeCode};
///
/// let mut board = Board::new();
/// board.lock_shape(ShapeCode::SQUARE, 81, 126);
/// assert_eq!(board.cell(81, 126), Some(Cell::Locked(ShapeCode::SQUARE.family())));
/// assert_eq!(board.clear_full_rows(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    rows: Box<[BoardRow; GRID_SIZE]>,
    dirty: DirtyMap,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub const PLAYABLE_COLUMNS: RangeInclusive<usize> = PLAYABLE_LEFT..=PLAYABLE_RIGHT;

    /// Creates a board with the frame already stamped.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self {
            rows: Box::new([BoardRow::EMPTY; GRID_SIZE]),
            dirty: DirtyMap::CLEAN,
        };
        board.create_frame();
        board
    }

    /// Resets the grid to an empty playfield framed by the walls.
    ///
    /// The whole grid is marked dirty.
    pub fn create_frame(&mut self) {
        for (y, row) in self.rows.iter_mut().enumerate() {
            *row = if y == FLOOR_Y {
                BoardRow::FLOOR
            } else {
                BoardRow::FRAMED
            };
        }
        self.dirty.mark_all();
    }

    fn index(x: i16, y: i16) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok().filter(|&x| x < GRID_SIZE)?;
        let y = usize::try_from(y).ok().filter(|&y| y < GRID_SIZE)?;
        Some((x, y))
    }

    /// Returns the cell at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, x: i16, y: i16) -> Option<Cell> {
        let (x, y) = Self::index(x, y)?;
        Some(self.rows[y].cells[x])
    }

    /// Returns whether `(x, y)` holds a wall or a locked block.
    ///
    /// Positions outside the grid are never solid.
    #[must_use]
    pub fn is_solid(&self, x: i16, y: i16) -> bool {
        self.cell(x, y).is_some_and(Cell::is_solid)
    }

    fn write(&mut self, x: i16, y: i16, value: Cell) {
        let Some((x, y)) = Self::index(x, y) else {
            return;
        };
        let cell = &mut self.rows[y].cells[x];
        if *cell == Cell::Wall || *cell == value {
            return;
        }
        *cell = value;
        self.dirty.mark(x, y);
    }

    /// Writes `value` into every cell of `shape` anchored at `(x0, y0)`.
    ///
    /// Cells in rows 0 and 1, cells outside the grid, and wall cells are left
    /// untouched.
    pub fn paint_shape(&mut self, shape: ShapeCode, x0: i16, y0: i16, value: Cell) {
        for (x, y) in shape.positions(x0, y0) {
            if y >= PAINT_MIN_Y {
                self.write(x, y, value);
            }
        }
    }

    pub fn erase_shape(&mut self, shape: ShapeCode, x0: i16, y0: i16) {
        self.paint_shape(shape, x0, y0, Cell::Empty);
    }

    /// Paints `shape` with its family's locked colour.
    pub fn lock_shape(&mut self, shape: ShapeCode, x0: i16, y0: i16) {
        self.paint_shape(shape, x0, y0, shape.locked_color());
    }

    /// Clears every full playable row and compacts the rows above it.
    ///
    /// A row is full when all 60 playable cells are solid. Full rows are
    /// processed top to bottom; for each one, every row above it moves down
    /// by one and row 0 keeps its content.
    ///
    /// # Returns
    ///
    /// The number of grid rows cleared. A block is six rows tall, so a single
    /// line of blocks yields 6.
    pub fn clear_full_rows(&mut self) -> usize {
        let full_rows: Vec<usize> = (0..PLAYABLE_HEIGHT)
            .filter(|&y| self.rows[y].is_full())
            .collect();
        let Some(&lowest) = full_rows.last() else {
            return 0;
        };

        let before: Vec<BoardRow> = self.rows[..=lowest].to_vec();
        for &y in &full_rows {
            self.rows[y].cells[Self::PLAYABLE_COLUMNS].fill(Cell::Empty);
        }
        for &y in &full_rows {
            self.rows.copy_within(0..y, 1);
        }
        for (y, old) in before.iter().enumerate() {
            for x in Self::PLAYABLE_COLUMNS {
                if old.cells[x] != self.rows[y].cells[x] {
                    self.dirty.mark(x, y);
                }
            }
        }

        tracing::debug!(rows = full_rows.len(), lowest, "cleared full rows");
        full_rows.len()
    }

    /// Number of solid playable cells in row `y`.
    #[must_use]
    pub fn solid_count(&self, y: usize) -> usize {
        self.rows.get(y).map_or(0, BoardRow::solid_count)
    }

    /// Iterates rows top to bottom; each row is indexed by column.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; GRID_SIZE]> {
        self.rows.iter().map(|row| &row.cells)
    }

    #[cfg(test)]
    pub(crate) fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        self.rows[y].cells[x] = cell;
    }

    /// Marks the whole grid for repaint.
    pub fn invalidate(&mut self) {
        self.dirty.mark_all();
    }

    #[must_use]
    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_clean()
    }

    /// Returns every cell changed since the previous call, in row-major order.
    pub fn take_dirty(&mut self) -> Vec<(usize, usize, Cell)> {
        let mut cells = vec![];
        for (y, mask) in self.dirty.rows.iter_mut().enumerate() {
            let mut bits = std::mem::take(mask);
            while bits != 0 {
                let x = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                cells.push((x, y, self.rows[y].cells[x]));
            }
        }
        cells
    }
}
