use crate::core::{GRID_SIZE, Rgb565};

/// Width of one text glyph in pixels.
pub const GLYPH_WIDTH: usize = 6;
/// Height of one text glyph in pixels.
pub const GLYPH_HEIGHT: usize = 8;
/// Text columns that fit across the panel.
pub const TEXT_COLUMNS: usize = GRID_SIZE / GLYPH_WIDTH;
/// Text rows that fit down the panel.
pub const TEXT_ROWS: usize = GRID_SIZE / GLYPH_HEIGHT;

/// Sink for everything the console draws.
///
/// Coordinates are grid cells for [`paint_cell`](Self::paint_cell) and text
/// cells (6×8 pixels) for [`draw_text`](Self::draw_text). Implementations
/// clip anything that falls outside the panel.
pub trait Display {
    fn paint_cell(&mut self, x: usize, y: usize, color: Rgb565);

    fn paint_cells<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = (usize, usize, Rgb565)>,
        Self: Sized,
    {
        for (x, y, color) in cells {
            self.paint_cell(x, y, color);
        }
    }

    fn clear_screen(&mut self, color: Rgb565);

    fn draw_text(&mut self, text: &str, column: usize, row: usize, fg: Rgb565, bg: Rgb565);
}

/// One character cell of the text layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Rgb565,
    pub bg: Rgb565,
}

/// In-memory panel: a pixel plane plus a character layer on top.
///
/// Used by the terminal emulator and by tests. Text is kept as characters
/// instead of being rasterised, and a glyph covers the pixels below it until
/// the screen is cleared.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    pixels: Box<[[Rgb565; GRID_SIZE]; GRID_SIZE]>,
    text: [[Option<Glyph>; TEXT_COLUMNS]; TEXT_ROWS],
    background: Rgb565,
    pixel_writes: usize,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pixels: Box::new([[Rgb565::BLACK; GRID_SIZE]; GRID_SIZE]),
            text: [[None; TEXT_COLUMNS]; TEXT_ROWS],
            background: Rgb565::BLACK,
            pixel_writes: 0,
        }
    }

    /// Colour at `(x, y)`; black outside the panel.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb565 {
        self.pixels
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(Rgb565::BLACK)
    }

    #[must_use]
    pub fn glyph(&self, column: usize, row: usize) -> Option<Glyph> {
        self.text.get(row)?.get(column).copied().flatten()
    }

    /// Characters of text row `row`, blanks where nothing was drawn.
    #[must_use]
    pub fn text_row(&self, row: usize) -> String {
        self.text.get(row).map_or_else(String::new, |cells| {
            cells
                .iter()
                .map(|glyph| glyph.map_or(' ', |g| g.ch))
                .collect()
        })
    }

    /// Finds the first occurrence of `needle` and returns its `(column, row)`.
    #[must_use]
    pub fn find_text(&self, needle: &str) -> Option<(usize, usize)> {
        (0..TEXT_ROWS).find_map(|row| {
            let line = self.text_row(row);
            line.find(needle).map(|column| (column, row))
        })
    }

    #[must_use]
    pub const fn background(&self) -> Rgb565 {
        self.background
    }

    /// Number of `paint_cell` calls since creation.
    #[must_use]
    pub const fn pixel_writes(&self) -> usize {
        self.pixel_writes
    }
}

impl Display for Framebuffer {
    fn paint_cell(&mut self, x: usize, y: usize, color: Rgb565) {
        if let Some(pixel) = self.pixels.get_mut(y).and_then(|row| row.get_mut(x)) {
            *pixel = color;
            self.pixel_writes += 1;
        }
    }

    fn clear_screen(&mut self, color: Rgb565) {
        for row in self.pixels.iter_mut() {
            row.fill(color);
        }
        self.text = [[None; TEXT_COLUMNS]; TEXT_ROWS];
        self.background = color;
    }

    fn draw_text(&mut self, text: &str, column: usize, row: usize, fg: Rgb565, bg: Rgb565) {
        let Some(cells) = self.text.get_mut(row) else {
            return;
        };
        for (cell, ch) in cells.iter_mut().skip(column).zip(text.chars()) {
            *cell = Some(Glyph { ch, fg, bg });
        }
    }
}
