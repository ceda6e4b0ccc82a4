use lcdtris_engine::{
    BLOCK_SIZE, FLOOR_Y, Framebuffer, LEFT_WALL_X, PLAYABLE_LEFT, PLAYABLE_WIDTH, RIGHT_WALL_X,
    Rgb565, TEXT_COLUMNS, TEXT_ROWS,
};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::color;

const BLOCK: usize = BLOCK_SIZE.unsigned_abs() as usize;
/// Playfield columns shown, one per block.
const BOARD_COLUMNS: usize = PLAYABLE_WIDTH / BLOCK;
/// Playfield rows shown, one per block band.
const BOARD_ROWS: usize = FLOOR_Y / BLOCK;
/// Terminal cells per block.
const CELL_WIDTH: u16 = 2;

/// Renders a [`Framebuffer`] as two panels: the text layer at glyph
/// resolution and the playfield at block resolution.
#[derive(Debug)]
pub struct LcdDisplay<'a> {
    lcd: &'a Framebuffer,
    block: Option<BlockWidget<'a>>,
}

impl<'a> LcdDisplay<'a> {
    pub fn new(lcd: &'a Framebuffer) -> Self {
        Self { lcd, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    fn board_width() -> u16 {
        (BOARD_COLUMNS as u16 + 2) * CELL_WIDTH
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        TEXT_COLUMNS as u16
            + 1
            + Self::board_width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        let rows = TEXT_ROWS.max(BOARD_ROWS + 1) as u16;
        rows + super::block_vertical_margin(self.block.as_ref())
    }

    fn render_text(&self, area: Rect, buf: &mut Buffer) {
        let blank = Style::new().bg(color::from_rgb565(self.lcd.background()));
        for (row, y) in (0..TEXT_ROWS).zip(area.top()..area.bottom()) {
            for (column, x) in (0..TEXT_COLUMNS).zip(area.left()..area.right()) {
                let Some(cell) = buf.cell_mut((x, y)) else {
                    continue;
                };
                match self.lcd.glyph(column, row) {
                    Some(glyph) => {
                        let style = Style::new()
                            .fg(color::from_rgb565(glyph.fg))
                            .bg(color::from_rgb565(glyph.bg));
                        cell.set_char(glyph.ch).set_style(style);
                    }
                    None => {
                        cell.set_char(' ').set_style(blank);
                    }
                }
            }
        }
    }

    /// Samples the centre pixel of every block, plus the walls and floor.
    fn board_pixel(&self, column: usize, row: usize) -> Rgb565 {
        let x = match column {
            0 => LEFT_WALL_X,
            c if c > BOARD_COLUMNS => RIGHT_WALL_X,
            c => PLAYABLE_LEFT + (c - 1) * BLOCK + BLOCK / 2,
        };
        let y = if row >= BOARD_ROWS {
            FLOOR_Y
        } else {
            row * BLOCK + BLOCK / 2
        };
        self.lcd.pixel(x, y)
    }

    fn render_board(&self, area: Rect, buf: &mut Buffer) {
        for (row, y) in (0..=BOARD_ROWS).zip(area.top()..area.bottom()) {
            let xs = (area.left()..area.right()).step_by(usize::from(CELL_WIDTH));
            for (column, x) in (0..BOARD_COLUMNS + 2).zip(xs) {
                let style = Style::new().bg(color::from_rgb565(self.board_pixel(column, row)));
                for dx in 0..CELL_WIDTH {
                    if let Some(cell) = buf.cell_mut((x + dx, y)) {
                        cell.set_char(' ').set_style(style);
                    }
                }
            }
        }
    }
}

impl Widget for LcdDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &LcdDisplay<'_> {
    #[expect(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let [text_area, _, board_area] = Layout::horizontal([
            Constraint::Length(TEXT_COLUMNS as u16),
            Constraint::Length(1),
            Constraint::Length(LcdDisplay::board_width()),
        ])
        .areas(area);
        self.render_text(text_area, buf);
        self.render_board(board_area, buf);
    }
}
