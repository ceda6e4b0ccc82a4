use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::lcd_display::*;

mod lcd_display;

mod color {
    use lcdtris_engine::Rgb565;
    use ratatui::style::Color;

    pub fn from_rgb565(color: Rgb565) -> Color {
        let (r, g, b) = color.to_rgb8();
        Color::Rgb(r, g, b)
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
