use std::time::Duration;

use crossterm::event::{Event, KeyCode};
use lcdtris_engine::{
    AnalogInput as _, Button, Console, Framebuffer, GameSummary, LadderSimulator, Screen,
};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    style::{Color, Style},
    text::{Line, Text},
    widgets::Block,
};

use crate::{
    tui::{App, Tui},
    ui::widgets::LcdDisplay,
};

/// Loop period outside of games, where only button presses matter.
const MENU_TICK: Duration = Duration::from_millis(100);
const FRAME_RATE: f64 = 30.0;

/// Terminal front end: keys become ladder voltages, ticks run the console.
#[derive(Debug)]
pub struct PlayApp {
    console: Console,
    lcd: Framebuffer,
    ladder: LadderSimulator,
    last_sample: u16,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(console: Console, ladder: LadderSimulator) -> Self {
        Self {
            console,
            lcd: Framebuffer::new(),
            ladder,
            last_sample: 0,
            is_exiting: false,
        }
    }

    pub fn last_summary(&self) -> GameSummary {
        self.console.session().summary()
    }

    fn tick_interval(&self) -> Duration {
        if self.console.screen().is_playing() {
            Duration::from_secs_f32(self.console.session().config().tick_seconds)
        } else {
            MENU_TICK
        }
    }

    fn help_text(&self) -> &'static str {
        match self.console.screen() {
            Screen::Playing => "← → (Move) | ↓ (Soft Drop) | ↑ Space (Rotate) | Q (Quit)",
            Screen::Menu | Screen::NameEntry => {
                "← (Next) | → (Previous) | ↓ ↑ Enter (Select) | Q (Quit)"
            }
            Screen::Highscores | Screen::GameOver => "Any arrow (Back) | Q (Quit)",
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_frame_rate(FRAME_RATE);
        tui.set_tick_interval(self.tick_interval());
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        let Some(key) = event.as_key_press_event() else {
            return;
        };
        let button = match key.code {
            KeyCode::Left => Button::Left,
            KeyCode::Right => Button::Right,
            KeyCode::Down | KeyCode::Enter => Button::Down,
            KeyCode::Up | KeyCode::Char(' ') => Button::Rotate,
            KeyCode::Char('q') | KeyCode::Esc => {
                self.is_exiting = true;
                return;
            }
            _ => return,
        };
        // Held until the next tick has sampled it.
        self.ladder.press(button);
    }

    fn draw(&self, frame: &mut Frame) {
        let lcd = LcdDisplay::new(&self.lcd).block(
            Block::bordered()
                .title(Line::from(format!(" ADC {:4} ", self.last_sample)).centered())
                .border_style(Style::default().fg(Color::Gray)),
        );
        let help = Text::from(self.help_text())
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [lcd_area, help_area] = Layout::vertical([
            Constraint::Length(lcd.height()),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(frame.area());
        let [lcd_area] = Layout::horizontal([Constraint::Length(lcd.width())])
            .flex(Flex::Center)
            .areas(lcd_area);
        frame.render_widget(&lcd, lcd_area);
        frame.render_widget(help, help_area);
    }

    fn update(&mut self, tui: &mut Tui) {
        self.last_sample = self.ladder.read();
        self.ladder.release();
        if let Some(outcome) = self.console.step(self.last_sample, &mut self.lcd)
            && outcome.lines > 0
        {
            tracing::debug!(lines = outcome.lines, points = outcome.points, "lines cleared");
        }
        tui.set_tick_interval(self.tick_interval());
    }
}
