//! Screen flow of the console: menu, game, name entry, highscores, and the
//! game-over summary.

use arrayvec::ArrayString;
use serde::Serialize;

use crate::{
    ConfigError,
    core::Rgb565,
    engine::{
        Display, GameConfig, GameSession, HighscoreTable, MenuEvent, NAME_LEN, PlayerName,
        StepOutcome,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum Screen {
    Menu,
    Playing,
    NameEntry,
    Highscores,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    PlayGame,
    ChangeName,
    Highscores,
}

impl MenuItem {
    pub const LEN: usize = 3;
    pub const ALL: [Self; Self::LEN] = [Self::PlayGame, Self::ChangeName, Self::Highscores];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PlayGame => "PLAY GAME",
            Self::ChangeName => "CHANGE MY NAME",
            Self::Highscores => "HIGH SCORE",
        }
    }

    /// Text `(column, row)` of the entry.
    const fn position(self) -> (usize, usize) {
        match self {
            Self::PlayGame => (7, 8),
            Self::ChangeName => (4, 10),
            Self::Highscores => (6, 12),
        }
    }
}

/// One selectable key of the name-entry keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKey {
    Letter(char),
    Escape,
    Delete,
    Enter,
}

impl NameKey {
    /// Letters `A`-`Z`, then `Esc`, `Del`, `Ent`.
    pub const LEN: usize = 29;

    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        match index {
            0..26 => Self::Letter((b'A' + index as u8) as char),
            26 => Self::Escape,
            27 => Self::Delete,
            _ => Self::Enter,
        }
    }

    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Letter(c) => c.to_string(),
            Self::Escape => "Esc".to_owned(),
            Self::Delete => "Del".to_owned(),
            Self::Enter => "Ent".to_owned(),
        }
    }
}

/// Text cell of each keyboard key: four rows, letters eight or nine per row
/// and the three commands on the last one.
const NAME_KEY_LAYOUT: [(usize, usize); NameKey::LEN] = {
    let mut layout = [(0, 0); NameKey::LEN];
    let mut column = 2;
    let mut row = 4;
    let mut i = 0;
    while i < NameKey::LEN {
        if column < 17 && row < 10 {
            column += 2;
        } else if column > 16 && row < 10 {
            row += 2;
            column = 2;
        } else if column < 17 && row > 9 {
            column += 7;
        }
        layout[i] = (column, row);
        i += 1;
    }
    layout
};

/// First text row of the command keys.
const NAME_COMMAND_ROW: usize = 10;
const NAME_BUFFER_COLUMN: usize = 7;
const NAME_BUFFER_ROW: usize = 12;
const MAX_CHARS_TEXT: &str = "MAX 7 CHARS!!!";

#[derive(Debug, Clone, Default)]
struct NameEntry {
    cursor: usize,
    buffer: ArrayString<NAME_LEN>,
}

/// The whole console: a screen state machine driving a [`GameSession`].
///
/// Call [`step`](Self::step) once per loop iteration with a fresh ADC
/// reading. Menu screens react once per button press; during play the held
/// button is applied on every tick.
///
/// ```
/// use lcdtris_engine::{Console, Framebuffer, GameConfig, Screen};
///
/// let mut console = Console::new(GameConfig::default())?;
/// let mut lcd = Framebuffer::new();
/// console.step(4000, &mut lcd);
/// assert_eq!(lcd.find_text("PLAY GAME"), Some((7, 8)));
///
/// // The select band starts the highlighted entry.
/// console.step(3600, &mut lcd);
/// assert_eq!(console.screen(), Screen::Playing);
/// # Ok::<(), lcdtris_engine::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Console {
    config: GameConfig,
    screen: Screen,
    menu_cursor: usize,
    name_entry: NameEntry,
    player: PlayerName,
    highscores: HighscoreTable,
    session: GameSession,
    button_held: bool,
    needs_redraw: bool,
}

impl Console {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let player = PlayerName::default();
        Ok(Self {
            highscores: HighscoreTable::new(config.highscore_policy),
            session: GameSession::new(config.clone(), player, 0),
            config,
            screen: Screen::Menu,
            menu_cursor: 0,
            name_entry: NameEntry::default(),
            player,
            button_held: false,
            needs_redraw: true,
        })
    }

    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub const fn player(&self) -> PlayerName {
        self.player
    }

    #[must_use]
    pub const fn highscores(&self) -> &HighscoreTable {
        &self.highscores
    }

    /// The current game, or the last finished one.
    #[must_use]
    pub const fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub fn menu_selection(&self) -> MenuItem {
        MenuItem::ALL[self.menu_cursor]
    }

    /// Characters typed so far on the name-entry screen.
    #[must_use]
    pub fn pending_name(&self) -> &str {
        &self.name_entry.buffer
    }

    #[must_use]
    pub const fn name_cursor(&self) -> NameKey {
        NameKey::from_index(self.name_entry.cursor)
    }

    /// Advances the console by one loop iteration.
    ///
    /// Returns what the game did when the console is on the playing screen.
    pub fn step<D>(&mut self, sample: u16, display: &mut D) -> Option<StepOutcome>
    where
        D: Display,
    {
        let pressed = self.config.bands.is_any_button(sample);
        let new_press = pressed && !self.button_held;
        self.button_held = pressed;

        if self.needs_redraw {
            self.needs_redraw = false;
            self.draw_screen(display);
        }

        match self.screen {
            Screen::Menu => {
                if new_press {
                    self.handle_menu(self.config.bands.decode_menu(sample), sample, display);
                }
                None
            }
            Screen::Playing => Some(self.play(sample, display)),
            Screen::NameEntry => {
                if new_press {
                    self.handle_name_entry(self.config.bands.decode_menu(sample), display);
                }
                None
            }
            Screen::Highscores | Screen::GameOver => {
                if new_press {
                    self.enter(Screen::Menu, display);
                }
                None
            }
        }
    }

    fn enter<D>(&mut self, screen: Screen, display: &mut D)
    where
        D: Display,
    {
        tracing::debug!(from = ?self.screen, to = ?screen, "screen change");
        self.screen = screen;
        self.draw_screen(display);
    }

    fn draw_screen<D>(&mut self, display: &mut D)
    where
        D: Display,
    {
        display.clear_screen(Rgb565::BLACK);
        match self.screen {
            Screen::Menu => self.draw_menu(display),
            Screen::Playing => {
                self.session.draw_hud_labels(display);
                self.session.draw_hud(display);
                self.session.repaint_board(display);
            }
            Screen::NameEntry => self.draw_name_entry(display),
            Screen::Highscores => self.draw_highscores(display),
            Screen::GameOver => self.draw_game_over(display),
        }
    }

    fn handle_menu<D>(&mut self, event: MenuEvent, sample: u16, display: &mut D)
    where
        D: Display,
    {
        match event {
            MenuEvent::None => {}
            MenuEvent::Next => {
                self.menu_cursor = (self.menu_cursor + 1) % MenuItem::LEN;
                self.draw_menu(display);
            }
            MenuEvent::Previous => {
                self.menu_cursor = (self.menu_cursor + MenuItem::LEN - 1) % MenuItem::LEN;
                self.draw_menu(display);
            }
            MenuEvent::Select => match self.menu_selection() {
                MenuItem::PlayGame => {
                    self.session = GameSession::new(self.config.clone(), self.player, sample);
                    self.enter(Screen::Playing, display);
                }
                MenuItem::ChangeName => {
                    self.name_entry = NameEntry::default();
                    self.enter(Screen::NameEntry, display);
                }
                MenuItem::Highscores => self.enter(Screen::Highscores, display),
            },
        }
    }

    fn play<D>(&mut self, sample: u16, display: &mut D) -> StepOutcome
    where
        D: Display,
    {
        let outcome = self.session.step(sample);
        self.session.flush(display);
        self.session.draw_hud(display);
        if outcome.is_game_over() {
            let summary = self.session.summary();
            self.highscores.record(self.player, summary.score.score);
            self.enter(Screen::GameOver, display);
        }
        outcome
    }

    fn handle_name_entry<D>(&mut self, event: MenuEvent, display: &mut D)
    where
        D: Display,
    {
        let entry = &mut self.name_entry;
        match event {
            MenuEvent::None => {}
            MenuEvent::Next => {
                entry.cursor = (entry.cursor + 1) % NameKey::LEN;
                self.draw_name_keys(display);
            }
            MenuEvent::Previous => {
                entry.cursor = (entry.cursor + NameKey::LEN - 1) % NameKey::LEN;
                self.draw_name_keys(display);
            }
            MenuEvent::Select => match NameKey::from_index(entry.cursor) {
                NameKey::Letter(c) => {
                    if entry.buffer.try_push(c).is_ok() {
                        let column = NAME_BUFFER_COLUMN + entry.buffer.len() - 1;
                        let (fg, bg) = (Rgb565::YELLOW, Rgb565::BLACK);
                        display.draw_text(&c.to_string(), column, NAME_BUFFER_ROW, fg, bg);
                    } else {
                        display.draw_text(MAX_CHARS_TEXT, 4, 14, Rgb565::WHITE, Rgb565::BLACK);
                    }
                }
                NameKey::Escape => {
                    *entry = NameEntry::default();
                    self.enter(Screen::Menu, display);
                }
                NameKey::Delete => {
                    if entry.buffer.pop().is_some() {
                        let column = NAME_BUFFER_COLUMN + entry.buffer.len();
                        let (fg, bg) = (Rgb565::WHITE, Rgb565::BLACK);
                        display.draw_text(" ", column, NAME_BUFFER_ROW, fg, bg);
                        let blank = " ".repeat(MAX_CHARS_TEXT.len());
                        display.draw_text(&blank, 4, 14, Rgb565::BLACK, Rgb565::BLACK);
                    }
                }
                NameKey::Enter => match PlayerName::new(&entry.buffer) {
                    Ok(name) => {
                        tracing::info!(old = %self.player, new = %name, "player renamed");
                        self.player = name;
                        self.name_entry = NameEntry::default();
                        self.enter(Screen::Menu, display);
                    }
                    Err(err) => tracing::debug!(%err, "name not accepted"),
                },
            },
        }
    }

    fn draw_menu<D>(&self, display: &mut D)
    where
        D: Display,
    {
        display.draw_text(".TETRIS.", 7, 2, Rgb565::MENU_GREEN, Rgb565::BLACK);
        display.draw_text("THE STM32 GAME", 4, 4, Rgb565::LIME, Rgb565::BLACK);
        for (i, item) in MenuItem::ALL.into_iter().enumerate() {
            let (column, row) = item.position();
            let (fg, bg) = if i == self.menu_cursor {
                (Rgb565::WHITE, Rgb565::RED)
            } else {
                (Rgb565::RED, Rgb565::BLACK)
            };
            display.draw_text(item.label(), column, row, fg, bg);
        }
    }

    fn draw_name_entry<D>(&self, display: &mut D)
    where
        D: Display,
    {
        display.draw_text("OLD NAME:", 3, 1, Rgb565::MENU_GREEN, Rgb565::BLACK);
        let old = format!("{:<NAME_LEN$}", self.player);
        display.draw_text(&old, 13, 1, Rgb565::YELLOW, Rgb565::BLACK);
        self.draw_name_keys(display);
        display.draw_text(
            &self.name_entry.buffer,
            NAME_BUFFER_COLUMN,
            NAME_BUFFER_ROW,
            Rgb565::YELLOW,
            Rgb565::BLACK,
        );
    }

    fn draw_name_keys<D>(&self, display: &mut D)
    where
        D: Display,
    {
        for (i, &(column, row)) in NAME_KEY_LAYOUT.iter().enumerate() {
            let selected = i == self.name_entry.cursor;
            let (fg, bg) = match (row >= NAME_COMMAND_ROW, selected) {
                (true, true) => (Rgb565::RED, Rgb565::MENU_GREEN),
                (true, false) => (Rgb565::MENU_GREEN, Rgb565::BLACK),
                (false, true) => (Rgb565::WHITE, Rgb565::RED),
                (false, false) => (Rgb565::RED, Rgb565::BLACK),
            };
            display.draw_text(&NameKey::from_index(i).label(), column, row, fg, bg);
        }
    }

    fn draw_highscores<D>(&self, display: &mut D)
    where
        D: Display,
    {
        display.draw_text("HIGHSCORE", 6, 2, Rgb565::MENU_GREEN, Rgb565::BLACK);
        for (i, entry) in self.highscores.entries().iter().enumerate() {
            let row = 5 + 2 * i;
            display.draw_text(&format!("{}.", i + 1), 3, row, Rgb565::WHITE, Rgb565::BLACK);
            if let Some(name) = entry.name {
                display.draw_text(name.as_str(), 6, row, Rgb565::RED, Rgb565::BLACK);
            }
            display.draw_text(":", 14, row, Rgb565::WHITE, Rgb565::BLACK);
            display.draw_text(&entry.score.to_string(), 15, row, Rgb565::RED, Rgb565::BLACK);
        }
        display.draw_text("BACK", 1, 15, Rgb565::WHITE, Rgb565::RED);
    }

    fn draw_game_over<D>(&self, display: &mut D)
    where
        D: Display,
    {
        let score = self.session.score();
        display.draw_text("Game Over!", 6, 2, Rgb565::MENU_GREEN, Rgb565::BLACK);
        display.draw_text("Chin up", 4, 6, Rgb565::WHITE, Rgb565::BLACK);
        display.draw_text(self.player.as_str(), 12, 6, Rgb565::YELLOW, Rgb565::BLACK);
        for (label, value, row) in [
            ("Score :", score.score().to_string(), 8),
            ("Time  :", score.time_text(), 10),
            ("P/min :", score.rate_text(), 12),
        ] {
            display.draw_text(label, 4, row, Rgb565::RED, Rgb565::BLACK);
            display.draw_text(&value, 12, row, Rgb565::WHITE, Rgb565::BLACK);
        }
        display.draw_text("BACK", 1, 15, Rgb565::WHITE, Rgb565::RED);
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::{Framebuffer, Glyph};

    use super::*;

    const IDLE: u16 = 4000;
    const NEXT: u16 = 2000;
    const PREVIOUS: u16 = 2800;
    const SELECT: u16 = 3600;

    fn console() -> (Console, Framebuffer) {
        let mut console = Console::new(GameConfig::default()).unwrap();
        let mut lcd = Framebuffer::new();
        console.step(IDLE, &mut lcd);
        (console, lcd)
    }

    fn press(console: &mut Console, lcd: &mut Framebuffer, sample: u16) {
        console.step(sample, lcd);
        console.step(IDLE, lcd);
    }

    #[test]
    fn test_name_key_layout() {
        assert_eq!(NAME_KEY_LAYOUT[0], (4, 4));
        assert_eq!(NAME_KEY_LAYOUT[7], (18, 4));
        assert_eq!(NAME_KEY_LAYOUT[8], (2, 6));
        assert_eq!(NAME_KEY_LAYOUT[16], (18, 6));
        assert_eq!(NAME_KEY_LAYOUT[17], (2, 8));
        assert_eq!(NAME_KEY_LAYOUT[25], (18, 8));
        assert_eq!(NAME_KEY_LAYOUT[26], (2, 10));
        assert_eq!(NAME_KEY_LAYOUT[27], (9, 10));
        assert_eq!(NAME_KEY_LAYOUT[28], (16, 10));
        assert_eq!(NameKey::from_index(25), NameKey::Letter('Z'));
        assert_eq!(NameKey::from_index(28), NameKey::Enter);
    }

    #[test]
    fn test_menu_draws_and_highlights() {
        let (_, lcd) = console();
        assert_eq!(lcd.find_text(".TETRIS."), Some((7, 2)));
        assert_eq!(lcd.find_text("THE STM32 GAME"), Some((4, 4)));
        assert_eq!(lcd.find_text("CHANGE MY NAME"), Some((4, 10)));
        assert_eq!(lcd.find_text("HIGH SCORE"), Some((6, 12)));
        assert_eq!(
            lcd.glyph(7, 8),
            Some(Glyph {
                ch: 'P',
                fg: Rgb565::WHITE,
                bg: Rgb565::RED
            })
        );
    }

    #[test]
    fn test_menu_navigation_wraps() {
        let (mut console, mut lcd) = console();
        press(&mut console, &mut lcd, PREVIOUS);
        assert_eq!(console.menu_selection(), MenuItem::Highscores);
        assert_eq!(lcd.glyph(6, 12).map(|g| g.bg), Some(Rgb565::RED));
        assert_eq!(lcd.glyph(7, 8).map(|g| g.bg), Some(Rgb565::BLACK));
        press(&mut console, &mut lcd, NEXT);
        assert_eq!(console.menu_selection(), MenuItem::PlayGame);
        press(&mut console, &mut lcd, NEXT);
        assert_eq!(console.menu_selection(), MenuItem::ChangeName);
    }

    #[test]
    fn test_held_button_acts_once_in_menu() {
        let (mut console, mut lcd) = console();
        for _ in 0..5 {
            console.step(NEXT, &mut lcd);
        }
        assert_eq!(console.menu_selection(), MenuItem::ChangeName);
    }

    #[test]
    fn test_highscores_screen_and_back() {
        let (mut console, mut lcd) = console();
        press(&mut console, &mut lcd, PREVIOUS);
        press(&mut console, &mut lcd, SELECT);
        assert_eq!(console.screen(), Screen::Highscores);
        assert_eq!(lcd.find_text("HIGHSCORE"), Some((6, 2)));
        assert_eq!(lcd.find_text("5."), Some((3, 13)));
        assert_eq!(lcd.find_text("BACK"), Some((1, 15)));

        press(&mut console, &mut lcd, 1800);
        assert_eq!(console.screen(), Screen::Menu);
        assert_eq!(lcd.find_text("HIGHSCORE"), None);
    }

    #[test]
    fn test_change_name() {
        let (mut console, mut lcd) = console();
        press(&mut console, &mut lcd, NEXT);
        press(&mut console, &mut lcd, SELECT);
        assert_eq!(console.screen(), Screen::NameEntry);
        assert_eq!(lcd.find_text("OLD NAME:"), Some((3, 1)));
        assert_eq!(lcd.find_text("PLAYER"), Some((13, 1)));
        assert_eq!(lcd.find_text("Esc"), Some((2, 10)));

        // B, A, then Del and D: "BD".
        press(&mut console, &mut lcd, NEXT);
        press(&mut console, &mut lcd, SELECT);
        press(&mut console, &mut lcd, PREVIOUS);
        press(&mut console, &mut lcd, SELECT);
        assert_eq!(console.pending_name(), "BA");
        assert_eq!(lcd.glyph(8, 12).map(|g| g.ch), Some('A'));

        for _ in 0..2 {
            press(&mut console, &mut lcd, PREVIOUS);
        }
        assert_eq!(console.name_cursor(), NameKey::Delete);
        press(&mut console, &mut lcd, SELECT);
        assert_eq!(console.pending_name(), "B");
        assert_eq!(lcd.glyph(8, 12).map(|g| g.ch), Some(' '));

        for _ in 0..5 {
            press(&mut console, &mut lcd, NEXT);
        }
        assert_eq!(console.name_cursor(), NameKey::Letter('D'));
        press(&mut console, &mut lcd, SELECT);

        for _ in 0..4 {
            press(&mut console, &mut lcd, PREVIOUS);
        }
        assert_eq!(console.name_cursor(), NameKey::Enter);
        press(&mut console, &mut lcd, SELECT);
        assert_eq!(console.screen(), Screen::Menu);
        assert_eq!(console.player().as_str(), "BD");
    }

    #[test]
    fn test_name_entry_limits() {
        let (mut console, mut lcd) = console();
        press(&mut console, &mut lcd, NEXT);
        press(&mut console, &mut lcd, SELECT);

        // Enter with nothing typed is ignored.
        press(&mut console, &mut lcd, PREVIOUS);
        press(&mut console, &mut lcd, SELECT);
        assert_eq!(console.screen(), Screen::NameEntry);

        press(&mut console, &mut lcd, NEXT);
        for _ in 0..8 {
            press(&mut console, &mut lcd, SELECT);
        }
        assert_eq!(console.pending_name(), "AAAAAAA");
        assert_eq!(lcd.find_text(MAX_CHARS_TEXT), Some((4, 14)));

        for _ in 0..3 {
            press(&mut console, &mut lcd, PREVIOUS);
        }
        assert_eq!(console.name_cursor(), NameKey::Escape);
        press(&mut console, &mut lcd, SELECT);
        assert_eq!(console.screen(), Screen::Menu);
        assert_eq!(console.player(), PlayerName::default());
    }

    #[test]
    fn test_game_runs_to_game_over_screen() {
        let config = GameConfig {
            piece_ceiling: 1,
            ..GameConfig::default()
        };
        let mut console = Console::new(config).unwrap();
        let mut lcd = Framebuffer::new();
        console.step(IDLE, &mut lcd);
        console.step(SELECT, &mut lcd);
        assert_eq!(console.screen(), Screen::Playing);
        assert_eq!(lcd.find_text("Player:"), Some((1, 1)));
        assert_eq!(lcd.pixel(56, 100), Rgb565::WHITE);

        let mut ticks = 0;
        while console.screen().is_playing() {
            assert!(console.step(IDLE, &mut lcd).is_some());
            ticks += 1;
            assert!(ticks < 100);
        }
        assert_eq!(console.screen(), Screen::GameOver);
        assert_eq!(lcd.find_text("Game Over!"), Some((6, 2)));
        assert_eq!(lcd.find_text("PLAYER"), Some((12, 6)));
        assert_eq!(lcd.find_text("Score :"), Some((4, 8)));
        assert_eq!(console.highscores().entries()[0].name, Some(PlayerName::default()));

        press(&mut console, &mut lcd, NEXT);
        assert_eq!(console.screen(), Screen::Menu);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = GameConfig {
            tick_seconds: -1.0,
            ..GameConfig::default()
        };
        assert!(Console::new(config).is_err());
    }
}
