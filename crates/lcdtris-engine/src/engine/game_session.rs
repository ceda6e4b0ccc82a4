use serde::Serialize;

use crate::{
    core::{BLOCK_SIZE, Board, Rgb565},
    engine::{
        ControllerState, Display, GameConfig, GameOverReason, GravityOutcome, InputEvent, NAME_LEN,
        PieceController, PlayerName, RandomPieceGenerator, ScoreEngine, ScoreState,
    },
};

/// Width of the HUD value fields, in characters.
const HUD_VALUE_WIDTH: usize = 8;

/// What one [`GameSession::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub input: InputEvent,
    pub gravity: GravityOutcome,
    /// Lines scored this step.
    pub lines: usize,
    pub points: u32,
}

impl StepOutcome {
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.gravity.is_game_over()
    }
}

/// Final figures of a game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GameSummary {
    pub player: PlayerName,
    #[serde(flatten)]
    pub score: ScoreState,
    pub pieces: u32,
    pub game_over: Option<GameOverReason>,
}

/// One game in progress: the board, the active piece, and the running score.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    controller: PieceController,
    score: ScoreEngine,
    player: PlayerName,
}

impl GameSession {
    /// Starts a game whose first piece is drawn from `sample`.
    #[must_use]
    pub fn new(config: GameConfig, player: PlayerName, sample: u16) -> Self {
        let first = RandomPieceGenerator.generate(sample);
        let controller = PieceController::new(&config, first);
        tracing::debug!(%player, first = first.code(), "game started");
        Self {
            config,
            board: Board::new(),
            controller,
            score: ScoreEngine::new(),
            player,
        }
    }

    /// Throws the game away and starts over with the same player.
    pub fn reset(&mut self, sample: u16) {
        *self = Self::new(self.config.clone(), self.player, sample);
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub const fn controller(&self) -> &PieceController {
        &self.controller
    }

    #[must_use]
    pub const fn score(&self) -> &ScoreEngine {
        &self.score
    }

    #[must_use]
    pub const fn player(&self) -> PlayerName {
        self.player
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.controller.state().is_game_over()
    }

    #[must_use]
    pub fn summary(&self) -> GameSummary {
        let game_over = match self.controller.state() {
            ControllerState::GameOver(reason) => Some(reason),
            _ => None,
        };
        GameSummary {
            player: self.player,
            score: *self.score.state(),
            pieces: self.controller.locked_pieces(),
            game_over,
        }
    }

    /// Runs one game tick with the ADC reading `sample`.
    ///
    /// The falling piece is lifted off the board, the input is applied,
    /// gravity runs (locking and spawning as needed), full rows are cleared
    /// and scored, and the piece is painted back. Nothing is drawn; call
    /// [`flush`](Self::flush) to push the changed cells to a display.
    pub fn step(&mut self, sample: u16) -> StepOutcome {
        if self.is_over() {
            return StepOutcome {
                input: InputEvent::None,
                gravity: GravityOutcome::Idle,
                lines: 0,
                points: 0,
            };
        }

        let piece = *self.controller.piece();
        self.board.erase_shape(piece.shape, piece.x, piece.y);

        let input = self.config.bands.decode(sample);
        self.controller.handle_input(&self.board, input);
        let gravity = self.controller.gravity_tick(&mut self.board, sample);

        let rows = self.board.clear_full_rows();
        let lines = rows / usize::from(BLOCK_SIZE.unsigned_abs());
        let points = self.score.on_rows_cleared(rows);

        if gravity.is_game_over() {
            self.board.invalidate();
        } else {
            let piece = *self.controller.piece();
            let cell = piece.shape.falling_cell();
            self.board.paint_shape(piece.shape, piece.x, piece.y, cell);
        }
        self.score.tick(self.config.tick_seconds);

        StepOutcome {
            input,
            gravity,
            lines,
            points,
        }
    }

    /// Paints every board cell changed since the last flush.
    pub fn flush<D>(&mut self, display: &mut D)
    where
        D: Display,
    {
        let cells = self.board.take_dirty();
        display.paint_cells(cells.into_iter().map(|(x, y, cell)| (x, y, cell.color())));
    }

    /// Repaints the whole board.
    pub fn repaint_board<D>(&mut self, display: &mut D)
    where
        D: Display,
    {
        self.board.invalidate();
        self.flush(display);
    }

    /// Draws the static HUD labels and the player name.
    pub fn draw_hud_labels<D>(&self, display: &mut D)
    where
        D: Display,
    {
        for (label, row) in [
            ("Player:", 1),
            ("Lines:", 4),
            ("Score:", 7),
            ("Time:", 10),
            ("P/Min:", 13),
        ] {
            display.draw_text(label, 1, row, Rgb565::RED, Rgb565::BLACK);
        }
        let name = format!("{:<width$}", self.player, width = NAME_LEN);
        display.draw_text(&name, 1, 2, Rgb565::WHITE, Rgb565::BLACK);
    }

    /// Draws the current lines, score, time, and rate.
    pub fn draw_hud<D>(&self, display: &mut D)
    where
        D: Display,
    {
        let values = [
            (self.score.lines_cleared().to_string(), 5),
            (self.score.score().to_string(), 8),
            (self.score.time_text(), 11),
            (self.score.rate_text(), 14),
        ];
        for (value, row) in values {
            let text = format!("{value:<HUD_VALUE_WIDTH$}");
            display.draw_text(&text, 1, row, Rgb565::WHITE, Rgb565::BLACK);
        }
    }
}
