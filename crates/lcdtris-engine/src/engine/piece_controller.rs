use serde::Serialize;

use crate::{
    MoveBlocked,
    core::{Board, ShapeCode},
    engine::{GameConfig, InputEvent, RandomPieceGenerator, SpawnPoint},
};

/// The piece currently under player control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivePiece {
    pub shape: ShapeCode,
    pub x: i16,
    pub y: i16,
    /// Set when the last lateral input hit a wall or the stack.
    pub horizontal_blocked: bool,
}

impl ActivePiece {
    #[must_use]
    pub const fn spawn(shape: ShapeCode, at: SpawnPoint) -> Self {
        Self {
            shape,
            x: at.x,
            y: at.y,
            horizontal_blocked: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum ControllerState {
    Falling,
    Locking,
    Spawning,
    GameOver(GameOverReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    #[display("stack reached the top")]
    ReachedTop,
    #[display("piece limit reached")]
    PieceCeiling,
}

/// What a gravity tick did to the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GravityOutcome {
    /// The piece moved down one step.
    Fell,
    /// The piece locked in place and `next` spawned.
    Locked { locked: ActivePiece, next: ShapeCode },
    /// The piece locked and ended the game.
    GameOver {
        locked: ActivePiece,
        reason: GameOverReason,
    },
    /// The game had already ended; nothing moved.
    Idle,
}

#[derive(Debug, Clone, Copy)]
struct Motion {
    gravity_step: i16,
    lateral_step: i16,
    soft_drop_lookahead: i16,
    spawn: SpawnPoint,
    piece_ceiling: u32,
}

/// Moves, rotates, drops, and locks the active piece.
///
/// The controller never paints the falling piece; callers erase and repaint
/// it around each tick. It only writes to the board when a piece locks.
///
/// # States
///
/// `Falling` → (blocked below) `Locking` → `Spawning` → `Falling`, or
/// `GameOver` when the lock reached the top or the piece ceiling.
#[derive(Debug, Clone)]
pub struct PieceController {
    piece: ActivePiece,
    state: ControllerState,
    rotate_latched: bool,
    locked_pieces: u32,
    generator: RandomPieceGenerator,
    motion: Motion,
}

impl PieceController {
    #[must_use]
    pub fn new(config: &GameConfig, first: ShapeCode) -> Self {
        let motion = Motion {
            gravity_step: config.gravity_step,
            lateral_step: config.lateral_step,
            soft_drop_lookahead: config.soft_drop_lookahead,
            spawn: config.spawn,
            piece_ceiling: config.piece_ceiling,
        };
        Self {
            piece: ActivePiece::spawn(first, motion.spawn),
            state: ControllerState::Falling,
            rotate_latched: false,
            locked_pieces: 0,
            generator: RandomPieceGenerator,
            motion,
        }
    }

    #[must_use]
    pub const fn piece(&self) -> &ActivePiece {
        &self.piece
    }

    #[must_use]
    pub const fn state(&self) -> ControllerState {
        self.state
    }

    #[must_use]
    pub const fn locked_pieces(&self) -> u32 {
        self.locked_pieces
    }

    fn transition(&mut self, next: ControllerState) {
        tracing::trace!(from = ?self.state, to = ?next, "controller state");
        self.state = next;
    }

    pub fn try_move_left(&mut self, board: &Board) -> Result<(), MoveBlocked> {
        let ActivePiece { shape, x, y, .. } = self.piece;
        let blocked = board.is_blocked_left(shape, x, y);
        self.piece.horizontal_blocked = blocked;
        if blocked {
            return Err(MoveBlocked);
        }
        self.piece.x -= self.motion.lateral_step;
        Ok(())
    }

    pub fn try_move_right(&mut self, board: &Board) -> Result<(), MoveBlocked> {
        let ActivePiece { shape, x, y, .. } = self.piece;
        let blocked = board.is_blocked_right(shape, x, y);
        self.piece.horizontal_blocked = blocked;
        if blocked {
            return Err(MoveBlocked);
        }
        self.piece.x += self.motion.lateral_step;
        Ok(())
    }

    /// Rotates to the next orientation unless the new footprint would overlap.
    pub fn try_rotate(&mut self, board: &Board) -> Result<(), MoveBlocked> {
        let ActivePiece { shape, x, y, .. } = self.piece;
        if board.is_blocked_on_rotate(shape, x, y) {
            return Err(MoveBlocked);
        }
        self.piece.shape = shape.rotated();
        Ok(())
    }

    /// Moves one step down ahead of gravity.
    ///
    /// Refused when the piece is resting, or when the look-ahead position is
    /// blocked, so a soft drop never locks a piece by itself.
    pub fn try_soft_drop(&mut self, board: &Board) -> Result<(), MoveBlocked> {
        let ActivePiece { shape, x, y, .. } = self.piece;
        if board.is_blocked_below(shape, x, y)
            || board.is_blocked_below(shape, x, y + self.motion.soft_drop_lookahead)
        {
            return Err(MoveBlocked);
        }
        self.piece.y += self.motion.gravity_step;
        Ok(())
    }

    /// Applies one decoded input sample.
    ///
    /// Rotation is edge-triggered: holding the rotate button rotates once,
    /// and the latch releases as soon as a sample leaves the rotate band.
    pub fn handle_input(&mut self, board: &Board, event: InputEvent) {
        if !self.state.is_falling() {
            return;
        }
        if !event.is_rotate() {
            self.rotate_latched = false;
        }
        let result = match event {
            InputEvent::None => Ok(()),
            InputEvent::Left => self.try_move_left(board),
            InputEvent::Right => self.try_move_right(board),
            InputEvent::SoftDrop => self.try_soft_drop(board),
            InputEvent::Rotate if self.rotate_latched => Ok(()),
            InputEvent::Rotate => self.try_rotate(board).map(|()| self.rotate_latched = true),
        };
        if result.is_err() {
            tracing::trace!(?event, piece = ?self.piece, "input blocked");
        }
    }

    /// Advances the piece by one gravity step, locking it when it rests.
    ///
    /// On lock the piece is written to `board`, the top-out and piece ceiling
    /// are checked, and the next shape is drawn from `sample`. The new piece
    /// appears at the spawn point and does not fall until the next tick.
    pub fn gravity_tick(&mut self, board: &mut Board, sample: u16) -> GravityOutcome {
        if self.state.is_game_over() {
            return GravityOutcome::Idle;
        }
        let locked = self.piece;
        let ActivePiece { shape, x, y, .. } = locked;
        if !board.is_blocked_below(shape, x, y) {
            self.piece.y += self.motion.gravity_step;
            return GravityOutcome::Fell;
        }

        self.transition(ControllerState::Locking);
        board.lock_shape(shape, x, y);
        self.locked_pieces += 1;
        tracing::debug!(shape = shape.code(), x, y, count = self.locked_pieces, "piece locked");

        let reason = if board.reached_top(shape, x, y) {
            Some(GameOverReason::ReachedTop)
        } else if self.locked_pieces >= self.motion.piece_ceiling {
            Some(GameOverReason::PieceCeiling)
        } else {
            None
        };
        if let Some(reason) = reason {
            self.transition(ControllerState::GameOver(reason));
            tracing::info!(%reason, pieces = self.locked_pieces, "game over");
            return GravityOutcome::GameOver { locked, reason };
        }

        self.transition(ControllerState::Spawning);
        let next = self.generator.generate(sample);
        self.piece = ActivePiece::spawn(next, self.motion.spawn);
        self.rotate_latched = false;
        self.transition(ControllerState::Falling);
        GravityOutcome::Locked { locked, next }
    }
}
