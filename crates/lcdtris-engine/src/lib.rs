//! Board-state engine for a 128×128 LCD Tetris console driven by a single
//! resistor-ladder analog input.
//!
//! The crate is split in two layers:
//!
//! - [`core`] - the playfield grid, shape geometry, and collision probes
//! - [`engine`] - input decoding, piece control, scoring, highscores, and the
//!   console screens that tie everything to a [`Display`]

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("shape code {code} is out of range (0..=18)")]
pub struct InvalidShapeCode {
    pub code: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece movement blocked")]
pub struct MoveBlocked;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlayerNameError {
    #[display("player name is longer than 7 characters")]
    TooLong,
    #[display("player name contains unsupported character {_0:?}")]
    UnsupportedChar(#[error(not(source))] char),
    #[display("player name must not start with a blank")]
    Blank,
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("{name} must be one block (6 cells), got {value}")]
    InvalidStep {
        name: &'static str,
        value: i16,
    },
    #[display("soft drop look-ahead must be 6, 12, 18 or 24 cells, got {_0}")]
    InvalidLookahead(#[error(not(source))] i16),
    #[display("tick length must be a positive number of seconds, got {_0}")]
    InvalidTick(#[error(not(source))] f32),
    #[display("spawn column {_0} is outside the playfield")]
    InvalidSpawn(#[error(not(source))] i16),
    #[display("input band {name} is empty ({low}..{high})")]
    EmptyBand {
        name: &'static str,
        low: u16,
        high: u16,
    },
    #[display("input band any_button must end below 4095 to leave an idle level, got {_0}")]
    NoIdleLevel(#[error(not(source))] u16),
}
