//! Everything above the grid: input decoding, the active piece, scoring,
//! highscores, and the console screens.
//!
//! [`Console`] is the top of the stack. It owns a [`GameSession`], which in
//! turn owns the [`Board`](crate::core::Board) and a [`PieceController`], and
//! it draws through a [`Display`].

pub use self::{
    config::*, console::*, display::*, game_session::*, highscore::*, input::*, ladder::*,
    piece_controller::*, piece_generator::*, score::*,
};

pub(crate) mod config;
pub(crate) mod console;
pub(crate) mod display;
pub(crate) mod game_session;
pub(crate) mod highscore;
pub(crate) mod input;
pub(crate) mod ladder;
pub(crate) mod piece_controller;
pub(crate) mod piece_generator;
pub(crate) mod score;
