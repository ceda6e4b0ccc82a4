//! Terminal runner: an event loop that feeds ticks and key events to an [`App`].

mod app;
mod event;
mod event_loop;
mod runner;

pub use self::{app::App, runner::Tui};
