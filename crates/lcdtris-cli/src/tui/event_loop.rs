use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// What the loop should do at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Due {
    Tick,
    Render,
    /// Wait for terminal input, at most this long (forever when `None`).
    Input(Option<Duration>),
}

/// Schedules console ticks and frame redraws around terminal input.
///
/// The tick period follows the console screen (game ticks while playing,
/// a short poll period in menus). Changing it restarts the period so the
/// first tick of a game is a full tick long. Redraws only happen after
/// something changed and at most once per frame interval.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    frame_interval: Duration,
    last_tick: Instant,
    last_render: Option<Instant>,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl EventLoop {
    fn new(now: Instant) -> Self {
        Self {
            tick_interval: None,
            frame_interval: Duration::ZERO,
            last_tick: now,
            last_render: None,
            dirty: true,
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Duration) {
        self.retime_ticks(interval, Instant::now());
    }

    fn retime_ticks(&mut self, interval: Duration, now: Instant) {
        if self.tick_interval != Some(interval) {
            self.tick_interval = Some(interval);
            self.last_tick = now;
        }
    }

    /// Caps redraws at `rate` frames per second. Non-positive rates lift
    /// the cap.
    pub(super) fn set_frame_rate(&mut self, rate: f64) {
        self.frame_interval = if rate > 0.0 {
            Duration::try_from_secs_f64(rate.recip()).unwrap_or(Duration::ZERO)
        } else {
            Duration::ZERO
        };
    }

    fn next_render_at(&self) -> Option<Instant> {
        if !self.dirty {
            return None;
        }
        Some(match self.last_render {
            Some(last) => last + self.frame_interval,
            None => self.last_tick,
        })
    }

    fn due(&mut self, now: Instant) -> Due {
        let next_tick = self.tick_interval.map(|interval| self.last_tick + interval);
        if next_tick.is_some_and(|at| at <= now) {
            self.last_tick = now;
            self.dirty = true;
            return Due::Tick;
        }

        let next_render = self.next_render_at();
        if next_render.is_some_and(|at| at <= now) {
            self.last_render = Some(now);
            self.dirty = false;
            return Due::Render;
        }

        let deadline = [next_tick, next_render].into_iter().flatten().min();
        Due::Input(deadline.map(|at| at.saturating_duration_since(now)))
    }

    /// Blocks until the next tick, redraw, or terminal event.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let timeout = match self.due(Instant::now()) {
                Due::Tick => return Ok(TuiEvent::Tick),
                Due::Render => return Ok(TuiEvent::Render),
                Due::Input(timeout) => timeout,
            };
            if let Some(timeout) = timeout
                && !event::poll(timeout)?
            {
                continue;
            }
            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }
}
