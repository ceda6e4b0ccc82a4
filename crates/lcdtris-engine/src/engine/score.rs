use serde::{Deserialize, Serialize};

use crate::core::BLOCK_SIZE;

/// Points for clearing 0..=4 lines at once.
const SCORE_TABLE: [u32; 5] = [0, 100, 200, 300, 800];

/// Rates at or above this are shown as `99999.9`.
const RATE_DISPLAY_CAP: f32 = 100_000.0;

/// Points awarded for clearing `lines` lines at once; anything beyond four
/// scores nothing.
#[must_use]
pub const fn points_for_lines(lines: usize) -> u32 {
    if lines < SCORE_TABLE.len() {
        SCORE_TABLE[lines]
    } else {
        0
    }
}

/// Inverse of [`points_for_lines`]; unknown point values map to zero lines.
#[must_use]
pub const fn lines_for_points(points: u32) -> usize {
    match points {
        100 => 1,
        200 => 2,
        300 => 3,
        800 => 4,
        _ => 0,
    }
}

/// Snapshot of the running score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u32,
    pub lines_cleared: u32,
    pub elapsed_seconds: f32,
    /// Points per minute.
    pub rate: f32,
}

/// Score, cleared lines, play time, and points-per-minute.
///
/// # Example
///
/// ```
/// use lcdtris_engine::ScoreEngine;
///
/// let mut score = ScoreEngine::new();
/// assert_eq!(score.on_lines_cleared(4), 800);
/// score.tick(30.0);
/// assert_eq!(score.state().rate, 1600.0);
/// assert_eq!(score.rate_text(), "1600.0");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScoreEngine {
    state: ScoreState,
}

impl ScoreEngine {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ScoreState {
                score: 0,
                lines_cleared: 0,
                elapsed_seconds: 0.0,
                rate: 0.0,
            },
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ScoreState {
        &self.state
    }

    #[must_use]
    pub const fn score(&self) -> u32 {
        self.state.score
    }

    #[must_use]
    pub const fn lines_cleared(&self) -> u32 {
        self.state.lines_cleared
    }

    pub fn reset(&mut self) {
        self.state = ScoreState::default();
    }

    /// Adds the points for `lines` simultaneous lines and returns them.
    pub fn on_lines_cleared(&mut self, lines: usize) -> u32 {
        let points = points_for_lines(lines);
        self.state.score += points;
        self.state.lines_cleared += u32::try_from(lines_for_points(points)).unwrap_or_default();
        points
    }

    /// Scores a clear measured in grid rows (six per line).
    pub fn on_rows_cleared(&mut self, rows: usize) -> u32 {
        self.on_lines_cleared(rows / usize::from(BLOCK_SIZE.unsigned_abs()))
    }

    /// Advances the play clock and recomputes the rate.
    #[expect(clippy::cast_precision_loss)]
    pub fn tick(&mut self, dt_seconds: f32) {
        self.state.elapsed_seconds += dt_seconds;
        let minutes = self.state.elapsed_seconds / 60.0;
        self.state.rate = if minutes > 0.0 {
            self.state.score as f32 / minutes
        } else {
            0.0
        };
    }

    /// Whole seconds played, truncated.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn time_text(&self) -> String {
        (self.state.elapsed_seconds as u32).to_string()
    }

    #[must_use]
    pub fn rate_text(&self) -> String {
        format_rate(self.state.rate)
    }
}

/// Formats a rate with one truncated decimal, capped at `99999.9`.
#[must_use]
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_rate(rate: f32) -> String {
    if rate.is_nan() || rate < 0.0 {
        return "0.0".to_owned();
    }
    if rate >= RATE_DISPLAY_CAP {
        return "99999.9".to_owned();
    }
    let whole = rate as u32;
    let tenths = ((rate * 10.0) as u32).saturating_sub(whole * 10).min(9);
    format!("{whole}.{tenths}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_table() {
        assert_eq!(points_for_lines(0), 0);
        assert_eq!(points_for_lines(1), 100);
        assert_eq!(points_for_lines(2), 200);
        assert_eq!(points_for_lines(3), 300);
        assert_eq!(points_for_lines(4), 800);
        assert_eq!(points_for_lines(5), 0);
    }

    #[test]
    fn test_lines_for_points() {
        for lines in 0..=4 {
            assert_eq!(lines_for_points(points_for_lines(lines)), lines);
        }
        assert_eq!(lines_for_points(150), 0);
    }

    #[test]
    fn test_four_lines_is_a_bonus() {
        let mut score = ScoreEngine::new();
        assert_eq!(score.on_lines_cleared(4), 800);
        assert_eq!(score.score(), 800);
        assert_eq!(score.lines_cleared(), 4);
    }

    #[test]
    fn test_rows_are_counted_in_blocks() {
        let mut score = ScoreEngine::new();
        assert_eq!(score.on_rows_cleared(6), 100);
        assert_eq!(score.on_rows_cleared(12), 200);
        assert_eq!(score.on_rows_cleared(5), 0);
        assert_eq!(score.on_rows_cleared(30), 0);
        assert_eq!(score.lines_cleared(), 3);
    }

    #[test]
    fn test_rate_is_zero_before_time_passes() {
        let mut score = ScoreEngine::new();
        score.on_lines_cleared(1);
        score.tick(0.0);
        assert_eq!(score.state().rate, 0.0);
        score.tick(0.8);
        assert!((score.state().rate - 7500.0).abs() < 1.0);
    }

    #[test]
    fn test_time_text_truncates() {
        let mut score = ScoreEngine::new();
        for _ in 0..3 {
            score.tick(0.8);
        }
        assert_eq!(score.time_text(), "2");
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(0.0), "0.0");
        assert_eq!(format_rate(0.56), "0.5");
        assert_eq!(format_rate(12.34), "12.3");
        assert_eq!(format_rate(999.99), "999.9");
        assert_eq!(format_rate(12_345.0), "12345.0");
        assert_eq!(format_rate(100_000.0), "99999.9");
        assert_eq!(format_rate(f32::NAN), "0.0");
    }

    #[test]
    fn test_reset() {
        let mut score = ScoreEngine::new();
        score.on_lines_cleared(2);
        score.tick(1.0);
        score.reset();
        assert_eq!(*score.state(), ScoreState::default());
    }
}
