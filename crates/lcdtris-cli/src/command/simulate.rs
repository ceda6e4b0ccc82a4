use std::io::{self, Write as _};

use lcdtris_engine::{
    AnalogInput as _, Button, Framebuffer, GameConfig, GameSession, GameSummary, HighscoreTable,
    LadderSimulator, PlayerName,
};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of game ticks to run
    #[clap(long, default_value_t = 10_000)]
    steps: u64,
    /// Seed for the button script and the ladder noise
    #[clap(long, default_value_t = 0)]
    seed: u64,
    /// Chance that a button is held on any given tick, in 0..=1
    #[clap(long, default_value_t = 0.3, value_parser = parse_probability)]
    press_probability: f64,
    /// Player name recorded in the highscore table
    #[clap(long, default_value = "SIM")]
    player: String,
}

fn parse_probability(s: &str) -> Result<f64, String> {
    let p: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(format!("{p} is not a probability between 0 and 1"))
    }
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    seed: u64,
    steps: u64,
    /// Finished games, then the unfinished one.
    games: Vec<GameSummary>,
    highscores: HighscoreTable,
    /// Cells sent to the display over the whole run.
    pixel_writes: usize,
}

pub(crate) fn run(arg: &SimulateArg, config: GameConfig) -> anyhow::Result<()> {
    let SimulateArg {
        steps,
        seed,
        press_probability,
        player,
    } = arg;
    let player = PlayerName::new(player)?;

    let mut script = Pcg32::seed_from_u64(*seed);
    let mut ladder = LadderSimulator::new(config.bands, seed.wrapping_add(1));
    let mut highscores = HighscoreTable::new(config.highscore_policy);
    let mut lcd = Framebuffer::new();
    let mut session = GameSession::new(config, player, ladder.read());
    let mut games = vec![];

    for _ in 0..*steps {
        if script.random_bool(*press_probability) {
            let button = Button::ALL[script.random_range(0..Button::ALL.len())];
            ladder.press(button);
        } else {
            ladder.release();
        }
        let outcome = session.step(ladder.read());
        session.flush(&mut lcd);
        if outcome.is_game_over() {
            let summary = session.summary();
            highscores.record(player, summary.score.score);
            tracing::info!(
                score = summary.score.score,
                lines = summary.score.lines_cleared,
                pieces = summary.pieces,
                "game finished"
            );
            games.push(summary);
            ladder.release();
            session.reset(ladder.read());
        }
    }
    games.push(session.summary());

    let report = SimulationReport {
        seed: *seed,
        steps: *steps,
        games,
        highscores,
        pixel_writes: lcd.pixel_writes(),
    };
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &report)?;
    writeln!(stdout)?;
    Ok(())
}
