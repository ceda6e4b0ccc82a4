use lcdtris_engine::{Console, GameConfig, LadderSimulator};

use crate::{command::play::app::PlayApp, tui::Tui};

mod app;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for the ladder noise; random when omitted
    #[clap(long)]
    seed: Option<u64>,
    /// Standard deviation of the ADC noise, in counts
    #[clap(long, default_value_t = LadderSimulator::DEFAULT_NOISE)]
    noise: f64,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            noise: LadderSimulator::DEFAULT_NOISE,
        }
    }
}

pub(crate) fn run(arg: &PlayArg, config: GameConfig) -> anyhow::Result<()> {
    let PlayArg { seed, noise } = arg;
    let seed = seed.unwrap_or_else(rand::random);
    tracing::info!(seed, noise, "starting emulator");

    let ladder = LadderSimulator::with_noise(config.bands, seed, *noise);
    let console = Console::new(config)?;
    let mut app = PlayApp::new(console, ladder);
    Tui::new().run(&mut app)?;

    let summary = app.last_summary();
    tracing::info!(?summary, "emulator closed");
    Ok(())
}
