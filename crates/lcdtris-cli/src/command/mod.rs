use std::{fs, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use lcdtris_engine::{GameConfig, HighscorePolicy};

use crate::logging::{self, LogLevel, LogSink};

use self::{play::PlayArg, simulate::SimulateArg};

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[clap(flatten)]
    global: GlobalArg,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play on an emulated LCD in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Run games headless with random button presses and print a JSON report
    Simulate(#[clap(flatten)] SimulateArg),
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GlobalArg {
    /// Log verbosity
    #[clap(long, global = true, value_enum, default_value_t = LogLevel::default())]
    log_level: LogLevel,
    /// Write logs to this file instead of stderr
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    /// Game settings in JSON; missing fields keep their defaults
    #[clap(long, global = true)]
    config: Option<PathBuf>,
    /// Length of one game tick in seconds
    #[clap(long, global = true)]
    tick_seconds: Option<f32>,
    /// Number of locked pieces that ends a game
    #[clap(long, global = true)]
    piece_ceiling: Option<u32>,
    /// How a new score enters the highscore table
    #[clap(long, global = true, value_enum)]
    highscore_policy: Option<PolicyArg>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum PolicyArg {
    Overwrite,
    Shift,
}

impl From<PolicyArg> for HighscorePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Overwrite => Self::Overwrite,
            PolicyArg::Shift => Self::Shift,
        }
    }
}

impl GlobalArg {
    /// Loads the config file, if any, and applies the command-line overrides.
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                serde_json::from_str(&json)
                    .with_context(|| format!("failed to parse config {}", path.display()))?
            }
            None => GameConfig::default(),
        };
        if let Some(tick_seconds) = self.tick_seconds {
            config.tick_seconds = tick_seconds;
        }
        if let Some(piece_ceiling) = self.piece_ceiling {
            config.piece_ceiling = piece_ceiling;
        }
        if let Some(policy) = self.highscore_policy {
            config.highscore_policy = policy.into();
        }
        config.validate()?;
        Ok(config)
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let mode = args.mode.unwrap_or(Mode::Play(PlayArg::default()));

    let sink = match (&args.global.log_file, &mode) {
        (Some(path), _) => LogSink::File(path),
        (None, Mode::Play(_)) => LogSink::Discard,
        (None, Mode::Simulate(_)) => LogSink::Stderr,
    };
    logging::init(args.global.log_level, sink)?;

    let config = args.global.game_config()?;
    tracing::debug!(?config, "loaded game config");

    match mode {
        Mode::Play(arg) => play::run(&arg, config)?,
        Mode::Simulate(arg) => simulate::run(&arg, config)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    fn parse(args: &[&str]) -> CommandArgs {
        CommandArgs::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_play() {
        let args = parse(&["lcdtris"]);
        assert!(args.mode.is_none());
        assert_eq!(args.global.log_level, LogLevel::Warn);
        assert_eq!(args.global.game_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn test_overrides_follow_subcommand() {
        let args = parse(&[
            "lcdtris",
            "simulate",
            "--steps",
            "5",
            "--tick-seconds",
            "0.5",
            "--highscore-policy",
            "shift",
        ]);
        assert!(matches!(args.mode, Some(Mode::Simulate(_))));
        let config = args.global.game_config().unwrap();
        assert_eq!(config.tick_seconds, 0.5);
        assert_eq!(config.highscore_policy, HighscorePolicy::Shift);
    }

    #[test]
    fn test_non_finite_press_probability_is_rejected() {
        for value in ["NaN", "inf", "2"] {
            let parsed =
                CommandArgs::try_parse_from(["lcdtris", "simulate", "--press-probability", value]);
            assert!(parsed.is_err(), "{value}");
        }
        let args = parse(&["lcdtris", "simulate", "--press-probability", "0.5"]);
        assert!(matches!(args.mode, Some(Mode::Simulate(_))));
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let args = parse(&["lcdtris", "--tick-seconds", "0"]);
        assert!(args.global.game_config().is_err());
    }

    #[test]
    fn test_config_file_is_merged() {
        let path = std::env::temp_dir().join(format!("lcdtris-config-{}.json", std::process::id()));
        fs::write(&path, r#"{ "piece_ceiling": 50, "tick_seconds": 0.25 }"#).unwrap();
        let path_arg = path.to_str().unwrap();
        let args = parse(&["lcdtris", "--config", path_arg, "--tick-seconds", "0.4"]);
        let config = args.global.game_config().unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.piece_ceiling, 50);
        assert_eq!(config.tick_seconds, 0.4);
    }
}
