use std::{fs::File, io, path::Path, sync::Mutex};

use anyhow::Context as _;
use tracing::Level;
use tracing_subscriber::{filter::LevelFilter, prelude::*};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn filter(self) -> LevelFilter {
        let level = match self {
            Self::Off => return LevelFilter::OFF,
            Self::Error => Level::ERROR,
            Self::Warn => Level::WARN,
            Self::Info => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        };
        LevelFilter::from_level(level)
    }
}

/// Where log lines go.
#[derive(Debug, Clone, Copy)]
pub(crate) enum LogSink<'a> {
    File(&'a Path),
    Stderr,
    /// Nothing is written; used while the terminal UI owns the screen.
    Discard,
}

/// Installs the global `tracing` subscriber.
pub(crate) fn init(level: LogLevel, sink: LogSink<'_>) -> anyhow::Result<()> {
    let filter = level.filter();
    match sink {
        LogSink::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .with(filter)
                .try_init()?;
        }
        LogSink::Stderr => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(io::stderr),
                )
                .with(filter)
                .try_init()?;
        }
        LogSink::Discard => return Ok(()),
    }
    tracing::info!(%filter, "logging initialized");
    Ok(())
}
