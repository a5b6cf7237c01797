//! CLI command implementations for Gridreign.

pub(crate) mod play;

mod command;
mod output;

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Output format for the `play` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable board and messages.
    Text,
    /// One JSON object per line.
    Json,
}

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    /// Terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The config could not be loaded.
    #[error(transparent)]
    Config(#[from] gridreign::ConfigError),
    /// The game could not be set up.
    #[error("cannot start game: {0}")]
    Setup(#[from] gridreign::SetupError),
    /// JSON output failed.
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins over the verbosity flag when set.
pub(crate) fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "gridreign=debug",
        _ => "gridreign=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
