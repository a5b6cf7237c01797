//! Gridreign CLI - play a territorial strategy game from the terminal.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Gridreign - a turn-based grid strategy game
#[derive(Parser, Debug)]
#[command(name = "gridreign")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a game, reading commands from stdin
    Play {
        /// TOML config file (default: built-in 6x6 four-faction game)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Grid side length, overriding the config
        #[arg(long)]
        size: Option<u16>,

        /// Number of factions (2-4), overriding the config
        #[arg(long)]
        factions: Option<usize>,

        /// Combat seed, overriding the config (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Print the default config as TOML
    Config,
}

fn main() -> ExitCode {
    let args = Args::parse();
    cli::init_logging(args.verbose);

    let result = match args.command {
        Commands::Play {
            config,
            size,
            factions,
            seed,
            format,
        } => cli::play::execute(config, size, factions, seed, format),

        Commands::Config => cli::play::print_default_config(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
