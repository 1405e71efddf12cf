//! Tactica CLI - Command-line interface for playing and simulating Tactica games.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Tactica - A turn-based tactical combat game on a square grid
#[derive(Parser, Debug)]
#[command(name = "tactica")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Write log events to this file instead of stderr
    #[arg(long, global = true)]
    log: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play interactively in the terminal
    Play {
        #[command(flatten)]
        game: cli::GameArgs,

        /// Save file (default: tactica-save.json)
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Print a saved game
    Show {
        /// Save file (default: tactica-save.json)
        #[arg(long)]
        save: Option<PathBuf>,

        /// Output format: text, summary, or json
        #[arg(short, long, default_value = "text")]
        format: cli::ShowFormat,

        /// Color units by health
        #[arg(long)]
        color: bool,
    },

    /// Run headless self-play games and aggregate statistics
    Simulate {
        #[command(flatten)]
        game: cli::GameArgs,

        /// Number of games to run (default: 100)
        #[arg(short, long, default_value = "100")]
        games: u64,

        /// Player turns per game before giving up (default: 500)
        #[arg(short = 't', long, default_value = "500")]
        max_turns: u32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::SimulateFormat,

        /// List every game
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    // The TUI owns the terminal, so it only logs when given a file.
    let logging = match (&args.command, args.log.as_deref()) {
        (Commands::Play { .. }, None) => Ok(()),
        (_, log) => cli::init_logging(log),
    };

    let result = logging.and_then(|()| match args.command {
        Commands::Play { game, save } => {
            cli::play::execute(game, save.unwrap_or_else(cli::default_save_path))
        }

        Commands::Show {
            save,
            format,
            color,
        } => cli::show::execute(save.unwrap_or_else(cli::default_save_path), format, color),

        Commands::Simulate {
            game,
            games,
            max_turns,
            format,
            verbose,
        } => cli::simulate::execute(game, games, max_turns, format, verbose),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
