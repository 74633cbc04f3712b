//! CLI command definitions and dispatch.

pub mod replay;
pub mod watch;

use clap::{Parser, Subcommand};

/// clabwatch — live containerlab event ingestion and lab state view.
#[derive(Parser, Debug)]
#[command(name = "clabwatch", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Attach to a live event stream and track lab state until EOF or Ctrl-C.
    Watch(watch::WatchArgs),
    /// Ingest a saved event-line file and print the resulting state.
    Replay(replay::ReplayArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Watch(args) => watch::execute(args),
        Command::Replay(args) => replay::execute(args),
    }
}
