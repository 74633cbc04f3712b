//! # clabwatch — containerlab event watcher
//!
//! Tails a containerlab/Docker event stream and maintains a live,
//! queryable view of labs, containers, and interfaces.

mod commands;
mod output;

use clap::Parser;

use crate::commands::Cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
        )
        .init();

    let cli = Cli::parse();
    commands::execute(cli)
}
