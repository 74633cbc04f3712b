//! `clabwatch replay` — ingest a saved event-line file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use clabwatch_engine::Engine;

use crate::output;

/// Arguments for the `replay` command.
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// File of newline-delimited JSON events to replay.
    pub file: PathBuf,

    /// Print the resulting state as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `replay` command.
///
/// Feeds every line of the file through the same ingestion path the live
/// watcher uses, then prints the resulting grouped state.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the snapshot cannot be
/// serialized.
pub fn execute(args: ReplayArgs) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading event file {}", args.file.display()))?;

    let mut engine = Engine::new();
    for line in content.lines() {
        engine.ingest_line(line);
    }

    let labs = engine.grouped_containers();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&labs)?);
    } else {
        output::print_lab_table(&labs);
        output::print_interface_table(&engine, &labs);
    }
    Ok(())
}
