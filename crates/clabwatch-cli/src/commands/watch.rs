//! `clabwatch watch` — attach to a live event stream.

use clap::Args;
use tokio::io::BufReader;

use clabwatch_common::config::EventStreamConfig;
use clabwatch_engine::Engine;
use clabwatch_stream::{EventSource, pump_lines};

use crate::output;

/// Arguments for the `watch` command.
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Command line producing the event stream (program followed by args).
    #[arg(long = "command", num_args = 1.., allow_hyphen_values = true, value_name = "ARGV")]
    pub command: Option<Vec<String>>,
}

/// Executes the `watch` command.
///
/// Spawns the event source, prints container state transitions as they
/// happen, and renders the final lab table when the stream ends or the
/// user interrupts.
///
/// # Errors
///
/// Returns an error if the event source cannot be spawned.
pub fn execute(args: WatchArgs) -> anyhow::Result<()> {
    let config = args
        .command
        .as_deref()
        .and_then(EventStreamConfig::from_command_line)
        .unwrap_or_default();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(config))
}

async fn run(config: EventStreamConfig) -> anyhow::Result<()> {
    let mut engine = Engine::new();
    let _transitions = engine.on_container_state_changed(Box::new(|actor_id, state| {
        println!("{actor_id:<16} -> {state}");
    }));

    let mut source = EventSource::spawn(&config)?;
    let stdout = source.take_stdout();

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted, shutting down");
        }
        () = async {
            if let Some(out) = stdout {
                pump_lines(BufReader::new(out), &mut engine).await;
            }
        } => {}
    }
    source.shutdown().await;

    let labs = engine.grouped_containers();
    output::print_lab_table(&labs);
    output::print_interface_table(&engine, &labs);
    Ok(())
}
