//! Spawning and tailing the external event-producing process.

use std::process::Stdio;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStdout, Command};

use clabwatch_common::config::EventStreamConfig;
use clabwatch_common::error::{ClabwatchError, Result};
use clabwatch_engine::Engine;

/// Handle to the spawned event process.
///
/// The process's stdout is the line-oriented event stream; stderr is
/// inherited so operational noise from the tool stays visible. Teardown is
/// idempotent: `shutdown` may be called multiple times or after the stream
/// has already ended.
#[derive(Debug)]
pub struct EventSource {
    child: Option<Child>,
    command_line: String,
}

impl EventSource {
    /// Spawns the configured event command with piped stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the process
    /// cannot be spawned.
    pub fn spawn(config: &EventStreamConfig) -> Result<Self> {
        config.validate()?;
        let command_line = config.command_line();
        let child = Command::new(&config.program)
            .args(&config.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ClabwatchError::Process {
                command: command_line.clone(),
                source,
            })?;
        tracing::info!(command = %command_line, "event source spawned");
        Ok(Self {
            child: Some(child),
            command_line,
        })
    }

    /// Takes the stdout handle for pumping.
    ///
    /// Returns `None` after the handle has already been taken or the
    /// source has been shut down.
    pub fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.child.as_mut().and_then(|child| child.stdout.take())
    }

    /// Stops the event process and releases its handle.
    ///
    /// Safe to call repeatedly and after the process has already exited;
    /// transport errors during teardown are logged, never propagated.
    pub async fn shutdown(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(err) = child.kill().await {
                tracing::debug!(command = %self.command_line, %err, "event process already gone");
            }
            let _ = child.wait().await;
            tracing::info!(command = %self.command_line, "event source stopped");
        }
    }
}

/// Pumps lines from a buffered reader into the engine, one at a time.
///
/// Each line is fully processed (classify → reduce → notify) before the
/// next one is read, preserving the engine's consistency contract. Returns
/// when the stream ends; read errors terminate the pump and are logged
/// rather than propagated, since reconnection policy belongs to the
/// caller.
pub async fn pump_lines<R: AsyncBufRead + Unpin>(reader: R, engine: &mut Engine) {
    let mut lines = reader.lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => engine.ingest_line(&line),
            Ok(None) => {
                tracing::info!("event stream ended");
                return;
            }
            Err(err) => {
                tracing::warn!(%err, "event stream read error");
                return;
            }
        }
    }
}

/// Pumps a spawned event source's stdout into the engine until EOF.
///
/// A source whose stdout was already taken pumps nothing.
pub async fn pump(source: &mut EventSource, engine: &mut Engine) {
    if let Some(stdout) = source.take_stdout() {
        pump_lines(BufReader::new(stdout), engine).await;
    }
}
