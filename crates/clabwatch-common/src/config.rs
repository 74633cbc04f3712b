//! Configuration model for the event stream adapter.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{ClabwatchError, Result};

/// Configuration for the external process that produces the event stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStreamConfig {
    /// Program to spawn.
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<String>,
}

impl EventStreamConfig {
    /// Builds a config from a full command line (program followed by args).
    ///
    /// Returns `None` when the command line is empty.
    #[must_use]
    pub fn from_command_line(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// Returns the command line as a single display string.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the program name is empty.
    pub fn validate(&self) -> Result<()> {
        if self.program.trim().is_empty() {
            return Err(ClabwatchError::Config {
                message: "event stream program must not be empty".into(),
            });
        }
        Ok(())
    }
}

impl Default for EventStreamConfig {
    fn default() -> Self {
        Self {
            program: constants::DEFAULT_EVENTS_PROGRAM.to_owned(),
            args: constants::DEFAULT_EVENTS_ARGS
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
        }
    }
}
