//! Unified error types for the clabwatch workspace.
//!
//! The ingestion core never surfaces per-line errors (malformed events are
//! discarded), so this enum covers the boundary concerns only: spawning the
//! external event process and validating configuration.

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum ClabwatchError {
    /// The external event-producing process could not be spawned or driven.
    #[error("event process `{command}` failed: {source}")]
    Process {
        /// Command line that failed.
        command: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ClabwatchError>;
