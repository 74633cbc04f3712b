//! Event source adapter for the clabwatch engine.
//!
//! The only async crate in the workspace: spawns the external
//! event-producing process and feeds its stdout, line by line, into a
//! [`clabwatch_engine::Engine`]. Transport failures stay here — the engine
//! never sees them.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod source;

pub use source::{EventSource, pump, pump_lines};
