//! Event ingestion and in-memory lab state derivation.
//!
//! Tails a containerlab/Docker event stream (one JSON object per line),
//! incrementally reconstructs per-lab, per-container, and per-interface
//! state, and notifies subscribers of changes. The [`engine::Engine`]
//! facade is the single public entry point; the stream adapter and tests
//! both feed it through [`engine::Engine::ingest_line`].

#![cfg_attr(
    test,
    allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)
)]

pub mod engine;
pub mod event;
pub mod hub;
pub mod model;
pub mod reducer;
pub mod store;

pub use engine::Engine;
