//! ingestd — dual-channel extraction and ingestion daemon
//!
//! Receives the simulator's business events through a webhook push
//! channel and a watermark-based polling pull channel, and persists each
//! logical event exactly once: an append-only raw log row plus a
//! structured row, written in one transaction and deduplicated by a
//! stable identifier derived from the payload. Exposes the structured
//! read API the downstream gateway consumes.

pub mod api;
pub mod config;
pub mod db;
pub mod poller;
pub mod state;

pub use config::Config;
pub use state::AppState;
