//! Database layer
//!
//! `ingest` is the single idempotent write path both delivery channels
//! feed; `queries` is the structured read access exposed to the gateway.

pub mod ingest;
pub mod queries;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;
