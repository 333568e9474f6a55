//! erp-sim — simulated ERP source of truth
//!
//! Owns a virtual clock that advances faster than real time, evolves a
//! deterministic inventory state, creates purchase orders under a
//! replenishment policy, ages orders through their status lifecycle, and
//! emits periodic inventory readouts. Exposes the generated event
//! streams through an HTTP query surface and pushes new orders to
//! registered webhook subscribers.

pub mod api;
pub mod catalog;
pub mod config;
pub mod notify;
pub mod sim;
pub mod state;
pub mod worker;

pub use config::{Config, PolicyConfig};
pub use state::AppState;
