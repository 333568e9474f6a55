//! Shared domain types for the ERP simulator and the ingestion daemon
//!
//! Everything both services need to agree on lives here: the business
//! models (items, purchase orders, inventory snapshots), the feed/wire
//! payloads exchanged over HTTP, the unified error system, and small
//! time/ID utilities.

pub mod error;
pub mod feed;
pub mod models;
pub mod util;
