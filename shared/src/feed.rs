//! Feed protocol types
//!
//! Payloads exchanged between the simulator's query surface, the webhook
//! push channel, and the ingestion daemon's pull loop.

use serde::{Deserialize, Serialize};

/// Query parameters for the simulator's incremental feeds
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedParams {
    /// Only records created (orders) / taken (snapshots) after this
    /// timestamp (Unix millis, exclusive)
    pub since: Option<i64>,
    /// Orders only: records mutated after this timestamp (exclusive).
    /// Used by the pull channel so status changes are re-observed.
    pub updated_since: Option<i64>,
    /// Result-count bound; capped server-side
    pub limit: Option<usize>,
}

/// Subscriber registration request for push delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeRequest {
    /// Callback address to POST new purchase orders to
    pub url: String,
}

/// Subscriber registration response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeResponse {
    /// Number of registered subscribers after this call
    pub subscriber_count: usize,
}

/// Acknowledgement returned by the ingestion webhook receiver.
///
/// Returned for new and duplicate deliveries alike — idempotency is
/// enforced at the persistence layer, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestAck {
    /// Derived dedup identifier of the accepted record
    pub record_id: String,
}

/// Distinct item observed in the ingested data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSummary {
    pub item_id: String,
    pub item_name: String,
    pub unit: String,
}
