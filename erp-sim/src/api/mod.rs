//! HTTP query surface for the simulator
//!
//! Consumed by the ingestion pull channel: incremental order and
//! snapshot feeds, plus subscriber registration for push delivery.

pub mod health;
pub mod inventory;
pub mod orders;
pub mod subscribe;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Result-count cap applied to every feed query
pub const MAX_FEED_LIMIT: usize = 1_000;
/// Default feed page size when the caller gives no limit
pub const DEFAULT_FEED_LIMIT: usize = 500;

/// Create the simulator router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/orders", get(orders::list_orders))
        .route("/api/inventory", get(inventory::list_snapshots))
        .route("/api/subscribers", post(subscribe::register))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Clamp a caller-supplied limit into the allowed range
pub(crate) fn clamp_limit(limit: Option<usize>) -> usize {
    limit.unwrap_or(DEFAULT_FEED_LIMIT).min(MAX_FEED_LIMIT)
}
