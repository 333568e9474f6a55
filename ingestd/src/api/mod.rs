//! HTTP surface for ingestd
//!
//! The webhook receiver (push channel) plus the structured read API the
//! gateway layer consumes.

pub mod health;
pub mod inventory;
pub mod items;
pub mod orders;
pub mod webhook;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Result-count cap for read queries
pub const MAX_READ_LIMIT: i64 = 1_000;
pub const DEFAULT_READ_LIMIT: i64 = 100;

/// Create the ingestd router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/webhook/order", post(webhook::receive_order))
        .route("/api/orders", get(orders::list_orders))
        .route("/api/orders/{id}", get(orders::get_order))
        .route("/api/inventory", get(inventory::inventory))
        .route("/api/items", get(items::list_items))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub(crate) fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_READ_LIMIT).clamp(1, MAX_READ_LIMIT)
}
