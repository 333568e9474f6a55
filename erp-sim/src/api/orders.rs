//! GET /api/orders — incremental purchase order feed

use axum::Json;
use axum::extract::{Query, State};
use shared::error::AppError;
use shared::feed::FeedParams;
use shared::models::PurchaseOrder;

use crate::state::AppState;

/// List purchase orders, optionally filtered to those created
/// (`since`) or mutated (`updated_since`) after a timestamp, bounded by
/// a result-count limit.
pub async fn list_orders(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Result<Json<Vec<PurchaseOrder>>, AppError> {
    let limit = super::clamp_limit(params.limit);
    let sim = state.sim.lock().await;
    let orders = sim.orders_since(params.since, params.updated_since, limit);

    tracing::debug!(
        since = ?params.since,
        updated_since = ?params.updated_since,
        returned = orders.len(),
        "Order feed served"
    );
    Ok(Json(orders))
}
