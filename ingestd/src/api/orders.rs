//! Structured purchase order reads for the gateway

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use shared::error::AppError;
use shared::models::PurchaseOrder;

use crate::db::queries;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub since: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/orders
pub async fn list_orders(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<PurchaseOrder>>, AppError> {
    let limit = super::clamp_limit(params.limit);
    let orders = queries::list_orders(&state.pool, &state.tenant_id, params.since, limit)
        .await
        .map_err(|e| {
            tracing::error!(tenant_id = %state.tenant_id, "Failed to list orders: {e}");
            AppError::database("Failed to list orders")
        })?;
    Ok(Json(orders))
}

/// GET /api/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<PurchaseOrder>, AppError> {
    let order = queries::get_order(&state.pool, &state.tenant_id, &order_id)
        .await
        .map_err(|e| {
            tracing::error!(
                tenant_id = %state.tenant_id,
                order_id = %order_id,
                "Failed to fetch order: {e}"
            );
            AppError::database("Failed to fetch order")
        })?;

    order
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("order {order_id}")))
}
