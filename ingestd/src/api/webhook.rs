//! POST /api/webhook/order — the push channel receiver

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use shared::error::AppError;
use shared::feed::IngestAck;
use shared::models::PurchaseOrder;

use crate::db::ingest::{self, StoreOutcome};
use crate::state::AppState;

/// Accept a single pushed purchase order and persist it.
///
/// Responds accepted for new and duplicate records alike — idempotency
/// lives in the persistence layer, not here. A persistence failure is a
/// 500; the event is then recovered by the pull channel.
pub async fn receive_order(
    State(state): State<AppState>,
    Json(order): Json<PurchaseOrder>,
) -> Result<(StatusCode, Json<IngestAck>), AppError> {
    if let Err(reason) = order.validate() {
        return Err(AppError::invalid_request(reason));
    }

    match ingest::store_order(&state.pool, &order).await {
        Ok(outcome) => {
            if outcome == StoreOutcome::Duplicate {
                tracing::debug!(
                    tenant_id = %order.tenant_id,
                    order_id = %order.order_id,
                    channel = "push",
                    "Duplicate webhook delivery ignored"
                );
            }
            Ok((
                StatusCode::ACCEPTED,
                Json(IngestAck {
                    record_id: order.order_id.clone(),
                }),
            ))
        }
        Err(e) => {
            tracing::error!(
                tenant_id = %order.tenant_id,
                order_id = %order.order_id,
                channel = "push",
                "Failed to persist webhook order: {e}"
            );
            Err(AppError::database("Failed to persist order"))
        }
    }
}
