//! Structured inventory reads for the gateway

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use shared::error::AppError;
use shared::models::InventorySnapshot;

use crate::db::queries;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InventoryParams {
    /// Point-in-time view: latest snapshot per item as of this
    /// timestamp. Omitted → current inventory.
    pub at: Option<i64>,
}

/// GET /api/inventory
pub async fn inventory(
    State(state): State<AppState>,
    Query(params): Query<InventoryParams>,
) -> Result<Json<Vec<InventorySnapshot>>, AppError> {
    let snapshots = queries::inventory(&state.pool, &state.tenant_id, params.at)
        .await
        .map_err(|e| {
            tracing::error!(tenant_id = %state.tenant_id, "Failed to read inventory: {e}");
            AppError::database("Failed to read inventory")
        })?;
    Ok(Json(snapshots))
}
