//! GET /api/items — distinct tenant items observed in ingested data

use axum::Json;
use axum::extract::State;
use shared::error::AppError;
use shared::feed::ItemSummary;

use crate::db::queries;
use crate::state::AppState;

pub async fn list_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<ItemSummary>>, AppError> {
    let items = queries::list_items(&state.pool, &state.tenant_id)
        .await
        .map_err(|e| {
            tracing::error!(tenant_id = %state.tenant_id, "Failed to list items: {e}");
            AppError::database("Failed to list items")
        })?;
    Ok(Json(items))
}
