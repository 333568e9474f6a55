//! GET /api/inventory — incremental inventory snapshot feed

use axum::Json;
use axum::extract::{Query, State};
use shared::error::AppError;
use shared::feed::FeedParams;
use shared::models::InventorySnapshot;

use crate::state::AppState;

/// List inventory snapshots, optionally filtered to those taken after a
/// timestamp, bounded by a result-count limit.
pub async fn list_snapshots(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Result<Json<Vec<InventorySnapshot>>, AppError> {
    let limit = super::clamp_limit(params.limit);
    let sim = state.sim.lock().await;
    let snapshots = sim.snapshots_since(params.since, limit);

    tracing::debug!(
        since = ?params.since,
        returned = snapshots.len(),
        "Snapshot feed served"
    );
    Ok(Json(snapshots))
}
