//! GET /health

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use shared::error::AppError;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Liveness check that also verifies database reachability
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, AppError> {
    sqlx::query("SELECT 1")
        .execute(&state.pool)
        .await
        .map_err(|e| {
            tracing::error!("Health check database ping failed: {e}");
            AppError::database("Database unreachable")
        })?;
    Ok(Json(HealthResponse { status: "ok" }))
}
