//! POST /api/subscribers — register a webhook callback

use axum::Json;
use axum::extract::State;
use shared::error::AppError;
use shared::feed::{SubscribeRequest, SubscribeResponse};

use crate::state::AppState;

/// Register a subscriber callback address for push delivery
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<SubscribeRequest>,
) -> Result<Json<SubscribeResponse>, AppError> {
    if !req.url.starts_with("http://") && !req.url.starts_with("https://") {
        return Err(AppError::invalid_request(format!(
            "Callback must be an http(s) URL, got {:?}",
            req.url
        )));
    }

    let subscriber_count = state.notifier.register(req.url).await;
    Ok(Json(SubscribeResponse { subscriber_count }))
}
