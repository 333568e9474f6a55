//! GET /health

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Current simulated timestamp (Unix millis)
    pub sim_now: i64,
    pub orders: usize,
    pub snapshots: usize,
    pub subscribers: usize,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (sim_now, orders, snapshots) = {
        let sim = state.sim.lock().await;
        (sim.clock_now(), sim.order_count(), sim.snapshot_count())
    };
    Json(HealthResponse {
        status: "ok",
        sim_now,
        orders,
        snapshots,
        subscribers: state.notifier.subscriber_count().await,
    })
}
