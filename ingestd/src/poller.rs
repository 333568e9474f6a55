//! Pull channel: the polling worker
//!
//! A recurring timer (independent of the simulator's tick cadence)
//! issues two "since watermark" queries — purchase orders and inventory
//! snapshots — and feeds every returned record through the idempotent
//! persistence path. The watermark only advances after a batch has been
//! fully processed, so a crash mid-batch re-fetches the same window:
//! at-least-once delivery on top of exactly-once persistence.

use std::time::Duration;

use serde::de::DeserializeOwned;
use shared::error::AppError;
use shared::feed::SubscribeRequest;
use shared::models::{InventorySnapshot, PurchaseOrder};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::db::ingest;
use crate::state::AppState;

/// Compute the next watermark for a processed batch.
///
/// Advances to the newest timestamp seen, but only when every record in
/// the batch persisted; any failure keeps the old watermark so the
/// window is re-fetched on the next poll and nothing is permanently
/// skipped. An empty batch leaves the watermark unchanged.
pub fn advance_watermark(current: i64, batch_max: Option<i64>, failures: usize) -> i64 {
    if failures > 0 {
        return current;
    }
    match batch_max {
        Some(max) => current.max(max),
        None => current,
    }
}

/// Drop the trailing run of records sharing the batch's maximum
/// timestamp when the batch came back full.
///
/// Records sharing one timestamp form a group (every snapshot in a
/// simulation step carries the same `as_of`, every order mutated in a
/// step the same `updated_at`). The feeds sort ascending by timestamp,
/// so a full batch may have been cut mid-group; advancing the watermark
/// past a split group would make the exclusive `since` filter skip the
/// cut-off remainder forever. Dropping the trailing group re-fetches it
/// whole on the next poll. A group at least as large as the limit
/// cannot be dropped without stalling the stream, so it is kept and
/// logged; `POLL_BATCH_LIMIT` must exceed the per-step record count.
pub fn drop_incomplete_group<T>(batch: &mut Vec<T>, limit: usize, ts: impl Fn(&T) -> i64) {
    if batch.len() < limit {
        return;
    }
    let Some(last) = batch.last() else {
        return;
    };
    let max = ts(last);
    if ts(&batch[0]) == max {
        tracing::warn!(
            limit,
            timestamp = max,
            "Poll batch is a single timestamp group at the fetch limit; \
             records beyond the limit may be missed, raise POLL_BATCH_LIMIT"
        );
        return;
    }
    batch.retain(|r| ts(r) != max);
}

pub struct PollWorker {
    state: AppState,
    sim_base_url: String,
    interval_secs: u64,
    batch_limit: usize,
    shutdown: CancellationToken,
}

impl PollWorker {
    pub fn new(state: AppState, config: &Config, shutdown: CancellationToken) -> Self {
        Self {
            state,
            sim_base_url: config.sim_base_url.trim_end_matches('/').to_string(),
            interval_secs: config.poll_interval_secs,
            batch_limit: config.poll_batch_limit,
            shutdown,
        }
    }

    /// Run the poll loop until cancelled.
    ///
    /// Watermarks are per-stream and in-memory: a restart re-fetches
    /// from zero, which idempotent persistence makes safe.
    pub async fn run(self) {
        tracing::info!(
            sim = %self.sim_base_url,
            interval_secs = self.interval_secs,
            "Poll worker started"
        );

        let mut order_watermark: i64 = 0;
        let mut snapshot_watermark: i64 = 0;
        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Poll worker shutting down");
                    break;
                }

                _ = interval.tick() => {
                    order_watermark = self.poll_orders(order_watermark).await;
                    snapshot_watermark = self.poll_snapshots(snapshot_watermark).await;
                }
            }
        }

        tracing::info!("Poll worker stopped");
    }

    async fn poll_orders(&self, watermark: i64) -> i64 {
        let url = format!(
            "{}/api/orders?updated_since={}&limit={}",
            self.sim_base_url, watermark, self.batch_limit
        );
        let mut batch: Vec<PurchaseOrder> = match self.fetch(&url).await {
            Ok(batch) => batch,
            Err(e) => {
                tracing::warn!(channel = "pull", "Order poll failed, watermark unchanged: {e}");
                return watermark;
            }
        };
        drop_incomplete_group(&mut batch, self.batch_limit, |o| o.updated_at);

        let total = batch.len();
        let mut stored = 0;
        let mut failures = 0;
        let mut batch_max: Option<i64> = None;

        for order in &batch {
            match ingest::store_order(&self.state.pool, order).await {
                Ok(outcome) => {
                    if outcome == ingest::StoreOutcome::Inserted {
                        stored += 1;
                    }
                    batch_max = Some(batch_max.map_or(order.updated_at, |m| m.max(order.updated_at)));
                }
                Err(e) => {
                    failures += 1;
                    tracing::error!(
                        tenant_id = %order.tenant_id,
                        order_id = %order.order_id,
                        channel = "pull",
                        "Failed to persist order: {e}"
                    );
                }
            }
        }

        if total > 0 {
            tracing::info!(total, stored, failures, "Order poll batch processed");
        }
        advance_watermark(watermark, batch_max, failures)
    }

    async fn poll_snapshots(&self, watermark: i64) -> i64 {
        let url = format!(
            "{}/api/inventory?since={}&limit={}",
            self.sim_base_url, watermark, self.batch_limit
        );
        let mut batch: Vec<InventorySnapshot> = match self.fetch(&url).await {
            Ok(batch) => batch,
            Err(e) => {
                tracing::warn!(channel = "pull", "Snapshot poll failed, watermark unchanged: {e}");
                return watermark;
            }
        };
        drop_incomplete_group(&mut batch, self.batch_limit, |s| s.as_of);

        let total = batch.len();
        let mut stored = 0;
        let mut failures = 0;
        let mut batch_max: Option<i64> = None;

        for snapshot in &batch {
            match ingest::store_snapshot(&self.state.pool, snapshot).await {
                Ok(outcome) => {
                    if outcome == ingest::StoreOutcome::Inserted {
                        stored += 1;
                    }
                    batch_max = Some(batch_max.map_or(snapshot.as_of, |m| m.max(snapshot.as_of)));
                }
                Err(e) => {
                    failures += 1;
                    tracing::error!(
                        tenant_id = %snapshot.tenant_id,
                        item_id = %snapshot.item_id,
                        as_of = snapshot.as_of,
                        channel = "pull",
                        "Failed to persist snapshot: {e}"
                    );
                }
            }
        }

        if total > 0 {
            tracing::info!(total, stored, failures, "Snapshot poll batch processed");
        }
        advance_watermark(watermark, batch_max, failures)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, AppError> {
        let resp = self
            .state
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::upstream(e.to_string()))?
            .error_for_status()
            .map_err(|e| AppError::upstream(e.to_string()))?;
        resp.json()
            .await
            .map_err(|e| AppError::upstream(e.to_string()))
    }
}

/// Register our webhook callback with the simulator.
///
/// Non-fatal: the polling channel alone is sufficient for correctness,
/// registration only improves freshness.
pub async fn register_callback(state: &AppState, sim_base_url: &str, callback_url: &str) {
    let url = format!("{}/api/subscribers", sim_base_url.trim_end_matches('/'));
    let req = SubscribeRequest {
        url: callback_url.to_string(),
    };
    match state.http.post(&url).json(&req).send().await {
        Ok(resp) if resp.status().is_success() => {
            tracing::info!(callback = %callback_url, "Webhook callback registered with simulator");
        }
        Ok(resp) => {
            tracing::warn!(
                callback = %callback_url,
                status = %resp.status(),
                "Simulator rejected callback registration; relying on polling only"
            );
        }
        Err(e) => {
            tracing::warn!(
                callback = %callback_url,
                "Callback registration failed; relying on polling only: {e}"
            );
        }
    }
}
