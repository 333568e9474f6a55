//! Shared application state for the simulator service

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::catalog;
use crate::config::Config;
use crate::notify::Notifier;
use crate::sim::Simulator;
use shared::error::AppError;
use shared::util::{days_to_millis, now_millis};

/// Shared state: the simulator behind one lock (all mutation happens in
/// a tick or an inbound handler and is serialized here) plus the
/// subscriber registry.
#[derive(Clone)]
pub struct AppState {
    pub sim: Arc<Mutex<Simulator>>,
    pub notifier: Notifier,
}

impl AppState {
    /// Load the catalog, build the simulator, and run the bootstrap
    /// backfill from the configured historical start to now. No
    /// webhooks are delivered for backfilled steps.
    pub fn initialize(config: &Config) -> Result<Self, AppError> {
        let items = catalog::load_items(config.items_path.as_deref())?;
        tracing::info!(items = items.len(), tenant_id = %config.tenant_id, "Item catalog loaded");

        let now = now_millis();
        let start = now - days_to_millis(config.backfill_days as f64);
        let mut sim = Simulator::new(config, items, start);

        let steps = sim.bootstrap(now);
        tracing::info!(
            steps,
            orders = sim.order_count(),
            snapshots = sim.snapshot_count(),
            "Bootstrap backfill complete"
        );

        Ok(Self {
            sim: Arc::new(Mutex::new(sim)),
            notifier: Notifier::new()?,
        })
    }
}
