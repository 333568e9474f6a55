//! Live tick worker
//!
//! A recurring wall-clock timer advances the virtual clock by one step
//! per firing and fans newly created orders out to subscribers. The
//! bootstrap backfill has already run by the time this starts, so every
//! step here is live and webhook delivery is enabled.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub async fn run_tick_loop(state: AppState, tick_secs: u64, shutdown: CancellationToken) {
    tracing::info!(tick_secs, "Simulation tick worker started");

    let mut interval = tokio::time::interval(Duration::from_secs(tick_secs));
    interval.tick().await; // skip immediate tick

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                tracing::info!("Simulation tick worker shutting down");
                break;
            }

            _ = interval.tick() => {
                let output = {
                    let mut sim = state.sim.lock().await;
                    sim.step()
                };
                tracing::info!(
                    sim_now = output.now,
                    new_orders = output.new_orders.len(),
                    status_changes = output.status_changes.len(),
                    snapshots = output.snapshots,
                    "Simulation step complete"
                );

                // Fire-and-forget; the tick never waits on subscribers
                state.notifier.dispatch(&output.new_orders).await;
            }
        }
    }

    tracing::info!("Simulation tick worker stopped");
}
