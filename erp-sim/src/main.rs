//! erp-sim — simulated ERP service
//!
//! Long-running service that:
//! - Backfills a deterministic history of orders and inventory readouts
//! - Advances a virtual clock on a recurring wall-clock timer
//! - Pushes new purchase orders to registered webhook subscribers
//! - Serves the incremental feeds the ingestion pull channel consumes

use erp_sim::{AppState, Config, api, worker};
use tokio_util::sync::CancellationToken;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "erp_sim=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env();
    tracing::info!(tenant_id = %config.tenant_id, "Starting erp-sim");

    // Build state: catalog load + bootstrap backfill (no webhooks)
    let state = AppState::initialize(&config)?;

    // Live tick worker
    let shutdown = CancellationToken::new();
    let tick_handle = tokio::spawn(worker::run_tick_loop(
        state.clone(),
        config.tick_secs,
        shutdown.clone(),
    ));

    // HTTP query surface
    let app = api::create_router(state);
    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("erp-sim listening on {addr}");

    let server_shutdown = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
            server_shutdown.cancel();
        })
        .await?;

    shutdown.cancel();
    tick_handle.await?;
    tracing::info!("erp-sim stopped");

    Ok(())
}
