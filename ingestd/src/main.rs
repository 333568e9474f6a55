//! ingestd — ERP extraction/ingestion daemon
//!
//! Long-running service that:
//! - Receives pushed purchase orders on a webhook endpoint
//! - Polls the simulator's feeds with per-stream watermarks
//! - Persists every logical event exactly once (raw log + structured
//!   row, one transaction, deduplicated by derived identifier)
//! - Serves structured reads to the gateway layer

use ingestd::{AppState, Config, api, poller};
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
                .unwrap_or_else(|_| "ingestd=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(tenant_id = %config.tenant_id, "Starting ingestd");

    // Fatal when the database is unreachable: refuse to start
    let state = AppState::new(&config).await?;

    // Best-effort push registration; polling alone is sufficient
    if let Some(callback) = &config.callback_url {
        poller::register_callback(&state, &config.sim_base_url, callback).await;
    } else {
        tracing::info!("No CALLBACK_URL configured; running on the pull channel only");
    }

    // Pull-channel worker
    let shutdown = CancellationToken::new();
    let worker = poller::PollWorker::new(state.clone(), &config, shutdown.clone());
    let poll_handle = tokio::spawn(worker.run());

    // Webhook receiver + read API
    let app = api::create_router(state.clone());
    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("ingestd listening on {addr}");

    let server_shutdown = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
            server_shutdown.cancel();
        })
        .await?;

    // Let in-flight persistence finish before releasing the pool
    shutdown.cancel();
    poll_handle.await?;
    state.pool.close().await;
    tracing::info!("ingestd stopped");

    Ok(())
}
