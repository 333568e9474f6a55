//! Ingestion daemon configuration

use shared::error::AppError;

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL (required — startup is fatal without it)
    pub database_url: String,
    /// HTTP port for the webhook receiver + read API
    pub http_port: u16,
    /// Tenant whose events this daemon ingests
    pub tenant_id: String,
    /// Base URL of the simulator's query surface
    pub sim_base_url: String,
    /// Seconds between pull-channel polls
    pub poll_interval_secs: u64,
    /// Result-count bound per pull query
    pub poll_batch_limit: usize,
    /// Publicly reachable webhook callback; if set, registered with the
    /// simulator on startup (non-fatal when registration fails)
    pub callback_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| AppError::internal("DATABASE_URL must be set"))?,
            http_port: env_parse("INGEST_HTTP_PORT", 8082),
            tenant_id: std::env::var("TENANT_ID").unwrap_or_else(|_| "demo-tenant".into()),
            sim_base_url: std::env::var("SIM_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8081".into()),
            poll_interval_secs: env_parse("POLL_INTERVAL_SECS", 60),
            poll_batch_limit: env_parse("POLL_BATCH_LIMIT", 500),
            callback_url: std::env::var("CALLBACK_URL").ok().filter(|s| !s.is_empty()),
        })
    }
}
