//! Application state for ingestd

use sqlx::PgPool;

use crate::config::Config;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// Tenant this daemon ingests for
    pub tenant_id: String,
    /// HTTP client for the pull channel and registration
    pub http: reqwest::Client,
}

impl AppState {
    /// Connect to the database and run embedded migrations.
    ///
    /// Failure here is fatal by design: without durable storage the
    /// daemon must refuse to start.
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database connected, migrations applied");

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            pool,
            tenant_id: config.tenant_id.clone(),
            http,
        })
    }
}
