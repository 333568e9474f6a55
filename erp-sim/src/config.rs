//! Simulator configuration

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Simulator configuration, loaded from environment variables.
///
/// Every knob has a default so the simulator runs out of the box.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP port for the query surface
    pub http_port: u16,
    /// Tenant this simulator instance generates data for
    pub tenant_id: String,
    /// Simulated days advanced per step (the "simulated week")
    pub step_days: f64,
    /// Wall-clock seconds between live ticks
    pub tick_secs: u64,
    /// Historical backfill window: bootstrap starts this many days ago
    pub backfill_days: i64,
    /// Optional JSON item catalog path; built-in defaults otherwise
    pub items_path: Option<String>,
    /// Optional RNG seed for reproducible runs
    pub seed: Option<u64>,
    /// Replenishment policy knobs
    pub policy: PolicyConfig,
}

/// Replenishment policy configuration
#[derive(Debug, Clone)]
pub struct PolicyConfig {
    /// Minimum days-of-cover before an emergency order fires
    pub safety_stock_days: f64,
    /// Target cover = safety_stock_days × this multiplier
    pub target_cover_mult: f64,
    /// Simulated days between order creation and `executed`
    pub execute_lag_days: f64,
    /// Delivery lag range, simulated days
    pub delivery_lag_min_days: f64,
    pub delivery_lag_max_days: f64,
    /// Regular purchase cadence range, simulated days
    pub cadence_min_days: f64,
    pub cadence_max_days: f64,
    /// Currency stamped on generated orders
    pub currency: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            http_port: env_parse("SIM_HTTP_PORT", 8081),
            tenant_id: std::env::var("TENANT_ID").unwrap_or_else(|_| "demo-tenant".into()),
            step_days: env_parse("SIM_STEP_DAYS", 7.0),
            tick_secs: env_parse("SIM_TICK_SECS", 30),
            backfill_days: env_parse("SIM_BACKFILL_DAYS", 180),
            items_path: std::env::var("ITEMS_PATH").ok().filter(|s| !s.is_empty()),
            seed: std::env::var("SIM_SEED").ok().and_then(|v| v.parse().ok()),
            policy: PolicyConfig {
                safety_stock_days: env_parse("SAFETY_STOCK_DAYS", 45.0),
                target_cover_mult: env_parse("TARGET_COVER_MULT", 1.5),
                execute_lag_days: env_parse("EXECUTE_LAG_DAYS", 2.0),
                delivery_lag_min_days: env_parse("DELIVERY_LAG_MIN_DAYS", 3.0),
                delivery_lag_max_days: env_parse("DELIVERY_LAG_MAX_DAYS", 10.0),
                cadence_min_days: env_parse("CADENCE_MIN_DAYS", 20.0),
                cadence_max_days: env_parse("CADENCE_MAX_DAYS", 45.0),
                currency: std::env::var("CURRENCY").unwrap_or_else(|_| "EUR".into()),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 0,
            tenant_id: "demo-tenant".into(),
            step_days: 7.0,
            tick_secs: 30,
            backfill_days: 180,
            items_path: None,
            seed: Some(42),
            policy: PolicyConfig::default(),
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            safety_stock_days: 45.0,
            target_cover_mult: 1.5,
            execute_lag_days: 2.0,
            delivery_lag_min_days: 3.0,
            delivery_lag_max_days: 10.0,
            cadence_min_days: 20.0,
            cadence_max_days: 45.0,
            currency: "EUR".into(),
        }
    }
}
