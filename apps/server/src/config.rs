use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;
use rust_decimal::Decimal;

#[derive(Debug)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub static_dir: String,
    /// Delay between a loan application being submitted and evaluated.
    pub loan_evaluation_delay: Duration,
    pub price_update_interval: Duration,
    /// Pause after a failed price update cycle.
    pub price_update_backoff: Duration,
    pub large_transaction_threshold: Decimal,
    pub seed_demo_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30_000),
            static_dir: "dist".to_string(),
            loan_evaluation_delay: Duration::from_secs(60),
            price_update_interval: Duration::from_secs(30),
            price_update_backoff: Duration::from_secs(60),
            large_transaction_threshold: Decimal::ONE_THOUSAND,
            seed_demo_data: true,
        }
    }
}

fn env_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: {}", key, raw)),
        None => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from `FH_*` keys resolved by `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let cors_allow = lookup("FH_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = env_or(
            &lookup,
            "FH_REQUEST_TIMEOUT_MS",
            defaults.request_timeout.as_millis() as u64,
        )?;
        let price_interval_secs: u64 = env_or(
            &lookup,
            "FH_PRICE_UPDATE_INTERVAL_SECS",
            defaults.price_update_interval.as_secs(),
        )?;
        if price_interval_secs == 0 {
            anyhow::bail!("FH_PRICE_UPDATE_INTERVAL_SECS must be greater than zero");
        }
        if timeout_ms == 0 {
            anyhow::bail!("FH_REQUEST_TIMEOUT_MS must be greater than zero");
        }
        Ok(Self {
            listen_addr: env_or(&lookup, "FH_LISTEN_ADDR", defaults.listen_addr)?,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            static_dir: lookup("FH_STATIC_DIR").unwrap_or(defaults.static_dir),
            loan_evaluation_delay: Duration::from_secs(env_or(
                &lookup,
                "FH_LOAN_EVALUATION_DELAY_SECS",
                defaults.loan_evaluation_delay.as_secs(),
            )?),
            price_update_interval: Duration::from_secs(price_interval_secs),
            price_update_backoff: Duration::from_secs(env_or(
                &lookup,
                "FH_PRICE_UPDATE_BACKOFF_SECS",
                defaults.price_update_backoff.as_secs(),
            )?),
            large_transaction_threshold: env_or(
                &lookup,
                "FH_LARGE_TRANSACTION_THRESHOLD",
                defaults.large_transaction_threshold,
            )?,
            seed_demo_data: env_or(&lookup, "FH_SEED_DEMO_DATA", defaults.seed_demo_data)?,
        })
    }
}
