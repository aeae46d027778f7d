use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// Worker configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub nats_url: String,
    pub input_subject: String,
    pub queue_group: String,
    pub sql_subject: String,
    pub output_subject: String,
    pub request_timeout: Duration,
    pub max_concurrent_requests: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", "5")
                .context("DB_MAX_CONNECTIONS must be a valid number")?,
            nats_url: env::var("NATS_URL")
                .unwrap_or_else(|_| "nats://localhost:4222".to_string()),
            input_subject: env::var("INPUT_SUBJECT")
                .unwrap_or_else(|_| "data-platform.event-cancels".to_string()),
            queue_group: env::var("QUEUE_GROUP").unwrap_or_else(|_| "event-cancels".to_string()),
            sql_subject: env::var("SQL_SUBJECT")
                .unwrap_or_else(|_| "data-platform.sql-update".to_string()),
            output_subject: env::var("OUTPUT_SUBJECT")
                .unwrap_or_else(|_| "data-platform.event-cancels.output".to_string()),
            request_timeout: Duration::from_secs(
                parse_var("REQUEST_TIMEOUT_SECS", "30")
                    .context("REQUEST_TIMEOUT_SECS must be a valid number")?,
            ),
            max_concurrent_requests: parse_var("MAX_CONCURRENT_REQUESTS", "16")
                .context("MAX_CONCURRENT_REQUESTS must be a valid number")?,
        })
    }
}

fn parse_var<T>(name: &str, default: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    parse_value(&raw)
}

fn parse_value<T>(raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("invalid value {:?}", raw))
}
