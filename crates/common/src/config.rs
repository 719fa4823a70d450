//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config. LLM settings live with the
//! LLM crate and are loaded separately.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

const DEFAULT_DATABASE_URL: &str = "sqlite://parley.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite connection URL
    pub database_url: String,
    pub database_max_connections: u32,

    /// Insert sample data into an empty store at startup
    pub seed_database: bool,

    /// Runtime configuration
    pub rust_log: String,
    pub log_format: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let database_max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw.parse().map_err(|_| {
                anyhow::anyhow!("DATABASE_MAX_CONNECTIONS must be a positive integer, got {raw:?}")
            })?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };
        if database_max_connections == 0 {
            anyhow::bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
        }

        let config = Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            database_max_connections,

            seed_database: env::var("SEED_DATABASE")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),

            rust_log: env::var("RUST_LOG")
                .unwrap_or_else(|_| "parley=debug,tower_http=info".to_string()),
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .unwrap_or(DEFAULT_PORT),
        };

        Ok(config)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
