//! Server configuration
//!
//! Layered: built-in defaults, then an optional `cardswap.toml` in the
//! working directory, then `CARDSWAP_*` environment variables.

use crate::storage::PoolSettings;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind_address: String,
    /// SQLite file, or `:memory:` for a throwaway database.
    pub database_path: String,
    pub static_dir: PathBuf,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_env(config::Environment::with_prefix("CARDSWAP"))
    }

    fn from_env(env: config::Environment) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("bind_address", "0.0.0.0:8000")?
            .set_default("database_path", "./cardswap.db")?
            .set_default("static_dir", "static")?
            .set_default("max_connections", 5_i64)?
            .set_default("acquire_timeout_secs", 15_i64)?
            .add_source(config::File::with_name("cardswap").required(false))
            .add_source(env.try_parsing(true))
            .build()
            .context("Failed to read configuration sources")?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.max_connections,
            acquire_timeout: Duration::from_secs(self.acquire_timeout_secs),
        }
    }
}
