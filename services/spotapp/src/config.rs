//! Server configuration loaded from `SPOTAPP_*` environment variables

use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

/// Log line layout
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Full,
    Compact,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind (default: 0.0.0.0)
    pub host: String,
    /// Port to bind (default: 8000)
    pub port: u16,
    /// Log filter used when `RUST_LOG` is unset (default: info)
    pub log_level: String,
    /// Log layout (default: full)
    pub log_format: LogFormat,
    /// Apply embedded migrations on startup (default: true)
    pub run_migrations: bool,
}

impl ServerConfig {
    /// Load the configuration
    ///
    /// # Environment Variables
    /// - `SPOTAPP_HOST`, `SPOTAPP_PORT`
    /// - `SPOTAPP_LOG_LEVEL`, `SPOTAPP_LOG_FORMAT` (`full` or `compact`)
    /// - `SPOTAPP_RUN_MIGRATIONS`
    pub fn from_env() -> Result<Self> {
        let config = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8000)?
            .set_default("log_level", "info")?
            .set_default("log_format", "full")?
            .set_default("run_migrations", true)?
            .add_source(Environment::with_prefix("SPOTAPP").try_parsing(true))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Socket address to listen on
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }

    /// Filter for the tracing subscriber; `RUST_LOG` wins when set
    pub fn env_filter(&self) -> Result<EnvFilter> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => Ok(EnvFilter::try_new(&self.log_level)?),
        }
    }
}
