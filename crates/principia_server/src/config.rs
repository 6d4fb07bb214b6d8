//! Server configuration loaded from environment variables.
//!
//! Invalid values keep the default and are reported through `warnings`,
//! which `main` logs once logging is up.

use crate::error::{ServerError, ServerResult};
use principia_core::{default_log_level, DatabaseConfig};
use std::env;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_SIZE: usize = 4;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub bind_address: String,
    /// Port to listen on
    pub port: u16,
    pub database: DatabaseConfig,
    /// Connections opened for file databases
    pub pool_size: usize,
    pub log_level: String,
    /// Absolute directory for rolling log files; stderr when unset
    pub log_dir: Option<String>,
    /// Ignored values found while loading
    pub warnings: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: DatabaseConfig::default(),
            pool_size: DEFAULT_POOL_SIZE,
            log_level: default_log_level().to_string(),
            log_dir: None,
            warnings: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    pub fn load() -> ServerResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ServerResult<Self> {
        let mut config = Self::default();

        if let Some(host) = lookup("SERVER_HOST") {
            config.bind_address = host;
        }

        if let Some(port) = lookup("SERVER_PORT") {
            match port.trim().parse::<u16>() {
                Ok(port) => config.port = port,
                Err(_) => config.warnings.push(format!("invalid SERVER_PORT value: {port}")),
            }
        }

        let deploy_marker = lookup("VERCEL");
        let url = lookup("DATABASE_URL").unwrap_or(config.database.url);
        config.database = DatabaseConfig::new(url, deploy_marker.as_deref());

        if let Some(raw) = lookup("DATABASE_REQUIRE_TLS") {
            match parse_flag(&raw) {
                Some(flag) => config.database.require_tls = flag,
                None => config
                    .warnings
                    .push(format!("invalid DATABASE_REQUIRE_TLS value: {raw}")),
            }
        }

        if let Some(size) = lookup("DATABASE_POOL_SIZE") {
            match size.trim().parse::<usize>() {
                Ok(size) if size > 0 => config.pool_size = size,
                _ => config
                    .warnings
                    .push(format!("invalid DATABASE_POOL_SIZE value: {size}")),
            }
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            config.log_level = level;
        }

        config.log_dir = lookup("LOG_DIR").filter(|dir| !dir.trim().is_empty());

        config
            .database
            .target()
            .map_err(|err| ServerError::Config(err.to_string()))?;

        Ok(config)
    }

    /// `host:port` string for the listener.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
