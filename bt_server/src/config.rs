//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use blackjack_table::table::TableConfig;
use std::net::SocketAddr;

/// Bind address used when neither `SERVER_BIND` nor `PORT` is set
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Table actor sizing
    pub table: TableConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if `SERVER_BIND` or `PORT` is set but unparsable
    pub fn from_env(bind_override: Option<SocketAddr>) -> Result<Self, ConfigError> {
        let bind = match bind_override {
            Some(bind) => bind,
            None => resolve_bind(
                std::env::var("SERVER_BIND").ok(),
                std::env::var("PORT").ok(),
            )?,
        };

        let defaults = TableConfig::default();
        let table = TableConfig {
            inbox_capacity: parse_env_or("TABLE_INBOX_CAPACITY", defaults.inbox_capacity),
            participant_buffer: parse_env_or("PARTICIPANT_BUFFER", defaults.participant_buffer),
        };

        Ok(ServerConfig { bind, table })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table.inbox_capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "TABLE_INBOX_CAPACITY".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.table.participant_buffer == 0 {
            return Err(ConfigError::Invalid {
                var: "PARTICIPANT_BUFFER".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// `SERVER_BIND` wins over `PORT`; with neither, the default address is used.
fn resolve_bind(
    server_bind: Option<String>,
    port: Option<String>,
) -> Result<SocketAddr, ConfigError> {
    if let Some(bind) = server_bind {
        return bind.parse().map_err(|_| ConfigError::Invalid {
            var: "SERVER_BIND".to_string(),
            reason: format!("'{bind}' is not an IP:PORT address"),
        });
    }

    let addr = match port {
        Some(port) => format!("0.0.0.0:{port}"),
        None => DEFAULT_BIND.to_string(),
    };
    addr.parse().map_err(|_| ConfigError::Invalid {
        var: "PORT".to_string(),
        reason: format!("'{addr}' is not a valid port"),
    })
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
