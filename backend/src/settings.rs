//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `EWASTE_*` environment variables and an
//! optional configuration file, in that order of precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Listen address used when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Database pool size used when none is configured.
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Settings controlling storage, binding and startup seeding.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EWASTE")]
pub struct AppSettings {
    /// PostgreSQL URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Maximum pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Seed the administrator and default vendors on startup.
    #[ortho_config(default = true)]
    pub seed_defaults: bool,
}

/// Rejected setting value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid bind address {value}: {reason}")]
pub struct BindAddrError {
    value: String,
    reason: String,
}

impl AppSettings {
    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Parsed listen address, falling back to [`DEFAULT_BIND_ADDR`].
    pub fn bind_addr(&self) -> Result<SocketAddr, BindAddrError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim().parse().map_err(|err: std::net::AddrParseError| BindAddrError {
            value: raw.to_owned(),
            reason: err.to_string(),
        })
    }

    /// Pool size, falling back to [`DEFAULT_DB_MAX_CONNECTIONS`].
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }
}
