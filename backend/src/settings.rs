//! Server settings loaded via OrthoConfig.
//!
//! Values layer as defaults, then a configuration file, then `REGISTRY_*`
//! environment variables, then command-line flags.

use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::outbound::memory::{IdStrategy, ParseIdStrategyError};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;

/// Errors raised when settings values cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// `host` is not an IP address.
    #[error("invalid host {host:?}: {message}")]
    InvalidHost { host: String, message: String },
    /// `id_strategy` names no known strategy.
    #[error(transparent)]
    IdStrategy(#[from] ParseIdStrategyError),
}

/// Configuration values for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REGISTRY")]
pub struct ServerSettings {
    /// Interface to bind.
    #[ortho_config(default = String::from(DEFAULT_HOST))]
    pub host: String,
    /// Port to bind.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// Comma-separated CORS origins; empty or unset allows any origin.
    pub allowed_origins: Option<String>,
    /// `monotonic` (default) or `max-plus-one`.
    pub id_strategy: Option<String>,
}

impl ServerSettings {
    /// Resolve host and port into a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host.as_str();
        let ip: IpAddr = host.parse().map_err(|err: std::net::AddrParseError| {
            SettingsError::InvalidHost {
                host: host.to_owned(),
                message: err.to_string(),
            }
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Allowed CORS origins; an empty list means any origin.
    pub fn allowed_origins(&self) -> Vec<String> {
        self.allowed_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty() && *origin != "*")
            .map(str::to_owned)
            .collect()
    }

    /// Parsed id allocation strategy.
    pub fn id_strategy(&self) -> Result<IdStrategy, SettingsError> {
        match self.id_strategy.as_deref() {
            None => Ok(IdStrategy::default()),
            Some(raw) => Ok(raw.parse()?),
        }
    }
}
