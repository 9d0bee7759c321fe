//! Client settings loaded via OrthoConfig.
//!
//! Values layer as defaults, then a configuration file, then
//! `REGISTRY_CLIENT_*` environment variables, then command-line flags.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::cache::DEFAULT_CACHE_CAPACITY;
use crate::error::ClientError;

const DEFAULT_BASE_URL: &str = "http://localhost:3001/api/records";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where and how the client reaches the registry.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REGISTRY_CLIENT")]
pub struct ClientSettings {
    /// Records collection URL.
    #[ortho_config(default = String::from(DEFAULT_BASE_URL))]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[ortho_config(default = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
    /// Maximum number of cached records.
    #[ortho_config(default = DEFAULT_CACHE_CAPACITY)]
    pub cache_capacity: usize,
}

impl ClientSettings {
    /// Parsed collection URL, defaulting to the local development server.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidConfig`] when the URL does not parse.
    pub fn base_url(&self) -> Result<Url, ClientError> {
        let raw = self.base_url.as_str();
        Url::parse(raw)
            .map_err(|error| ClientError::invalid_config(format!("base_url {raw:?}: {error}")))
    }

    /// Request timeout; zero is raised to one second.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    #[must_use]
    pub const fn cache_capacity(&self) -> usize {
        self.cache_capacity
    }
}
