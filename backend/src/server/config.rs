//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::outbound::memory::IdStrategy;
use crate::settings::{ServerSettings, SettingsError};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) allowed_origins: Vec<String>,
    pub(crate) id_strategy: IdStrategy,
    pub(crate) clock: Arc<dyn Clock>,
}

impl ServerConfig {
    /// Configuration binding `bind_addr`, allowing any origin, with the
    /// default id strategy and the system clock.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            allowed_origins: Vec::new(),
            id_strategy: IdStrategy::default(),
            clock: Arc::new(DefaultClock),
        }
    }

    /// Build the configuration from loaded settings.
    pub fn from_settings(settings: &ServerSettings) -> Result<Self, SettingsError> {
        Ok(Self::new(settings.bind_addr()?)
            .with_allowed_origins(settings.allowed_origins())
            .with_id_strategy(settings.id_strategy()?))
    }

    /// Restrict CORS to the given origins. An empty list allows any origin.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }

    /// Choose how the record store allocates ids.
    #[must_use]
    pub fn with_id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.id_strategy = strategy;
        self
    }

    /// Replace the clock used to stamp record dates.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
