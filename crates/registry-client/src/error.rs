//! Client error taxonomy.
//!
//! Every failure is logged with its typed variant, while the person using the
//! client only ever sees [`GENERIC_ERROR_MESSAGE`].

use thiserror::Error;

/// Message shown for any failed request.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

/// Errors raised by the registry client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The server has no record with this id.
    #[error("record {id} not found")]
    NotFound { id: u64 },
    /// The server answered with an unexpected status.
    #[error("unexpected status {status}: {message}")]
    Status { status: u16, message: String },
    /// The request never produced a response.
    #[error("request failed: {message}")]
    Transport { message: String },
    /// The response body could not be decoded.
    #[error("invalid response body: {message}")]
    Decode { message: String },
    /// Client configuration could not be used.
    #[error("invalid client configuration: {message}")]
    InvalidConfig { message: String },
}

impl ClientError {
    /// Text to present to the user; identical for every variant.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        GENERIC_ERROR_MESSAGE
    }

    /// Whether the failure reports a missing record.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
