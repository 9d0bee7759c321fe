//! Client data layer: one API call per user action, mirrored into the cache.
//!
//! Failures are logged with their typed error at `warn` and returned to the
//! caller, which shows [`ClientError::user_message`]. Nothing is retried.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use thiserror::Error;
use tracing::{debug, warn};

use crate::api::{HttpRecordsApi, RecordsApi};
use crate::cache::RecordCache;
use crate::config::ClientSettings;
use crate::dto::{Record, RecordPayload};
use crate::error::ClientError;
use crate::form::{FormErrors, FormMode, RecordForm};
use crate::geo::GeoCatalogue;

/// Why a form submission did not produce a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Client-side validation rejected the form; nothing was sent.
    #[error("form is invalid: {0}")]
    Invalid(FormErrors),
    /// The request failed.
    #[error(transparent)]
    Request(#[from] ClientError),
}

impl SubmitError {
    /// Text to present to the user.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        crate::error::GENERIC_ERROR_MESSAGE
    }
}

/// Registry access with a bounded local cache.
pub struct RecordsClient {
    api: Arc<dyn RecordsApi>,
    cache: RecordCache,
    clock: Arc<dyn Clock>,
}

impl RecordsClient {
    #[must_use]
    pub fn new(api: Arc<dyn RecordsApi>, cache: RecordCache, clock: Arc<dyn Clock>) -> Self {
        Self { api, cache, clock }
    }

    /// Build an HTTP-backed client from settings.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidConfig`] when the base URL is unusable.
    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientError> {
        let api = HttpRecordsApi::new(settings.base_url()?, settings.timeout())?;
        Ok(Self::new(
            Arc::new(api),
            RecordCache::new(settings.cache_capacity()),
            Arc::new(DefaultClock),
        ))
    }

    #[must_use]
    pub const fn cache(&self) -> &RecordCache {
        &self.cache
    }

    /// Load the full listing into the cache.
    ///
    /// # Errors
    ///
    /// Propagates the API failure; the cache is left untouched.
    pub async fn refresh(&mut self) -> Result<&[Record], ClientError> {
        let records = self.api.list().await.inspect_err(|error| {
            warn!(%error, "listing records failed");
        })?;
        debug!(count = records.len(), "record listing refreshed");
        self.cache.replace_all(records, self.clock.utc());
        Ok(self.cache.records())
    }

    /// Fetch one record for editing. The cache is not consulted.
    ///
    /// # Errors
    ///
    /// Propagates the API failure, including [`ClientError::NotFound`].
    pub async fn fetch(&self, id: u64) -> Result<Record, ClientError> {
        self.api.get(id).await.inspect_err(|error| {
            warn!(%error, id, "fetching record failed");
        })
    }

    /// Create a record and cache the server's copy.
    ///
    /// # Errors
    ///
    /// Propagates the API failure.
    pub async fn create(&mut self, payload: &RecordPayload) -> Result<Record, ClientError> {
        let record = self.api.create(payload).await.inspect_err(|error| {
            warn!(%error, "creating record failed");
        })?;
        self.cache.upsert(record.clone(), self.clock.utc());
        Ok(record)
    }

    /// Update a record and cache the server's copy.
    ///
    /// # Errors
    ///
    /// Propagates the API failure.
    pub async fn update(&mut self, id: u64, payload: &RecordPayload) -> Result<Record, ClientError> {
        let record = self.api.update(id, payload).await.inspect_err(|error| {
            warn!(%error, id, "updating record failed");
        })?;
        self.cache.upsert(record.clone(), self.clock.utc());
        Ok(record)
    }

    /// Delete a record and drop it from the cache.
    ///
    /// # Errors
    ///
    /// Propagates the API failure; the cache keeps the record.
    pub async fn delete(&mut self, id: u64) -> Result<(), ClientError> {
        self.api.delete(id).await.inspect_err(|error| {
            warn!(%error, id, "deleting record failed");
        })?;
        self.cache.remove(id, self.clock.utc());
        Ok(())
    }

    /// Validate `form` and send it as a create or update according to its
    /// mode.
    ///
    /// # Errors
    ///
    /// [`SubmitError::Invalid`] when validation fails (no request is made),
    /// otherwise [`SubmitError::Request`] for API failures.
    pub async fn submit(
        &mut self,
        form: &RecordForm,
        geo: &GeoCatalogue,
    ) -> Result<Record, SubmitError> {
        let payload = form.to_payload(geo).map_err(|errors| {
            debug!(%errors, "form rejected before submission");
            SubmitError::Invalid(errors)
        })?;
        let record = match form.mode {
            FormMode::Create => self.create(&payload).await?,
            FormMode::Edit { id } => self.update(id, &payload).await?,
        };
        Ok(record)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
