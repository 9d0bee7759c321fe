//! Registry REST API port and its reqwest adapter.
//!
//! The adapter owns transport details only: URL construction, the request
//! timeout, HTTP status mapping and JSON decoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::dto::{Record, RecordPayload};
use crate::error::ClientError;

/// Remote operations on the record collection; one HTTP call each.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordsApi: Send + Sync {
    /// `GET /` — every record.
    async fn list(&self) -> Result<Vec<Record>, ClientError>;

    /// `GET /{id}` — one record.
    async fn get(&self, id: u64) -> Result<Record, ClientError>;

    /// `POST /` — create a record and return it as stored.
    async fn create(&self, payload: &RecordPayload) -> Result<Record, ClientError>;

    /// `PUT /{id}` — merge `payload` into a record and return it as stored.
    async fn update(&self, id: u64, payload: &RecordPayload) -> Result<Record, ClientError>;

    /// `DELETE /{id}`.
    async fn delete(&self, id: u64) -> Result<(), ClientError>;
}

/// [`RecordsApi`] over HTTP against one collection URL.
#[derive(Debug, Clone)]
pub struct HttpRecordsApi {
    client: Client,
    base: Url,
}

impl HttpRecordsApi {
    /// Build an adapter for `base` (e.g. `http://localhost:3001/api/records`)
    /// with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidConfig`] when `base` cannot carry path
    /// segments or the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, ClientError> {
        if base.cannot_be_a_base() {
            return Err(ClientError::invalid_config(format!(
                "{base} cannot be used as a base URL"
            )));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| ClientError::invalid_config(error.to_string()))?;
        Ok(Self { client, base })
    }

    /// Collection URL requests are issued against.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    fn record_url(&self, id: u64) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ClientError::invalid_config(format!("{} cannot be used as a base URL", self.base))
            })?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }
}

#[async_trait]
impl RecordsApi for HttpRecordsApi {
    async fn list(&self) -> Result<Vec<Record>, ClientError> {
        let response = self
            .client
            .get(self.base.clone())
            .send()
            .await
            .map_err(map_transport_error)?;
        decode(None, response).await
    }

    async fn get(&self, id: u64) -> Result<Record, ClientError> {
        let response = self
            .client
            .get(self.record_url(id)?)
            .send()
            .await
            .map_err(map_transport_error)?;
        decode(Some(id), response).await
    }

    async fn create(&self, payload: &RecordPayload) -> Result<Record, ClientError> {
        let response = self
            .client
            .post(self.base.clone())
            .json(payload)
            .send()
            .await
            .map_err(map_transport_error)?;
        decode(None, response).await
    }

    async fn update(&self, id: u64, payload: &RecordPayload) -> Result<Record, ClientError> {
        let response = self
            .client
            .put(self.record_url(id)?)
            .json(payload)
            .send()
            .await
            .map_err(map_transport_error)?;
        decode(Some(id), response).await
    }

    async fn delete(&self, id: u64) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.record_url(id)?)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        Err(map_status_error(Some(id), status, body.as_ref()))
    }
}

async fn decode<T: DeserializeOwned>(
    id: Option<u64>,
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(id, status, body.as_ref()));
    }
    serde_json::from_slice(body.as_ref()).map_err(|error| ClientError::Decode {
        message: error.to_string(),
    })
}

fn map_transport_error(error: reqwest::Error) -> ClientError {
    let message = if error.is_timeout() {
        format!("timed out: {error}")
    } else {
        error.to_string()
    };
    ClientError::Transport { message }
}

fn map_status_error(id: Option<u64>, status: StatusCode, body: &[u8]) -> ClientError {
    match (status, id) {
        (StatusCode::NOT_FOUND, Some(id)) => ClientError::NotFound { id },
        _ => ClientError::Status {
            status: status.as_u16(),
            message: body_preview(body),
        },
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
