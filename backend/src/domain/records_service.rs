//! Record CRUD service.
//!
//! Implements the [`RecordsQuery`] and [`RecordsCommand`] driving ports over
//! any [`RecordRepository`]. The service owns date stamping; identifier
//! allocation belongs to the repository adapter.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{RecordRepository, RecordRepositoryError, RecordsCommand, RecordsQuery};
use crate::domain::{Error, Record, RecordDraft, RecordFields, RecordId, RecordPatch};

/// Record service implementing the driving ports.
pub struct RecordService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> RecordService<R> {
    /// Create a service over `repo`, stamping dates from `clock`.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Current calendar date in the server's local time zone.
    fn today(&self) -> NaiveDate {
        self.clock.local().date_naive()
    }

    fn not_found(id: RecordId) -> Error {
        Error::not_found(format!("record {id} not found"))
    }

    fn map_repository_error(error: RecordRepositoryError) -> Error {
        match error {
            RecordRepositoryError::Unavailable { message } => {
                Error::internal(format!("record repository unavailable: {message}"))
            }
        }
    }
}

#[async_trait]
impl<R> RecordsQuery for RecordService<R>
where
    R: RecordRepository,
{
    async fn list_records(&self) -> Result<Vec<Record>, Error> {
        let records = self
            .repo
            .list()
            .await
            .map_err(Self::map_repository_error)?;
        debug!(count = records.len(), "listed records");
        Ok(records)
    }

    async fn fetch_record(&self, id: RecordId) -> Result<Record, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Self::not_found(id))
    }
}

#[async_trait]
impl<R> RecordsCommand for RecordService<R>
where
    R: RecordRepository,
{
    async fn create_record(&self, fields: RecordFields) -> Result<Record, Error> {
        let draft = RecordDraft {
            fields,
            created_date: self.today(),
        };
        let record = self
            .repo
            .insert(draft)
            .await
            .map_err(Self::map_repository_error)?;
        info!(record_id = %record.id, "record created");
        Ok(record)
    }

    async fn update_record(&self, id: RecordId, patch: RecordPatch) -> Result<Record, Error> {
        let mut record = self.fetch_record(id).await?;
        record.apply(patch, self.today());

        // A concurrent delete between the read and the write wins.
        let stored = self
            .repo
            .replace(record.clone())
            .await
            .map_err(Self::map_repository_error)?;
        if !stored {
            return Err(Self::not_found(id));
        }
        info!(record_id = %id, "record updated");
        Ok(record)
    }

    async fn delete_record(&self, id: RecordId) -> Result<(), Error> {
        let removed = self
            .repo
            .remove(id)
            .await
            .map_err(Self::map_repository_error)?;
        if !removed {
            return Err(Self::not_found(id));
        }
        info!(record_id = %id, "record deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "records_service_tests.rs"]
mod tests;
