//! Port for record storage adapters.
//!
//! The [`RecordRepository`] trait is the only way the domain reaches stored
//! records. Adapters own identifier allocation: the domain hands over a
//! [`RecordDraft`] and receives the finished [`Record`] back.

use async_trait::async_trait;

use crate::domain::{Record, RecordDraft, RecordId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by record repository adapters.
    pub enum RecordRepositoryError {
        /// The backing store cannot serve requests.
        Unavailable { message: String } => "record store unavailable: {message}",
    }
}

/// Port for record storage and retrieval.
///
/// Each call is atomic on its own; there is no transaction spanning several
/// calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Return every stored record in ascending id order.
    async fn list(&self) -> Result<Vec<Record>, RecordRepositoryError>;

    /// Fetch a record by identifier.
    async fn find_by_id(&self, id: RecordId) -> Result<Option<Record>, RecordRepositoryError>;

    /// Allocate an identifier for `draft`, store it and return the result.
    async fn insert(&self, draft: RecordDraft) -> Result<Record, RecordRepositoryError>;

    /// Overwrite the stored record sharing `record.id`.
    ///
    /// Returns `false` without storing anything when the id is unknown.
    async fn replace(&self, record: Record) -> Result<bool, RecordRepositoryError>;

    /// Remove a record. Returns `false` when the id is unknown.
    async fn remove(&self, id: RecordId) -> Result<bool, RecordRepositoryError>;
}

/// Fixture repository that stores nothing.
///
/// Inserts succeed with id `1`; every lookup misses.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecordRepository;

#[async_trait]
impl RecordRepository for FixtureRecordRepository {
    async fn list(&self) -> Result<Vec<Record>, RecordRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: RecordId) -> Result<Option<Record>, RecordRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, draft: RecordDraft) -> Result<Record, RecordRepositoryError> {
        Ok(draft.into_record(RecordId::new(1)))
    }

    async fn replace(&self, _record: Record) -> Result<bool, RecordRepositoryError> {
        Ok(false)
    }

    async fn remove(&self, _id: RecordId) -> Result<bool, RecordRepositoryError> {
        Ok(false)
    }
}
