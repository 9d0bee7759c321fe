//! Driving ports for record use cases.
//!
//! Inbound adapters depend on these traits rather than on the service type,
//! which keeps HTTP handlers testable against mocks and fixtures.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{AgreementType, Error, Record, RecordDraft, RecordFields, RecordId, RecordPatch};

/// Read-side record use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordsQuery: Send + Sync {
    /// List every record.
    async fn list_records(&self) -> Result<Vec<Record>, Error>;

    /// Fetch one record, failing with a not-found error if it is absent.
    async fn fetch_record(&self, id: RecordId) -> Result<Record, Error>;
}

/// Write-side record use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordsCommand: Send + Sync {
    /// Store a new record and return it with its id and dates.
    async fn create_record(&self, fields: RecordFields) -> Result<Record, Error>;

    /// Merge `patch` into an existing record.
    async fn update_record(&self, id: RecordId, patch: RecordPatch) -> Result<Record, Error>;

    /// Delete an existing record.
    async fn delete_record(&self, id: RecordId) -> Result<(), Error>;
}

/// Sample record served by [`FixtureRecordsQuery`].
#[must_use]
pub fn fixture_record() -> Record {
    let created_date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or(NaiveDate::MIN);
    RecordDraft {
        fields: RecordFields {
            name: "Ada Lovelace".to_owned(),
            phone: "+442079460000".to_owned(),
            email: "ada@example.com".to_owned(),
            country: "United Kingdom".to_owned(),
            state: "England".to_owned(),
            agreement_type: Some(AgreementType::Mutual),
            accept_license: false,
            send_news_email: true,
        },
        created_date,
    }
    .into_record(RecordId::new(1))
}

/// Fixture query serving a single record with id `1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecordsQuery;

#[async_trait]
impl RecordsQuery for FixtureRecordsQuery {
    async fn list_records(&self) -> Result<Vec<Record>, Error> {
        Ok(vec![fixture_record()])
    }

    async fn fetch_record(&self, id: RecordId) -> Result<Record, Error> {
        let record = fixture_record();
        if record.id == id {
            Ok(record)
        } else {
            Err(Error::not_found(format!("record {id} not found")))
        }
    }
}

/// Fixture command echoing its input without storing anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecordsCommand;

#[async_trait]
impl RecordsCommand for FixtureRecordsCommand {
    async fn create_record(&self, fields: RecordFields) -> Result<Record, Error> {
        let mut record = fixture_record();
        record.fields = fields;
        Ok(record)
    }

    async fn update_record(&self, id: RecordId, patch: RecordPatch) -> Result<Record, Error> {
        let mut record = FixtureRecordsQuery.fetch_record(id).await?;
        let today = record.updated_date;
        record.apply(patch, today);
        Ok(record)
    }

    async fn delete_record(&self, id: RecordId) -> Result<(), Error> {
        FixtureRecordsQuery.fetch_record(id).await.map(|_| ())
    }
}
