//! Domain ports for the hexagonal boundary.
//!
//! Driven ports describe how the domain reaches storage; driving ports
//! describe the use cases inbound adapters may invoke.

mod macros;
pub(crate) use macros::define_port_error;

mod record_repository;
mod records;

#[cfg(test)]
pub use record_repository::MockRecordRepository;
pub use record_repository::{FixtureRecordRepository, RecordRepository, RecordRepositoryError};
#[cfg(test)]
pub use records::{MockRecordsCommand, MockRecordsQuery};
pub use records::{
    FixtureRecordsCommand, FixtureRecordsQuery, RecordsCommand, RecordsQuery, fixture_record,
};
