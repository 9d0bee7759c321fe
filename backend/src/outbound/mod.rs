//! Outbound adapters implementing domain ports.
//!
//! - **memory**: process-local record store behind the `RecordRepository`
//!   port. Data lives for the lifetime of the process.
//!
//! Adapters translate between domain types and their storage representation.
//! They contain no business logic.

pub mod memory;
