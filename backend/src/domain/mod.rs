//! Domain primitives, services and ports.
//!
//! Purpose: define the record model and the CRUD use cases independently of
//! HTTP and storage. Adapters depend on this module; it depends on neither.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — transport-agnostic error payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - Record, RecordFields, RecordPatch — the record aggregate and its inputs.
//! - RecordService — implementation of the record driving ports.
//! - TraceId — request-scoped correlation identifier.

pub mod error;
mod lenient;
pub mod ports;
pub mod record;
pub mod records_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode};
pub use self::record::{
    AgreementType, Record, RecordDraft, RecordFields, RecordId, RecordPatch,
};
pub use self::records_service::RecordService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient result alias for domain and adapter code.
///
/// # Examples
/// ```
/// use registry_backend::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<u64> {
///     Err(Error::not_found("record 1 not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
