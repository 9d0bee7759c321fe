//! Client-side data layer for the record registry.
//!
//! The crate talks to the registry REST API, keeps a bounded local cache of
//! records, and models the create/edit form and the sortable, filterable list
//! the way an interactive front end presents them.

pub mod api;
pub mod cache;
pub mod config;
pub mod dto;
pub mod error;
pub mod form;
pub mod geo;
pub mod listing;
pub mod notice;
pub mod session;

pub use api::{HttpRecordsApi, RecordsApi};
pub use cache::RecordCache;
pub use config::ClientSettings;
pub use dto::{AgreementType, Record, RecordPayload, UnknownAgreementType};
pub use error::{ClientError, GENERIC_ERROR_MESSAGE};
pub use form::{FormErrors, FormField, FormMode, RecordForm};
pub use geo::{Country, GeoCatalogue, GeoError, Subdivision};
pub use listing::{FilterConfig, ListView, SortColumn, SortConfig, SortDirection};
pub use notice::{Notice, NoticeLink};
pub use session::{RecordsClient, SubmitError};
