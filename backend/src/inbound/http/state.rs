//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without a real store.

use std::sync::Arc;

use crate::domain::ports::{RecordsCommand, RecordsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub records: Arc<dyn RecordsQuery>,
    pub records_command: Arc<dyn RecordsCommand>,
}

impl HttpState {
    /// Bundle the record driving ports.
    pub fn new(records: Arc<dyn RecordsQuery>, records_command: Arc<dyn RecordsCommand>) -> Self {
        Self {
            records,
            records_command,
        }
    }
}
