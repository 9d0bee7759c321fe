//! HTTP inbound adapter exposing the records REST API.

pub mod error;
pub mod health;
pub mod records;
pub mod schemas;
pub mod state;

pub use error::{ApiResult, json_config};
