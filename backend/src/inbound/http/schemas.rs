//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their wire shape and exist only for documentation.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request body is malformed.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The referenced record does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "invalid JSON body: EOF while parsing an object")]
    message: String,
    /// Correlation identifier matching the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::RecordFields`], the create body.
///
/// Every field is optional on the wire; missing values default to empty or
/// `false`. Unknown fields are ignored and mistyped scalars are coerced.
#[derive(ToSchema)]
#[schema(as = crate::domain::RecordFields, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct RecordFieldsSchema {
    #[schema(example = "Jo Lee")]
    name: Option<String>,
    #[schema(example = "+15551234567")]
    phone: Option<String>,
    #[schema(example = "jo@example.com")]
    email: Option<String>,
    #[schema(example = "United States")]
    country: Option<String>,
    #[schema(example = "California")]
    state: Option<String>,
    /// `license` or `mutual`; other values are stored verbatim.
    #[schema(example = "license")]
    agreement_type: Option<String>,
    accept_license: Option<bool>,
    send_news_email: Option<bool>,
}

/// OpenAPI schema for [`crate::domain::RecordPatch`], the update body.
///
/// Omitted or `null` fields keep their stored value.
#[derive(ToSchema)]
#[schema(as = crate::domain::RecordPatch, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct RecordPatchSchema {
    name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    country: Option<String>,
    state: Option<String>,
    /// `license` or `mutual`; other values are stored verbatim.
    #[schema(example = "license")]
    agreement_type: Option<String>,
    accept_license: Option<bool>,
    send_news_email: Option<bool>,
}

/// OpenAPI schema for [`crate::domain::Record`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Record, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct RecordSchema {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    id: u64,
    #[schema(example = "Jo Lee")]
    name: String,
    #[schema(example = "+15551234567")]
    phone: String,
    #[schema(example = "jo@example.com")]
    email: String,
    #[schema(example = "United States")]
    country: String,
    #[schema(example = "California")]
    state: String,
    /// `license` or `mutual`; other values are stored verbatim.
    #[schema(example = "license")]
    agreement_type: Option<String>,
    accept_license: bool,
    send_news_email: bool,
    /// Creation date, `YYYY-MM-DD`.
    #[schema(example = "2026-03-01")]
    created_date: String,
    /// Last update date, `YYYY-MM-DD`.
    #[schema(example = "2026-03-01")]
    updated_date: String,
}
