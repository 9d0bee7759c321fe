//! Records API handlers.
//!
//! ```text
//! GET    /api/records
//! GET    /api/records/{id}
//! POST   /api/records        {"name":"Jo Lee","phone":"+15551234567",...}
//! PUT    /api/records/{id}   {"name":"Jo L."}
//! DELETE /api/records/{id}
//! ```
//!
//! Identifiers that do not parse as integers are treated as unknown records.

use actix_web::{HttpResponse, Scope, delete, get, post, put, web};
use tracing::debug;

use crate::domain::{Error, Record, RecordFields, RecordId, RecordPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, RecordFieldsSchema, RecordPatchSchema, RecordSchema};
use crate::inbound::http::state::HttpState;

/// Base path of the records resource.
pub const RECORDS_PATH: &str = "/api/records";

fn parse_id(raw: &str) -> Result<RecordId, Error> {
    raw.parse().map_err(|_| {
        debug!(raw_id = raw, "non-numeric record id");
        Error::not_found(format!("record {raw} not found"))
    })
}

/// List every record.
#[utoipa::path(
    get,
    path = "/api/records",
    responses(
        (status = 200, description = "All records", body = [RecordSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["records"],
    operation_id = "listRecords"
)]
#[get("")]
pub async fn list_records(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Record>>> {
    let records = state.records.list_records().await?;
    Ok(web::Json(records))
}

/// Fetch one record.
#[utoipa::path(
    get,
    path = "/api/records/{id}",
    params(("id" = u64, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "The record", body = RecordSchema),
        (status = 404, description = "Unknown record; empty body"),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["records"],
    operation_id = "getRecord"
)]
#[get("/{id}")]
pub async fn get_record(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Record>> {
    let id = parse_id(&path)?;
    let record = state.records.fetch_record(id).await?;
    Ok(web::Json(record))
}

/// Create a record. The server assigns the id and both dates.
#[utoipa::path(
    post,
    path = "/api/records",
    request_body = RecordFieldsSchema,
    responses(
        (status = 201, description = "Record created", body = RecordSchema),
        (status = 400, description = "Body is not valid JSON", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["records"],
    operation_id = "createRecord"
)]
#[post("")]
pub async fn create_record(
    state: web::Data<HttpState>,
    payload: web::Json<RecordFields>,
) -> ApiResult<HttpResponse> {
    let record = state
        .records_command
        .create_record(payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(record))
}

/// Merge the supplied fields into an existing record.
#[utoipa::path(
    put,
    path = "/api/records/{id}",
    params(("id" = u64, Path, description = "Record identifier")),
    request_body = RecordPatchSchema,
    responses(
        (status = 200, description = "Record updated", body = RecordSchema),
        (status = 400, description = "Body is not valid JSON", body = ErrorSchema),
        (status = 404, description = "Unknown record; empty body"),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["records"],
    operation_id = "updateRecord"
)]
#[put("/{id}")]
pub async fn update_record(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<RecordPatch>,
) -> ApiResult<web::Json<Record>> {
    let id = parse_id(&path)?;
    let record = state
        .records_command
        .update_record(id, payload.into_inner())
        .await?;
    Ok(web::Json(record))
}

/// Delete a record.
#[utoipa::path(
    delete,
    path = "/api/records/{id}",
    params(("id" = u64, Path, description = "Record identifier")),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 404, description = "Unknown record; empty body"),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["records"],
    operation_id = "deleteRecord"
)]
#[delete("/{id}")]
pub async fn delete_record(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    state.records_command.delete_record(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Scope mounting every records handler under [`RECORDS_PATH`].
///
/// Pair it with `NormalizePath::trim()` so `/api/records/` lists as well.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use registry_backend::inbound::http::records::scope;
///
/// let _app = App::new().service(scope());
/// ```
pub fn scope() -> Scope {
    web::scope(RECORDS_PATH)
        .service(list_records)
        .service(create_record)
        .service(get_record)
        .service(update_record)
        .service(delete_record)
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod tests;
