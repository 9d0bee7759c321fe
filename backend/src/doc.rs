//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the records and health endpoints plus the schema
//! wrappers from the inbound layer. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, RecordFieldsSchema, RecordPatchSchema, RecordSchema,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Registry backend API",
        description = "CRUD interface for in-memory registry records, plus health probes.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::records::list_records,
        crate::inbound::http::records::get_record,
        crate::inbound::http::records::create_record,
        crate::inbound::http::records::update_record,
        crate::inbound::http::records::delete_record,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RecordSchema,
        RecordFieldsSchema,
        RecordPatchSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "records", description = "Create, read, update and delete records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const RECORD_SCHEMA_NAME: &str = "crate.domain.Record";
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn record_schema_documents_dates_and_flags() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let record = schemas.get(RECORD_SCHEMA_NAME).expect("Record schema");

        for field in ["id", "agreementType", "acceptLicense", "createdDate", "updatedDate"] {
            assert_object_schema_has_field(record, field);
        }
    }

    #[test]
    fn error_schema_has_envelope_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error, "code");
        assert_object_schema_has_field(error, "traceId");
    }

    #[test]
    fn every_records_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/api/records"));
        assert!(paths.contains_key("/api/records/{id}"));
        assert!(paths.contains_key("/health/ready"));
    }
}
