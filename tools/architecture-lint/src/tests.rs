//! Unit tests for the architecture lint.

use std::path::PathBuf;

use rstest::rstest;

use super::*;

fn lint_one(file: &str, contents: &str) -> Result<(), ArchitectureLintError> {
    lint_sources(&[LintSource {
        file: PathBuf::from(file),
        contents: contents.to_owned(),
    }])
}

#[rstest]
#[case::inbound_uses_domain(
    "inbound/http/records.rs",
    "use crate::domain::RecordId; fn handler() { let _ = RecordId::new(1); }",
    true
)]
#[case::inbound_uses_store(
    "inbound/http/records.rs",
    "use crate::outbound::memory::InMemoryRecordRepository; fn handler() {}",
    false
)]
#[case::inbound_uses_bare_store_path(
    "inbound/http/records.rs",
    "use outbound::memory::InMemoryRecordRepository; fn handler() {}",
    false
)]
#[case::inbound_uses_store_via_crate_name(
    "inbound/http/records.rs",
    "use registry_backend::outbound::memory::IdStrategy; fn handler() {}",
    false
)]
#[case::inbound_uses_store_inside_group(
    "inbound/http/state.rs",
    "use crate::{domain::ports::RecordsQuery, outbound::memory::IdStrategy}; struct S;",
    false
)]
#[case::inbound_local_named_like_a_layer(
    "inbound/http/state.rs",
    "fn f(outbound: u8) -> u8 { outbound }",
    true
)]
#[case::inbound_uses_http_client(
    "inbound/http/records.rs",
    "use reqwest::Client; fn handler() {}",
    false
)]
#[case::domain_uses_inbound(
    "domain/records_service.rs",
    "use crate::inbound::http; fn thing() {}",
    false
)]
#[case::domain_uses_actix(
    "domain/error.rs",
    "fn status() -> actix_web::http::StatusCode { actix_web::http::StatusCode::OK }",
    false
)]
#[case::domain_uses_utoipa(
    "domain/record.rs",
    "use utoipa::ToSchema; #[derive(ToSchema)] struct Record;",
    false
)]
#[case::domain_uses_serde(
    "domain/record.rs",
    "use serde::Serialize; #[derive(Serialize)] struct Record;",
    true
)]
#[case::outbound_uses_inbound(
    "outbound/memory/record_store.rs",
    "use super::super::super::inbound::http; fn thing() {}",
    false
)]
#[case::outbound_uses_actix(
    "outbound/memory/record_store.rs",
    "use actix_web::web; fn thing() {}",
    false
)]
#[case::outbound_uses_domain(
    "outbound/memory/record_store.rs",
    "use crate::domain::ports::RecordRepository; struct Store;",
    true
)]
fn detects_boundary_violations(#[case] file: &str, #[case] contents: &str, #[case] ok: bool) {
    let result = lint_one(file, contents);
    assert_eq!(result.is_ok(), ok, "result: {result:?}");
}

#[rstest]
fn duplicate_violations_in_one_file_are_reported_once() {
    let error = lint_one(
        "domain/record.rs",
        "use actix_web::web; fn a() { let _ = actix_web::web::Json(1); }",
    )
    .expect_err("domain must not use actix");

    assert_eq!(
        error.violations(),
        [Violation {
            file: PathBuf::from("domain/record.rs"),
            message: "domain module must not depend on external crate `actix_web`".to_owned(),
        }]
    );
}

#[rstest]
fn files_outside_the_layers_are_rejected() {
    let error = lint_one("server/mod.rs", "fn main() {}").expect_err("no layer");
    assert!(matches!(error, ArchitectureLintError::Parse { .. }));
}

#[rstest]
fn unparsable_sources_are_reported() {
    let error = lint_one("domain/record.rs", "fn {").expect_err("invalid Rust");
    assert!(error.to_string().contains("domain/record.rs"));
}

#[rstest]
fn violation_report_lists_each_file() {
    let error = lint_sources(&[
        LintSource {
            file: PathBuf::from("domain/a.rs"),
            contents: "use crate::outbound::memory; fn a() {}".to_owned(),
        },
        LintSource {
            file: PathBuf::from("outbound/b.rs"),
            contents: "use crate::inbound::http; fn b() {}".to_owned(),
        },
    ])
    .expect_err("two violations");

    let report = error.to_string();
    assert!(report.starts_with("architecture boundary violations:"));
    assert!(report.contains("- domain/a.rs: domain module must not depend on crate::outbound"));
    assert!(report.contains("- outbound/b.rs: outbound module must not depend on crate::inbound"));
}
