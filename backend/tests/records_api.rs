//! End-to-end coverage of the records API through the assembled application.
//!
//! These tests drive the real middleware stack, service and in-memory store
//! with a fixed clock so record dates are deterministic.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use rstest::rstest;
use serde_json::{Value, json};

use registry_backend::domain::TRACE_ID_HEADER;
use registry_backend::inbound::http::health::HealthState;
use registry_backend::outbound::memory::IdStrategy;
use registry_backend::server::{AppDependencies, build_app, build_http_state};

struct FixedClock(NaiveDate);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        let noon = self.0.and_hms_opt(12, 0, 0).expect("valid time");
        Local
            .from_local_datetime(&noon)
            .single()
            .expect("unambiguous local noon")
    }

    fn utc(&self) -> DateTime<Utc> {
        self.local().with_timezone(&Utc)
    }
}

const TODAY: &str = "2026-05-20";

fn deps(strategy: IdStrategy, origins: &[&str]) -> AppDependencies {
    let today = NaiveDate::from_ymd_opt(2026, 5, 20).expect("valid date");
    AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: web::Data::new(build_http_state(strategy, Arc::new(FixedClock(today)))),
        allowed_origins: origins.iter().map(|origin| (*origin).to_owned()).collect(),
    }
}

fn jo_lee() -> Value {
    json!({
        "name": "Jo Lee",
        "phone": "+15551234567",
        "email": "jo@example.com",
        "emailConfirm": "jo@example.com",
        "country": "US",
        "state": "CA",
        "agreementType": "license",
        "acceptLicense": true,
    })
}

#[rstest]
#[actix_web::test]
async fn create_list_update_delete_scenario() {
    let app = test::init_service(build_app(deps(IdStrategy::Monotonic, &[]))).await;

    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/records")
            .set_json(jo_lee())
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(created).await;
    assert_eq!(created["id"], json!(1));
    assert_eq!(created["createdDate"], json!(TODAY));
    assert_eq!(created["updatedDate"], json!(TODAY));
    assert!(created.get("emailConfirm").is_none());

    let listed: Vec<Value> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/records/").to_request(),
    )
    .await;
    assert_eq!(listed, vec![created.clone()]);

    let updated: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::put()
            .uri("/api/records/1")
            .set_json(json!({ "name": "Jo L." }))
            .to_request(),
    )
    .await;
    assert_eq!(updated["name"], json!("Jo L."));
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["email"], created["email"]);
    assert_eq!(updated["createdDate"], created["createdDate"]);
    assert_eq!(updated["updatedDate"], json!(TODAY));

    let deleted = test::call_service(
        &app,
        test::TestRequest::delete().uri("/api/records/1").to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    for request in [
        test::TestRequest::get().uri("/api/records/1"),
        test::TestRequest::delete().uri("/api/records/1"),
    ] {
        let response = test::call_service(&app, request.to_request()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key(TRACE_ID_HEADER));
        assert!(test::read_body(response).await.is_empty());
    }
}

#[rstest]
#[case(IdStrategy::Monotonic, 3)]
#[case(IdStrategy::MaxPlusOne, 2)]
#[actix_web::test]
async fn id_after_deleting_the_highest_record(#[case] strategy: IdStrategy, #[case] expected: u64) {
    let app = test::init_service(build_app(deps(strategy, &[]))).await;

    for _ in 0..2 {
        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/records")
                .set_json(jo_lee())
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    let deleted = test::call_service(
        &app,
        test::TestRequest::delete().uri("/api/records/2").to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let created: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/records")
            .set_json(jo_lee())
            .to_request(),
    )
    .await;
    assert_eq!(created["id"], json!(expected));
}

#[rstest]
#[case(json!({ "name": "Jo", "agreementType": "" }))]
#[case(json!({ "name": "Jo", "agreementType": "verbal" }))]
#[case(json!({ "name": "Jo", "phone": 15_551_234_567_u64 }))]
#[actix_web::test]
async fn any_json_object_is_stored(#[case] payload: Value) {
    let app = test::init_service(build_app(deps(IdStrategy::Monotonic, &[]))).await;

    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/records")
            .set_json(payload)
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(created).await;

    let fetched: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/records/1").to_request(),
    )
    .await;
    assert_eq!(fetched, created);
    assert_eq!(fetched["name"], json!("Jo"));
}

#[rstest]
#[actix_web::test]
async fn malformed_body_yields_json_envelope_with_trace_id() {
    let app = test::init_service(build_app(deps(IdStrategy::Monotonic, &[]))).await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/records")
            .insert_header(("content-type", "application/json"))
            .set_payload("not json")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], json!("invalid_request"));
    assert_eq!(body["traceId"], json!(header));
}

#[rstest]
#[case(&[], "http://anywhere.test", true)]
#[case(&["http://localhost:3000"], "http://localhost:3000", true)]
#[case(&["http://localhost:3000"], "http://evil.test", false)]
#[actix_web::test]
async fn cors_honours_configured_origins(
    #[case] origins: &[&str],
    #[case] origin: &str,
    #[case] allowed: bool,
) {
    let app = test::init_service(build_app(deps(IdStrategy::Monotonic, origins))).await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/records")
            .insert_header(("origin", origin))
            .to_request(),
    )
    .await;

    let echoed = response
        .headers()
        .get("access-control-allow-origin")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    if allowed {
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(echoed.as_deref(), Some(origin));
    } else {
        assert!(echoed.is_none());
    }
}

#[rstest]
#[actix_web::test]
async fn probes_are_served_alongside_the_api() {
    let deps = deps(IdStrategy::Monotonic, &[]);
    let health = deps.health_state.clone();
    let app = test::init_service(build_app(deps)).await;

    let before = test::call_service(
        &app,
        test::TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;
    assert_eq!(before.status(), StatusCode::SERVICE_UNAVAILABLE);

    health.mark_ready();
    let after = test::call_service(
        &app,
        test::TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;
    assert_eq!(after.status(), StatusCode::OK);
}
