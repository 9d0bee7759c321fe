//! Client against a live registry server on an ephemeral port.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{HttpServer, web};
use mockable::DefaultClock;
use rstest::rstest;
use url::Url;

use registry_backend::inbound::http::health::HealthState;
use registry_backend::outbound::memory::IdStrategy;
use registry_backend::server::{AppDependencies, build_app, build_http_state};
use registry_client::{
    ClientError, FormMode, GeoCatalogue, HttpRecordsApi, ListView, RecordCache, RecordForm,
    RecordsClient, SortColumn, SubmitError,
};

struct Running {
    addr: SocketAddr,
    handle: ServerHandle,
}

fn start_server() -> Running {
    let deps = AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: web::Data::new(build_http_state(
            IdStrategy::Monotonic,
            Arc::new(DefaultClock),
        )),
        allowed_origins: Arc::from(Vec::<String>::new()),
    };
    let server = HttpServer::new(move || build_app(deps.clone()))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind ephemeral port");
    let addr = *server.addrs().first().expect("bound address");
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    Running { addr, handle }
}

fn client_for(base: &str) -> RecordsClient {
    let base = Url::parse(base).expect("valid base url");
    let api = HttpRecordsApi::new(base, Duration::from_secs(5)).expect("client builds");
    RecordsClient::new(Arc::new(api), RecordCache::default(), Arc::new(DefaultClock))
}

fn jo_lee() -> RecordForm {
    RecordForm {
        name: "Jo Lee".to_owned(),
        phone: "+15551234567".to_owned(),
        email: "jo@example.com".to_owned(),
        email_confirm: "jo@example.com".to_owned(),
        country: "US".to_owned(),
        state: "CA".to_owned(),
        agreement_type: "license".to_owned(),
        accept_license: true,
        ..RecordForm::create()
    }
}

#[rstest]
#[actix_web::test]
async fn create_edit_and_delete_through_the_client() {
    let server = start_server();
    let mut client = client_for(&format!("http://{}/api/records", server.addr));
    let geo = GeoCatalogue::bundled().expect("bundled dataset decodes");

    let created = client.submit(&jo_lee(), &geo).await.expect("create succeeds");
    assert_eq!(created.id, 1);
    assert_eq!(created.country, "United States");
    assert_eq!(created.state, "California");
    assert_eq!(created.created_date, created.updated_date);

    let listed = client.refresh().await.expect("list succeeds").to_vec();
    assert_eq!(listed, vec![created.clone()]);

    let fetched = client.fetch(created.id).await.expect("get succeeds");
    let mut edit = RecordForm::from_record(&fetched, &geo);
    assert_eq!(edit.mode, FormMode::Edit { id: 1 });
    assert_eq!(edit.country, "US");
    edit.name = "Jo L".to_owned();
    let updated = client.submit(&edit, &geo).await.expect("update succeeds");
    assert_eq!(updated.name, "Jo L");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_date, created.created_date);
    assert_eq!(
        client.cache().get(1).map(|record| record.name.as_str()),
        Some("Jo L")
    );

    let mut view = ListView::new();
    view.request_delete(1);
    let deleted = view
        .confirm_delete(&mut client)
        .await
        .expect("delete succeeds");
    assert_eq!(deleted, Some(1));
    assert!(client.cache().is_empty());

    let missing = client.fetch(1).await.expect_err("record is gone");
    assert_eq!(missing, ClientError::NotFound { id: 1 });
    let again = client.delete(1).await.expect_err("record is gone");
    assert!(again.is_not_found());

    server.handle.stop(true).await;
}

#[rstest]
#[actix_web::test]
async fn list_view_orders_server_data() {
    let server = start_server();
    let mut client = client_for(&format!("http://{}/api/records/", server.addr));
    let geo = GeoCatalogue::bundled().expect("bundled dataset decodes");

    for (name, country, state) in [
        ("Jo Lee", "US", "TX"),
        ("Ada Byron", "CA", "ON"),
        ("Bo Diddley", "US", "CA"),
    ] {
        let mut form = jo_lee();
        form.name = name.to_owned();
        form.select_country(country, &geo);
        form.state = state.to_owned();
        client.submit(&form, &geo).await.expect("create succeeds");
    }

    let records = client.refresh().await.expect("list succeeds").to_vec();
    let mut view = ListView::new();
    let names = |view: &ListView| -> Vec<String> {
        view.visible(&records)
            .into_iter()
            .map(|record| record.name.clone())
            .collect()
    };
    assert_eq!(names(&view), ["Ada Byron", "Bo Diddley", "Jo Lee"]);

    view.select_sort(SortColumn::Name);
    view.select_sort(SortColumn::Name);
    view.set_filter(SortColumn::Country, "united");
    assert_eq!(names(&view), ["Jo Lee", "Bo Diddley"]);

    server.handle.stop(true).await;
}

#[rstest]
#[actix_web::test]
async fn invalid_forms_are_not_sent() {
    let server = start_server();
    let mut client = client_for(&format!("http://{}/api/records", server.addr));
    let geo = GeoCatalogue::bundled().expect("bundled dataset decodes");
    let mut form = jo_lee();
    form.phone = "5551234567".to_owned();

    let error = client.submit(&form, &geo).await.expect_err("form is invalid");
    assert!(matches!(error, SubmitError::Invalid(_)));
    assert!(client.refresh().await.expect("list succeeds").is_empty());

    server.handle.stop(true).await;
}

#[rstest]
#[actix_web::test]
async fn unreachable_servers_surface_transport_errors() {
    let server = start_server();
    let addr = server.addr;
    server.handle.stop(true).await;

    let mut client = client_for(&format!("http://{addr}/api/records"));
    let error = client.refresh().await.expect_err("server is down");
    assert!(matches!(error, ClientError::Transport { .. }));
    assert_eq!(error.user_message(), "An error occurred. Please try again.");
}

#[rstest]
#[actix_web::test]
async fn records_stored_by_other_clients_still_list() {
    let server = start_server();
    let base = format!("http://{}/api/records", server.addr);
    let response = reqwest::Client::new()
        .post(&base)
        .json(&serde_json::json!({
            "name": "Jo",
            "phone": 15_551_234_567_u64,
            "agreementType": "verbal",
        }))
        .send()
        .await
        .expect("raw create is sent");
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);

    let mut client = client_for(&base);
    let records = client.refresh().await.expect("list succeeds");
    let [record] = records else {
        panic!("expected one record, got {records:?}");
    };
    assert_eq!(record.phone, "15551234567");
    assert!(record.agreement_type.is_none());

    server.handle.stop(true).await;
}
