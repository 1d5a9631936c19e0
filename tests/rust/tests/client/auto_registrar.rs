//! AutoRegistrar tests

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use provider_registry_core::{AutoRegistrar, Registration, RegistrationClient};
use tests::fixtures::*;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ok_body(kind: &str) -> serde_json::Value {
    json!({
        "service_id": SERVICE_ID,
        "resource_kind": kind,
        "status": "active",
        "registered_at": "2026-01-01T00:00:00Z",
        "message": "Service registered successfully",
    })
}

async fn mount_register(server: &MockServer, kind: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/resource/{}/provider", kind)))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(kind)))
        .mount(server)
        .await;
}

fn registrations() -> Vec<Registration> {
    vec![
        Registration::new("file", request(SERVICE_ID, FILE_ENDPOINT)),
        Registration::new("container", request(SERVICE_ID, CONTAINER_ENDPOINT)),
    ]
}

async fn post_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.as_str() == "POST")
        .count()
}

#[tokio::test]
async fn test_start_registers_all_then_reregisters() {
    let server = MockServer::start().await;
    mount_register(&server, "file").await;
    mount_register(&server, "container").await;

    let client = Arc::new(RegistrationClient::new(server.uri()).unwrap());
    let registrar = AutoRegistrar::new(client, registrations(), Duration::from_millis(50));

    registrar.start().await.unwrap();
    assert_eq!(post_count(&server).await, 2);
    assert!(registrar.is_running());

    tokio::time::sleep(Duration::from_millis(180)).await;
    assert!(post_count(&server).await >= 4);

    registrar.stop();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!registrar.is_running());

    let after_stop = post_count(&server).await;
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(post_count(&server).await, after_stop);
}

#[tokio::test]
async fn test_start_fails_on_first_registration_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resource/file/provider"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_register(&server, "container").await;

    let client = Arc::new(RegistrationClient::new(server.uri()).unwrap());
    let registrar = AutoRegistrar::new(client, registrations(), Duration::from_millis(50));

    assert!(registrar.start().await.is_err());
    assert!(!registrar.is_running());

    // "file" failed first, "container" never attempted
    assert_eq!(post_count(&server).await, 1);
}

#[tokio::test]
async fn test_unregister_all_continues_past_failures() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path_regex(r"^/resource/file/provider/.+$"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path_regex(r"^/resource/container/provider/.+$"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = Arc::new(RegistrationClient::new(server.uri()).unwrap());
    let registrar = AutoRegistrar::new(client, registrations(), Duration::from_secs(60));

    registrar.unregister_all().await;
}
