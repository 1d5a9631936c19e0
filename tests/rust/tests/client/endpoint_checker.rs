//! HttpEndpointChecker tests

use std::time::Duration;

use provider_registry_core::{EndpointCheckConfig, EndpointChecker, HttpEndpointChecker};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_config(retries: u32) -> EndpointCheckConfig {
    EndpointCheckConfig {
        enabled: true,
        timeout: Duration::from_secs(2),
        retries,
        retry_wait: Duration::from_millis(10),
        ..EndpointCheckConfig::default()
    }
}

#[tokio::test]
async fn test_healthy_on_first_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/file/health"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let checker = HttpEndpointChecker::new(&fast_config(2)).unwrap();
    checker
        .check_endpoint(&format!("{}/api/file", server.uri()))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_falls_through_to_later_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ready"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let checker = HttpEndpointChecker::new(&fast_config(0)).unwrap();
    checker.check_endpoint(&server.uri()).await.unwrap();
}

#[tokio::test]
async fn test_server_errors_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/healthz"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let checker = HttpEndpointChecker::new(&fast_config(2)).unwrap();
    checker.check_endpoint(&server.uri()).await.unwrap();
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let checker = HttpEndpointChecker::new(&fast_config(2)).unwrap();
    checker.check_endpoint(&server.uri()).await.unwrap();
}

#[tokio::test]
async fn test_fails_when_every_path_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let checker = HttpEndpointChecker::new(&fast_config(1)).unwrap();
    let err = checker.check_endpoint(&server.uri()).await.unwrap_err();
    assert!(err.to_string().contains("not reachable"));

    // 4 paths, 2 attempts each
    assert_eq!(server.received_requests().await.unwrap().len(), 8);
}
