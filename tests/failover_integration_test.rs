//! Integration tests for host failover in the content API client
//!
//! Hosts are simulated with wiremock servers, closed ports (connection
//! refused) and raw listeners that accept connections but never answer.

use regulus::adapters::content_api::{ContentApiClient, ContentSource, RequestOptions};
use regulus::domain::{ApiError, FailureKind, HealthStatus, RegulusError};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HEALTH: &str = "/api/v1/health";

/// URL of a port nothing listens on
async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// URL of a server that accepts connections and never responds
async fn hanging_server_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{addr}")
}

fn health_body(version: &str) -> serde_json::Value {
    json!({ "success": true, "data": { "status": "ok", "version": version } })
}

async fn healthy_server(version: &str, expected_calls: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(HEALTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(health_body(version)))
        .expect(expected_calls)
        .mount(&server)
        .await;
    server
}

async fn failing_server(status: u16, expected_calls: impl Into<wiremock::Times>) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status))
        .expect(expected_calls)
        .mount(&server)
        .await;
    server
}

fn client(urls: Vec<String>) -> ContentApiClient {
    ContentApiClient::with_base_urls(urls)
        .unwrap()
        .with_timeout(Duration::from_millis(300))
}

#[tokio::test]
async fn test_fails_over_to_last_healthy_host() {
    let broken = failing_server(500, 1).await;
    let refused = closed_port_url().await;
    let healthy = healthy_server("3.1.0", 1).await;

    let client = client(vec![broken.uri(), refused, healthy.uri()]);
    let status: HealthStatus = client.call(HEALTH).await.unwrap();

    assert_eq!(status.version.as_deref(), Some("3.1.0"));
    assert_eq!(client.cursor(), 2);
    assert_eq!(client.current_base_url(), healthy.uri());
}

#[tokio::test]
async fn test_cursor_is_sticky_after_success() {
    // The broken host must only be tried by the first call.
    let broken = failing_server(502, 1).await;
    let healthy = healthy_server("3.1.0", 3).await;

    let client = client(vec![broken.uri(), healthy.uri()]);
    for _ in 0..3 {
        let status: HealthStatus = client.call(HEALTH).await.unwrap();
        assert!(status.is_ok());
        assert_eq!(client.cursor(), 1);
    }
}

#[tokio::test]
async fn test_raw_request_reports_serving_host() {
    let broken = failing_server(503, 1).await;
    let healthy = healthy_server("3.1.0", 1).await;

    let client = client(vec![broken.uri(), healthy.uri()]);
    let response = client
        .request(HEALTH, &RequestOptions::new().header("X-Request-Source", "test"))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.base_url, healthy.uri());
    assert!(response.body.contains("\"status\":\"ok\""));
}

#[tokio::test]
async fn test_all_hosts_refusing_is_connectivity_failure() {
    let client = client(vec![closed_port_url().await, closed_port_url().await]);

    let err = client.call::<HealthStatus>(HEALTH).await.unwrap_err();
    match err {
        RegulusError::Api(ApiError::Connectivity { attempts, .. }) => assert_eq!(attempts, 2),
        other => panic!("expected connectivity failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_all_hosts_timing_out_is_timeout_failure() {
    let client = client(vec![hanging_server_url().await, hanging_server_url().await]);

    let err = client.call::<HealthStatus>(HEALTH).await.unwrap_err();
    let api = err.as_api().expect("api error");
    assert!(matches!(api, ApiError::Timeout { attempts: 2, .. }));
    assert_eq!(api.kind(), FailureKind::Timeout);
    assert!(api.to_string().contains("within 300ms"));
}

#[tokio::test]
async fn test_slow_host_is_skipped() {
    let slow = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(health_body("slow"))
                .set_delay(Duration::from_secs(2)),
        )
        .expect(1)
        .mount(&slow)
        .await;
    let fast = healthy_server("fast", 1).await;

    let client = client(vec![slow.uri(), fast.uri()]);
    let status: HealthStatus = client.call(HEALTH).await.unwrap();
    assert_eq!(status.version.as_deref(), Some("fast"));
    assert_eq!(client.cursor(), 1);
}

#[tokio::test]
async fn test_all_hosts_erroring_is_servers_unavailable() {
    let first = failing_server(503, 1).await;
    let second = failing_server(500, 1).await;
    let third = failing_server(503, 1).await;

    let client = client(vec![first.uri(), second.uri(), third.uri()]);
    let err = client.call::<HealthStatus>(HEALTH).await.unwrap_err();

    let api = err.as_api().expect("api error");
    assert!(matches!(
        api,
        ApiError::AllServersUnavailable {
            attempts: 3,
            last_status: 503
        }
    ));
    assert_eq!(api.kind(), FailureKind::Connectivity);
    // Each host failed once, so the cursor went all the way around.
    assert_eq!(client.cursor(), 0);
}

#[tokio::test]
async fn test_logical_failure_does_not_fail_over() {
    let refusing = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Search index is being rebuilt"
        })))
        .expect(1)
        .mount(&refusing)
        .await;
    let untouched = healthy_server("never", 0).await;

    let client = client(vec![refusing.uri(), untouched.uri()]);
    let err = client
        .call::<serde_json::Value>("/api/v1/search?q=bank")
        .await
        .unwrap_err();

    match err.as_api() {
        Some(ApiError::Logical(message)) => {
            assert_eq!(message, "Search index is being rebuilt");
        }
        other => panic!("expected logical failure, got {other:?}"),
    }
    assert_eq!(client.cursor(), 0);
}

#[tokio::test]
async fn test_invalid_json_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = client(vec![server.uri()]);
    let err = client.call::<HealthStatus>(HEALTH).await.unwrap_err();
    assert!(matches!(err.as_api(), Some(ApiError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_autocomplete_never_errors() {
    let client = client(vec![closed_port_url().await, hanging_server_url().await]);
    let suggestions = client.autocomplete("bank", 5).await;
    assert!(suggestions.is_empty());
}

#[tokio::test]
async fn test_identical_calls_return_equal_values() {
    let healthy = healthy_server("3.1.0", 2).await;
    let client = client(vec![healthy.uri()]);

    let first = client.health().await.unwrap();
    let second = client.health().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_concurrent_failures_advance_cursor_once() {
    let broken = failing_server(500, 1..=8).await;
    let healthy = healthy_server("3.1.0", 8).await;
    let spare = healthy_server("spare", 0).await;

    let client = Arc::new(client(vec![broken.uri(), healthy.uri(), spare.uri()]));
    let calls = (0..8).map(|_| {
        let client = Arc::clone(&client);
        tokio::spawn(async move { client.call::<HealthStatus>(HEALTH).await })
    });

    for result in futures::future::join_all(calls).await {
        let status = result.unwrap().unwrap();
        assert_eq!(status.version.as_deref(), Some("3.1.0"));
    }
    assert_eq!(client.cursor(), 1);
}

#[tokio::test]
async fn test_probe_hosts_leaves_cursor_untouched() {
    let healthy = healthy_server("3.1.0", 1).await;
    let refused = closed_port_url().await;

    let client = client(vec![refused.clone(), healthy.uri()]);
    let report = client.probe_hosts().await;

    assert_eq!(report.len(), 2);
    assert_eq!(report[0].base_url, refused);
    assert!(!report[0].healthy);
    assert!(report[0].error.is_some());
    assert!(report[1].healthy);
    assert_eq!(report[1].version.as_deref(), Some("3.1.0"));
    assert_eq!(client.cursor(), 0);
}

#[test]
fn test_user_messages_by_failure_kind() {
    let offline = ApiError::Connectivity {
        attempts: 3,
        last_error: "refused".to_string(),
    };
    let slow = ApiError::Timeout {
        attempts: 3,
        timeout: Duration::from_secs(15),
    };
    let refused = ApiError::Logical("Query too short".to_string());

    assert!(offline.user_message().contains("unavailable"));
    assert!(slow.user_message().contains("slowly"));
    assert_eq!(refused.user_message(), "Query too short");
}
