//! Integration tests for the snapshot API client.
//!
//! These tests verify that the client:
//! 1. Parses both snapshot endpoints and the range variant
//! 2. Maps non-success statuses and transport failures to errors
//! 3. Reports each fetch independently through the snapshot service

use chrono::{TimeZone, Utc};
use orchard_client::api::{SnapshotClient, SnapshotEvent, spawn_snapshot_service};
use orchard_core::error::OrchardError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_base(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

#[tokio::test]
async fn test_statistics_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/statistics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "category": "red apple", "count": 45 },
            { "category": "green apple", "count": 38 }
        ])))
        .mount(&mock_server)
        .await;

    let client = SnapshotClient::new(api_base(&mock_server)).unwrap();
    let counts = client.statistics().await.unwrap();

    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].category, "red apple");
    assert_eq!(counts[0].count, 45);
    assert_eq!(counts[1].category, "green apple");
    assert_eq!(counts[1].count, 38);
}

#[tokio::test]
async fn test_classifications_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/classifications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 2, "category": "green apple", "timestamp": "2026-08-05T12:01:00Z" },
            { "id": 1, "category": "red apple", "timestamp": "2026-08-05T12:00:00Z" }
        ])))
        .mount(&mock_server)
        .await;

    let client = SnapshotClient::new(api_base(&mock_server)).unwrap();
    let events = client.classifications().await.unwrap();

    assert_eq!(events.len(), 2);
    // Newest first, as the service returns them.
    assert_eq!(events[0].id, 2);
    assert_eq!(events[0].category, "green apple");
    assert_eq!(
        events[1].timestamp,
        Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap()
    );
}

#[tokio::test]
async fn test_classifications_range_sends_query_params() {
    let mock_server = MockServer::start().await;
    let start = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2026, 8, 5, 0, 0, 0).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/classifications/range"))
        .and(query_param("startDate", start.to_rfc3339()))
        .and(query_param("endDate", end.to_rfc3339()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 7, "category": "red apple", "timestamp": "2026-08-03T09:00:00Z" }
        ])))
        .mount(&mock_server)
        .await;

    let client = SnapshotClient::new(api_base(&mock_server)).unwrap();
    let events = client.classifications_range(start, end).await.unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, 7);
}

#[tokio::test]
async fn test_server_error_maps_to_snapshot_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/statistics"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = SnapshotClient::new(api_base(&mock_server)).unwrap();
    let err = client.statistics().await.unwrap_err();

    match err {
        OrchardError::SnapshotApi {
            endpoint, status, ..
        } => {
            assert_eq!(endpoint, "/statistics");
            assert_eq!(status, 500);
        }
        other => panic!("expected SnapshotApi error, got {other:?}"),
    }
    assert!(err.is_recoverable());
}

#[tokio::test]
async fn test_unreachable_server_maps_to_transport_error() {
    // Bind and immediately drop a listener so the port is closed.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = SnapshotClient::new(format!("http://{addr}/api")).unwrap();
    let err = client.classifications().await.unwrap_err();

    assert!(matches!(err, OrchardError::SnapshotTransport { .. }));
    assert!(err.is_recoverable());
}

#[tokio::test]
async fn test_snapshot_service_reports_fetches_independently() {
    let mock_server = MockServer::start().await;

    // Statistics fails, classifications succeeds: the failed fetch leaves
    // that part of the state empty and produces no event.
    Mock::given(method("GET"))
        .and(path("/api/statistics"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/classifications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 1, "category": "red apple", "timestamp": "2026-08-05T12:00:00Z" }
        ])))
        .mount(&mock_server)
        .await;

    let client = SnapshotClient::new(api_base(&mock_server)).unwrap();
    let (_trigger, mut events) = spawn_snapshot_service(client);

    let event = events.recv().await.expect("snapshot event");
    match event {
        SnapshotEvent::Classifications(history) => {
            assert_eq!(history.len(), 1);
            assert_eq!(history[0].category, "red apple");
        }
        other => panic!("expected classifications only, got {other:?}"),
    }
}

#[tokio::test]
async fn test_snapshot_service_refresh_trigger() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/statistics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "category": "red apple", "count": 1 }
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/classifications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let client = SnapshotClient::new(api_base(&mock_server)).unwrap();
    let (trigger, mut events) = spawn_snapshot_service(client);

    // Initial load: two events.
    assert!(events.recv().await.is_some());
    assert!(events.recv().await.is_some());

    // Refresh: two more.
    trigger.send(()).unwrap();
    assert!(events.recv().await.is_some());
    assert!(events.recv().await.is_some());
}
