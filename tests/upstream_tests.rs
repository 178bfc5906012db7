// Ergast client tests against a local mock server

use actix_web::{http::StatusCode, test, web, App};
use f1_analytics_api::{configure_routes, AppState, ErgastClient, UpstreamClient, UpstreamConfig, UpstreamError};
use mockito::{Matcher, Server};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;

fn client_for(server: &Server, max_retries: u32) -> ErgastClient {
    ErgastClient::new(UpstreamConfig {
        base_url: format!("{}/ergast/f1", server.url()),
        timeout: Duration::from_secs(5),
        max_retries,
        retry_backoff: Duration::from_millis(1),
        ..UpstreamConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetch_success_returns_body() {
    let mut server = Server::new_async().await;
    let body = json!({ "MRData": { "SeasonTable": { "Seasons": [{ "season": "1950" }] } } });

    let mock = server
        .mock("GET", "/ergast/f1/seasons.json")
        .match_header("user-agent", "F1-Analytics-Workshop/1.0.0")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = client_for(&server, 0);
    let result = client.fetch("seasons.json").await.unwrap();

    assert_eq!(result, body);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_sends_query_and_strips_leading_slash() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/ergast/f1/seasons.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "5".into()),
            Matcher::UrlEncoded("offset".into(), "10".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"MRData":{}}"#)
        .create_async()
        .await;

    let client = client_for(&server, 0);
    let result = client.fetch("/seasons.json?limit=5&offset=10").await.unwrap();

    assert_eq!(result, json!({ "MRData": {} }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_preserves_key_order() {
    let mut server = Server::new_async().await;
    let raw = r#"{"MRData":{"xmlns":"","series":"f1","url":"http://x","limit":"30","offset":"0","total":"0"}}"#;

    server
        .mock("GET", "/ergast/f1/2023/races.json")
        .with_status(200)
        .with_body(raw)
        .create_async()
        .await;

    let client = client_for(&server, 0);
    let result = client.fetch("2023/races.json").await.unwrap();

    assert_eq!(serde_json::to_string(&result).unwrap(), raw);
}

#[tokio::test]
async fn test_fetch_http_error_is_not_retried() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/ergast/f1/1800/races.json")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server, 3);
    let err = client.fetch("1800/races.json").await.unwrap_err();

    assert!(matches!(err, UpstreamError::Status { status, .. } if status.as_u16() == 404));
    assert!(err.to_string().contains("404 Not Found"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_retries_server_errors_within_budget() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/ergast/f1/seasons.json")
        .with_status(503)
        .expect(3)
        .create_async()
        .await;

    let client = client_for(&server, 2);
    let err = client.fetch("seasons.json").await.unwrap_err();

    assert!(err.is_transient());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_without_retry_budget_makes_single_attempt() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/ergast/f1/seasons.json")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server, 0);
    assert!(client.fetch("seasons.json").await.is_err());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_invalid_json_is_decode_error() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/ergast/f1/seasons.json")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let client = client_for(&server, 3);
    let err = client.fetch("seasons.json").await.unwrap_err();

    assert!(matches!(err, UpstreamError::Decode(_)));
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    // Nothing listens on the discard port
    let client = ErgastClient::new(UpstreamConfig {
        base_url: "http://127.0.0.1:9/ergast/f1".to_string(),
        timeout: Duration::from_secs(2),
        max_retries: 0,
        ..UpstreamConfig::default()
    })
    .unwrap();

    let err = client.fetch("seasons.json").await.unwrap_err();
    assert!(matches!(err, UpstreamError::Request(_)));
}

/// Accepts connections and never writes a byte back
async fn silent_upstream() -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let connections = Arc::new(AtomicUsize::new(0));

    let counter = connections.clone();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            held.push(stream);
        }
    });

    (format!("http://{}/ergast/f1", addr), connections)
}

fn silent_client(base_url: &str, timeout: Duration, max_retries: u32) -> ErgastClient {
    ErgastClient::new(UpstreamConfig {
        base_url: base_url.to_string(),
        timeout,
        max_retries,
        retry_backoff: Duration::from_millis(1),
        ..UpstreamConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetch_timeout_is_request_error() {
    let (base_url, connections) = silent_upstream().await;
    let client = silent_client(&base_url, Duration::from_millis(500), 0);

    let started = Instant::now();
    let err = client.fetch("seasons.json?limit=1").await.unwrap_err();
    let elapsed = started.elapsed();

    assert!(matches!(err, UpstreamError::Request(ref e) if e.is_timeout()), "{:?}", err);
    assert!(err.is_transient());
    assert!(elapsed >= Duration::from_millis(450), "returned early: {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(1500), "took {:?}", elapsed);
    assert_eq!(connections.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_retries_stay_within_timeout() {
    let (base_url, _connections) = silent_upstream().await;
    let timeout = Duration::from_secs(1);
    let client = silent_client(&base_url, timeout, 3);

    let started = Instant::now();
    let err = client.fetch("seasons.json?limit=1").await.unwrap_err();
    let elapsed = started.elapsed();

    assert!(matches!(err, UpstreamError::Request(ref e) if e.is_timeout()), "{:?}", err);
    assert!(elapsed < timeout + Duration::from_millis(500), "took {:?}", elapsed);
}

#[tokio::test]
async fn test_retries_continue_while_time_remains() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/ergast/f1/seasons.json")
        .with_status(502)
        .expect(4)
        .create_async()
        .await;

    let client = client_for(&server, 3);
    assert!(client.fetch("seasons.json").await.is_err());
    mock.assert_async().await;
}

#[actix_web::test]
async fn test_timed_out_upstream_maps_to_503_and_unhealthy() {
    let (base_url, _connections) = silent_upstream().await;
    let upstream = Arc::new(silent_client(&base_url, Duration::from_millis(300), 0));

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::new(upstream)))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/seasons/2023/races").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["detail"].as_str().unwrap().starts_with("Error accessing Ergast F1 API"));

    let started = Instant::now();
    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["external_api"]["ergast_f1_api"], "unhealthy");
}
