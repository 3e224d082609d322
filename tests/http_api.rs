//! End-to-end tests of the HTTP transport.

use region_check::check::{LabelSet, PredicateKind};
use region_check::config::ServiceConfig;
use reqwest::StatusCode;
use serde_json::Value;

mod common;

fn keys(body: &str) -> Vec<String> {
    // serde_json::Value sorts keys, so read them in wire order.
    let map: serde_json::Map<String, Value> = serde_json::from_str(body).unwrap();
    let mut keys: Vec<(usize, String)> = map
        .keys()
        .map(|k| (body.find(&format!("\"{}\":", k)).unwrap(), k.clone()))
        .collect();
    keys.sort();
    keys.into_iter().map(|(_, k)| k).collect()
}

#[tokio::test]
async fn test_post_hit() {
    let server = common::start_server(ServiceConfig::default()).await;
    let res = common::client()
        .post(server.url("/calculate"))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("x=1&y=1&r=3")
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert!(res.headers().contains_key("x-request-id"));

    let body = res.text().await.unwrap();
    assert!(body.starts_with(r#"{"x":1.00,"y":1.00,"r":3.00,"hit":true,"currentTime":""#), "{}", body);
    assert_eq!(
        keys(&body),
        ["x", "y", "r", "hit", "currentTime", "executionTime"]
    );
}

#[tokio::test]
async fn test_get_query() {
    let server = common::start_server(ServiceConfig::default()).await;
    let json: Value = common::client()
        .get(server.url("/calculate?x=-1&y=1&r=10"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["hit"], false);
}

#[tokio::test]
async fn test_missing_parameter_is_bad_request() {
    let server = common::start_server(ServiceConfig::default()).await;
    let res = common::client()
        .post(server.url("/calculate"))
        .body("x=1&y=2")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.text().await.unwrap();
    assert_eq!(keys(&body), ["error", "executionTime"]);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "Missing parameter 'r'.");
    assert!(json["executionTime"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn test_empty_body_and_query() {
    let server = common::start_server(ServiceConfig::default()).await;
    let client = common::client();

    let res = client.post(server.url("/calculate")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json: Value = res.json().await.unwrap();
    assert_eq!(json["error"], "No POST data received.");

    let res = client.get(server.url("/calculate")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json: Value = res.json().await.unwrap();
    assert_eq!(json["error"], "No query data received.");
}

#[tokio::test]
async fn test_malformed_number_never_crashes() {
    let server = common::start_server(ServiceConfig::default()).await;
    let client = common::client();

    for body in ["x=abc&y=1&r=1", "x=%ZZ&y=1&r=1", "x=NaN&y=1&r=1"] {
        let res = client
            .post(server.url("/calculate"))
            .body(body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{}", body);
    }

    // Still serving afterwards.
    let res = client
        .post(server.url("/calculate"))
        .body("x=0&y=0&r=1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_triangle_deployment_labels() {
    let mut config = ServiceConfig::default();
    config.service.predicate = PredicateKind::TriangleExistence;
    config.service.timing.include_on_failure = false;
    let server = common::start_server(config).await;
    let client = common::client();

    let body = client
        .post(server.url("/calculate"))
        .body("x=3&y=4&r=5")
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(keys(&body), ["x", "y", "r", "result", "currentTime", "time"]);
    assert!(body.contains(r#""result":"Exists""#));

    let body = client
        .post(server.url("/calculate"))
        .body("x=3&y=4")
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, r#"{"error":"Missing parameter 'r'."}"#);
}

#[tokio::test]
async fn test_explicit_labels_override_predicate_default() {
    let mut config = ServiceConfig::default();
    config.service.labels = Some(LabelSet::Result);
    let server = common::start_server(config).await;

    let json: Value = common::client()
        .get(server.url("/calculate?x=1&y=1&r=3"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["result"], "Exists");
    assert!(json.get("time").is_some());
}

#[tokio::test]
async fn test_body_limit() {
    let mut config = ServiceConfig::default();
    config.security.max_body_size = 16;
    let server = common::start_server(config).await;

    let res = common::client()
        .post(server.url("/calculate"))
        .body(format!("x=1&y=1&r=3&pad={}", "a".repeat(64)))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = common::start_server(ServiceConfig::default()).await;
    let res = common::client()
        .get(server.url("/calculate?x=1&y=1&r=3"))
        .header("x-request-id", "abc-123")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "abc-123");
}

#[tokio::test]
async fn test_health() {
    let server = common::start_server(ServiceConfig::default()).await;
    let json: Value = common::client()
        .get(server.url("/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_static_fallback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>region</h1>").unwrap();

    let mut config = ServiceConfig::default();
    config.service.static_dir = Some(dir.path().to_string_lossy().into_owned());
    let server = common::start_server(config).await;

    let res = common::client()
        .get(server.url("/index.html"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "<h1>region</h1>");
}
