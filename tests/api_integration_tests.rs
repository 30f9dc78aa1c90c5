//! Integration Tests for API Endpoints
//!
//! Full request/response cycles through the router, in process.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use semantic_cache::{
    create_router, AppState, CacheSettings, ManualClock, MemoryStore, SemanticCache,
};

// == Helper Functions ==

fn create_test_app() -> Router {
    let cache = SemanticCache::new(
        &CacheSettings::default(),
        Arc::new(MemoryStore::new()),
        Arc::new(ManualClock::new(1_700_000_000_000)),
    );
    create_router(AppState::new(cache))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// == Key Endpoint Tests ==

#[tokio::test]
async fn test_key_endpoint_is_deterministic() {
    let app = create_test_app();
    let body = r#"{"namespace":"analysis","payload":"base64-image-bytes","context":{"sheet":"M-101"}}"#;

    let first = app
        .clone()
        .oneshot(json_request("POST", "/key", body))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let first_key = body_to_json(first.into_body()).await["key"]
        .as_str()
        .unwrap()
        .to_string();

    let second = app
        .oneshot(json_request("POST", "/key", body))
        .await
        .unwrap();
    let second_key = body_to_json(second.into_body()).await["key"]
        .as_str()
        .unwrap()
        .to_string();

    assert_eq!(first_key, second_key);
    assert!(first_key.starts_with("analysis::"));
}

#[tokio::test]
async fn test_key_endpoint_rejects_empty_payload() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/key",
            r#"{"namespace":"analysis","payload":""}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

// == Set / Get Endpoint Tests ==

#[tokio::test]
async fn test_set_then_get_roundtrip() {
    let app = create_test_app();

    let set_response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/entry",
            r#"{"key":"analysis::img_42::no-ctx","data":{"components":["duct","vav"]}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(set_response.status(), StatusCode::OK);

    let get_response = app
        .oneshot(empty_request("GET", "/entry/analysis::img_42::no-ctx"))
        .await
        .unwrap();
    assert_eq!(get_response.status(), StatusCode::OK);

    let json = body_to_json(get_response.into_body()).await;
    assert_eq!(json["key"].as_str().unwrap(), "analysis::img_42::no-ctx");
    assert_eq!(json["data"]["components"][0].as_str().unwrap(), "duct");
}

#[tokio::test]
async fn test_get_missing_key_returns_404_with_error_body() {
    let app = create_test_app();

    let response = app
        .oneshot(empty_request("GET", "/entry/nothing-here"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("nothing-here"));
}

#[tokio::test]
async fn test_set_rejects_empty_key() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request("PUT", "/entry", r#"{"key":"","data":1}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// == Remove / Clear Endpoint Tests ==

#[tokio::test]
async fn test_remove_entry() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request(
            "PUT",
            "/entry",
            r#"{"key":"doomed","data":true}"#,
        ))
        .await
        .unwrap();

    let removed = app
        .clone()
        .oneshot(empty_request("DELETE", "/entry/doomed"))
        .await
        .unwrap();
    assert_eq!(removed.status(), StatusCode::OK);

    let gone = app
        .oneshot(empty_request("DELETE", "/entry/doomed"))
        .await
        .unwrap();
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_clear_resets_stats() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request("PUT", "/entry", r#"{"key":"k","data":1}"#))
        .await
        .unwrap();
    app.clone()
        .oneshot(empty_request("GET", "/entry/k"))
        .await
        .unwrap();

    let cleared = app
        .clone()
        .oneshot(empty_request("DELETE", "/entries"))
        .await
        .unwrap();
    assert_eq!(cleared.status(), StatusCode::OK);

    let stats = app.oneshot(empty_request("GET", "/stats")).await.unwrap();
    let json = body_to_json(stats.into_body()).await;
    assert_eq!(json["size"].as_u64().unwrap(), 0);
    assert_eq!(json["hits"].as_u64().unwrap(), 0);
    assert_eq!(json["misses"].as_u64().unwrap(), 0);
}

// == Stats Endpoint Tests ==

#[tokio::test]
async fn test_stats_reflect_hits_and_misses() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request("PUT", "/entry", r#"{"key":"k","data":42}"#))
        .await
        .unwrap();
    app.clone()
        .oneshot(empty_request("GET", "/entry/k"))
        .await
        .unwrap();
    app.clone()
        .oneshot(empty_request("GET", "/entry/missing"))
        .await
        .unwrap();

    let stats = app.oneshot(empty_request("GET", "/stats")).await.unwrap();
    let json = body_to_json(stats.into_body()).await;

    assert_eq!(json["hits"].as_u64().unwrap(), 1);
    assert_eq!(json["misses"].as_u64().unwrap(), 1);
    assert!((json["hit_rate"].as_f64().unwrap() - 0.5).abs() < 1e-9);
    assert_eq!(json["max_size"].as_u64().unwrap(), 100);
    assert_eq!(json["max_size_bytes"].as_u64().unwrap(), 4 * 1024 * 1024);
    assert!(json["size_bytes"].as_u64().unwrap() > 0);
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app.oneshot(empty_request("GET", "/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
}
