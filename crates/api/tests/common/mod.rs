#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use pipesense_api::auth::jwt::JwtConfig;
use pipesense_api::config::{MongoConfig, ServerConfig};
use pipesense_api::router::build_app_router;
use pipesense_api::state::AppState;
use pipesense_db::seed::seed_default_warnings;
use pipesense_db::MemoryStore;

pub const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        mongodb: MongoConfig {
            uri: "mongodb://unused".to_string(),
            database: "vibration-sensor-test".to_string(),
            connect_timeout: Duration::from_secs(1),
        },
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_expiry_hours: 24,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router over a fresh in-memory store with the
/// default warning levels seeded.
///
/// The store is returned too so tests can inspect what was persisted.
pub async fn build_test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    seed_default_warnings(store.as_ref())
        .await
        .expect("seeding should succeed");

    let config = test_config();
    let state = AppState::new(Arc::clone(&store), config.clone());
    (build_app_router(state, &config), store)
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn with_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    with_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    with_json(app, Method::PUT, uri, body).await
}

/// POST a raw, possibly malformed, JSON body.
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a sensor through the API and return its JSON.
pub async fn create_sensor(app: &Router, serial_number: &str) -> serde_json::Value {
    let response = post_json(
        app.clone(),
        "/sensors",
        serde_json::json!({
            "serial_number": serial_number,
            "location": "Pipe section 4",
            "config": { "fmax": 1000, "lor": 800, "g_max": 16, "alarm_ths": 3 },
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}
