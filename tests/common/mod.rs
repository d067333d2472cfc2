//! Shared helpers for router-level and server-level tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use ping_service::config::{Environment, ServiceConfig};
use ping_service::HttpServer;
use serde_json::Value;
use tower::ServiceExt;

/// Decoded response parts.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!("body is not JSON ({e}): {}", String::from_utf8_lossy(&self.body))
        })
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn correlation_id(&self) -> String {
        self.headers
            .get("x-correlation-id")
            .expect("x-correlation-id header missing")
            .to_str()
            .unwrap()
            .to_string()
    }
}

pub fn test_config() -> ServiceConfig {
    ServiceConfig {
        environment: Environment::Test,
        ..ServiceConfig::default()
    }
}

/// The service's router as built for production.
pub fn app() -> Router {
    HttpServer::new(test_config()).router()
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body")
        .to_vec();
    TestResponse { status, headers, body }
}

pub async fn get(app: Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_raw(app: Router, uri: &str, body: impl Into<Body>) -> TestResponse {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> TestResponse {
    post_raw(app, uri, body.to_string()).await
}

/// Assert the standard validation failure shape and return `error.details`.
pub fn assert_validation_error(response: &TestResponse) -> Vec<Value> {
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let body = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["message"], "Bad Request");
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body.get("data").is_none());
    body["error"]["details"]
        .as_array()
        .expect("details must be an array")
        .clone()
}
