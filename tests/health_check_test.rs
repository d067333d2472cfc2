use axum::http::StatusCode;

mod common;

use common::{app, get};

#[tokio::test]
async fn health_check_reports_up() {
    let response = get(app(), "/health").await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Server is healthy");
    assert_eq!(body["status"], "UP");
    assert!(body["uptime"].as_f64().unwrap() >= 0.0);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn liveness_probe_answers_ok() {
    let response = get(app(), "/ping/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), "OK");
    assert!(response.headers["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
}

#[tokio::test]
async fn liveness_probe_ignores_query() {
    let response = get(app(), "/ping/health?delay=abc").await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn uptime_is_not_reset_by_a_new_router() {
    let _ = get(app(), "/health").await;
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let body = get(app(), "/health").await.json();
    assert!(body["uptime"].as_f64().unwrap() >= 0.05, "uptime reset: {body}");
}
