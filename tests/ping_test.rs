//! Ping endpoint tests.
//!
//! Covers the validation pipeline in front of `GET /ping` and `POST /ping`:
//! valid inputs reach the handler, invalid inputs are answered with a 400
//! envelope listing one detail per violated field.

use axum::http::StatusCode;
use serde_json::{json, Value};

mod common;

use common::{app, assert_validation_error, get, post_json, post_raw};

fn paths(details: &[Value]) -> Vec<&str> {
    details.iter().map(|d| d["path"].as_str().unwrap()).collect()
}

#[tokio::test]
async fn get_ping_without_query_succeeds() {
    let response = get(app(), "/ping").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers["content-type"], "application/json");

    let body = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Pong!");
    assert_eq!(body["statusCode"], 200);
    assert!(body.get("error").is_none());

    let timestamp = body["data"]["timestamp"].as_str().unwrap();
    assert!(
        chrono::DateTime::parse_from_rfc3339(timestamp).is_ok(),
        "not ISO-8601: {timestamp}"
    );
}

#[tokio::test]
async fn get_ping_with_valid_query_succeeds() {
    let response = get(app(), "/ping?name=foo&delay=250").await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["success"], true);
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn repeated_requests_differ_only_in_timestamp() {
    let mut envelopes = Vec::new();
    for _ in 0..3 {
        let mut body = get(app(), "/ping?name=foo").await.json();
        body["data"]["timestamp"] = Value::Null;
        envelopes.push(body);
    }
    assert_eq!(envelopes[0], envelopes[1]);
    assert_eq!(envelopes[1], envelopes[2]);
}

#[tokio::test]
async fn non_numeric_delay_is_rejected() {
    let response = get(app(), "/ping?delay=abc").await;
    let details = assert_validation_error(&response);

    assert_eq!(paths(&details), vec!["delay"]);
    assert_eq!(details[0]["message"], "Expected integer, received \"abc\"");
}

#[tokio::test]
async fn non_positive_delay_is_rejected() {
    for delay in ["0", "-5"] {
        let response = get(app(), &format!("/ping?delay={delay}")).await;
        let details = assert_validation_error(&response);
        assert_eq!(details[0]["path"], "delay");
        assert_eq!(details[0]["message"], "Number must be greater than 0");
    }
}

#[tokio::test]
async fn empty_name_is_rejected() {
    let response = get(app(), "/ping?name=").await;
    let details = assert_validation_error(&response);

    assert_eq!(details, vec![json!({ "path": "name", "message": "Name must not be empty" })]);
}

#[tokio::test]
async fn every_violated_field_is_reported_in_declaration_order() {
    let response = get(app(), "/ping?delay=abc&name=").await;
    let details = assert_validation_error(&response);

    assert_eq!(paths(&details), vec!["name", "delay"]);
}

#[tokio::test]
async fn repeated_query_key_is_not_a_string() {
    let response = get(app(), "/ping?name=a&name=b").await;
    let details = assert_validation_error(&response);

    assert_eq!(details[0]["message"], "Expected string, received array");
}

#[tokio::test]
async fn unknown_query_parameters_are_ignored() {
    let response = get(app(), "/ping?verbose=true").await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn post_ping_with_message_succeeds() {
    let response = post_json(app(), "/ping", json!({ "message": "hello" })).await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Pong!");
    assert!(body["data"]["timestamp"].is_string());
}

#[tokio::test]
async fn post_ping_without_body_succeeds() {
    let response = post_raw(app(), "/ping", "").await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn post_ping_with_empty_message_is_rejected() {
    let response = post_json(app(), "/ping", json!({ "message": "" })).await;
    let details = assert_validation_error(&response);

    assert_eq!(details, vec![json!({ "path": "message", "message": "Message must not be empty" })]);
}

#[tokio::test]
async fn post_ping_with_wrong_type_is_rejected() {
    let response = post_json(app(), "/ping", json!({ "message": 42 })).await;
    let details = assert_validation_error(&response);

    assert_eq!(details[0]["message"], "Expected string, received number");
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let response = post_raw(app(), "/ping", "{\"message\":").await;
    let details = assert_validation_error(&response);

    assert_eq!(details.len(), 1);
    assert_eq!(details[0]["path"], "");
}

#[tokio::test]
async fn non_object_body_is_rejected() {
    let response = post_json(app(), "/ping", json!(["message"])).await;
    let details = assert_validation_error(&response);

    assert_eq!(details[0]["message"], "Expected object, received array");
}

#[tokio::test]
async fn oversized_body_is_payload_too_large() {
    let message = "a".repeat(3 * 1024 * 1024);
    let response = post_json(app(), "/ping", json!({ "message": message })).await;
    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);

    let body = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["statusCode"], 413);
    assert_eq!(body["error"]["code"], "PayloadTooLarge");
    assert!(response.headers.contains_key("x-correlation-id"));
}
