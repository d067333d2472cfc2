//! The response envelope every JSON endpoint returns.
//!
//! ```text
//! { success, message, statusCode, data?, error?: { code?, details? } }
//! ```
//!
//! # Design Decisions
//! - Fields are private; constructors keep `data` and `error` mutually exclusive
//! - `statusCode` is the status actually sent, since `into_response` reads it

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Human-readable messages used across the service.
pub mod messages {
    pub const BAD_REQUEST: &str = "Bad Request";
    pub const METHOD_NOT_ALLOWED: &str = "Method Not Allowed";
    pub const INTERNAL_ERROR: &str = "Internal Server Error";
}

/// Machine-readable `error.code` values owned by the service itself.
pub mod codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
}

/// Uniform JSON wrapper for success and error responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T = Value> {
    success: bool,
    message: String,
    #[serde(serialize_with = "serialize_status")]
    status_code: StatusCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

fn serialize_status<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub fn success(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            status_code: status,
            data: Some(data),
            error: None,
        }
    }

    /// `200 OK` shortcut for [`ApiResponse::success`].
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::success(StatusCode::OK, message, data)
    }

    /// Failed response; never carries `data`.
    pub fn failure(
        status: StatusCode,
        message: impl Into<String>,
        code: impl Into<String>,
        details: Option<Value>,
    ) -> Self {
        Self {
            success: false,
            message: message.into(),
            status_code: status,
            data: None,
            error: Some(ErrorBody { code: Some(code.into()), details }),
        }
    }

    /// Whether this is a success envelope.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Status the response is sent with.
    pub fn status(&self) -> StatusCode {
        self.status_code
    }

    /// Top-level `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Payload of a success envelope.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// `error` of a failure envelope.
    pub fn error(&self) -> Option<&ErrorBody> {
        self.error.as_ref()
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_omits_error() {
        let envelope = ApiResponse::ok("Pong!", json!({ "timestamp": "now" }));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "message": "Pong!",
                "statusCode": 200,
                "data": { "timestamp": "now" }
            })
        );
    }

    #[test]
    fn failure_omits_data_and_empty_details() {
        let envelope: ApiResponse =
            ApiResponse::failure(StatusCode::CONFLICT, "Already exists", "ConflictError", None);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "success": false,
                "message": "Already exists",
                "statusCode": 409,
                "error": { "code": "ConflictError" }
            })
        );
        assert!(!envelope.is_success());
        assert_eq!(envelope.status(), StatusCode::CONFLICT);
        assert_eq!(envelope.message(), "Already exists");
        assert_eq!(envelope.error().and_then(|e| e.code.as_deref()), Some("ConflictError"));
        assert!(envelope.data().is_none());
    }

    #[test]
    fn sent_status_matches_status_code() {
        let envelope: ApiResponse = ApiResponse::failure(
            StatusCode::BAD_REQUEST,
            messages::BAD_REQUEST,
            codes::VALIDATION_ERROR,
            None,
        );
        let response = envelope.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()["content-type"], "application/json");
    }
}
