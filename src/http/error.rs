//! Error normalization.
//!
//! Every failure leaving a handler is an [`ApiError`]. Converting it into a
//! response is the only place error envelopes are built:
//!
//! ```text
//! ApiError::Application(AppError) → status, message and name preserved
//! ApiError::Unexpected(..)        → 500, fixed message, details logged only
//! ```
//!
//! Both arms log with the request's method and URL taken from the ambient
//! request context.

use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use axum::{
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::http::middleware::correlation::{self, RequestContext};
use crate::http::response::{codes, messages, ApiResponse};

/// A domain error carrying the HTTP status it should be answered with.
#[derive(Debug)]
pub struct AppError {
    status: u16,
    name: Cow<'static, str>,
    message: String,
    backtrace: Backtrace,
}

impl AppError {
    /// `status` outside 400..=599 is answered as 500.
    pub fn new(
        status: u16,
        name: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            name: name.into(),
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// `400 BadRequestError`.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, "BadRequestError", message)
    }

    /// `404 NotFound`.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, "NotFound", message)
    }

    /// `409 ConflictError`, e.g. a duplicate resource.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(409, "ConflictError", message)
    }

    /// `405 MethodNotAllowed` naming the rejected method.
    pub fn method_not_allowed(method: &Method) -> Self {
        Self::new(405, "MethodNotAllowed", format!("{} {method}", messages::METHOD_NOT_ALLOWED))
    }

    /// The status that will be sent.
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status)
            .ok()
            .filter(|s| s.is_client_error() || s.is_server_error())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Error name, sent as `error.code`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Client-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

impl StdError for AppError {}

/// Failure channel of every handler and middleware.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Application(#[from] AppError),

    #[error("unexpected error: {0}")]
    Unexpected(Box<dyn StdError + Send + Sync>),
}

impl ApiError {
    /// Wrap any error as an unexpected failure; its text is logged, never sent.
    pub fn unexpected(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        ApiError::Unexpected(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let request = correlation::current();
        let envelope = match self {
            ApiError::Application(err) => application_error(&err, request.as_ref()),
            ApiError::Unexpected(err) => unexpected_error(err.as_ref(), request.as_ref()),
        };
        envelope.into_response()
    }
}

fn request_line(request: Option<&RequestContext>) -> (String, String) {
    match request {
        Some(ctx) => (ctx.uri().to_string(), ctx.method().to_string()),
        None => ("-".to_string(), "-".to_string()),
    }
}

fn application_error(err: &AppError, request: Option<&RequestContext>) -> ApiResponse {
    let status = err.status();
    let (url, method) = request_line(request);

    tracing::error!(
        error_message = %err.message,
        status_code = status.as_u16(),
        error_name = %err.name,
        backtrace = %err.backtrace,
        url = %url,
        method = %method,
        "Application error"
    );

    let message = if err.message.is_empty() {
        messages::INTERNAL_ERROR
    } else {
        err.message.as_str()
    };

    ApiResponse::failure(status, message, err.name(), None)
}

fn unexpected_error(
    err: &(dyn StdError + Send + Sync),
    request: Option<&RequestContext>,
) -> ApiResponse {
    let (url, method) = request_line(request);

    tracing::error!(
        error_message = %err,
        error_debug = ?err,
        status_code = StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        url = %url,
        method = %method,
        "Unexpected error"
    );

    ApiResponse::failure(
        StatusCode::INTERNAL_SERVER_ERROR,
        messages::INTERNAL_ERROR,
        codes::INTERNAL_SERVER_ERROR,
        None,
    )
}

/// Router fallback for paths with no route.
pub async fn not_found(uri: Uri) -> ApiError {
    AppError::not_found(format!("Cannot resolve {}", uri.path())).into()
}

/// Fallback for a known path requested with an unsupported method.
pub async fn method_not_allowed(method: Method) -> ApiError {
    AppError::method_not_allowed(&method).into()
}
