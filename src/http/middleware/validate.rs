//! Schema validation middleware.
//!
//! A [`Validator`] pairs a [`Schema`] with the request [`Source`] it checks.
//! Installed with `from_fn_with_state(validator, validate_request)`, it runs
//! before the handler and either:
//!
//! - passes the request on, with the coerced fields stored as a
//!   [`ValidatedQuery`] or [`ValidatedBody`] extension, or
//! - answers `400` with `error.code = "VALIDATION_ERROR"` and one
//!   `{path, message}` detail per violated field, without calling the handler.

use std::ops::Deref;
use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, FromRequestParts, Query, Request, State},
    http::{request::Parts, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::{map::Entry, Map, Value};

use crate::http::error::{ApiError, AppError};
use crate::http::response::{codes, messages, ApiResponse};
use crate::validation::{RouteSchema, Schema, Source, Violation};

/// Largest request body the validator buffers; larger bodies get `413`.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// A schema bound to the request source it checks; the state of [`validate_request`].
#[derive(Debug, Clone)]
pub struct Validator {
    schema: Arc<Schema>,
    source: Source,
}

impl Validator {
    /// Create a validator checking `source` against `schema`.
    pub fn new(schema: impl Into<Arc<Schema>>, source: Source) -> Self {
        Self { schema: schema.into(), source }
    }
}

impl From<&RouteSchema> for Validator {
    fn from(entry: &RouteSchema) -> Self {
        Self::new(Arc::clone(&entry.schema), entry.source)
    }
}

/// Coerced field values produced by a successful validation.
#[derive(Debug, Clone, Default)]
pub struct Fields(Arc<Map<String, Value>>);

impl Fields {
    /// Raw coerced value of a declared field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Field as a string, if present and a string.
    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Field as an integer, if present and integral.
    pub fn i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }
}

impl From<Map<String, Value>> for Fields {
    fn from(map: Map<String, Value>) -> Self {
        Self(Arc::new(map))
    }
}

/// Validated query parameters, available to handlers behind a query validator.
#[derive(Debug, Clone)]
pub struct ValidatedQuery(pub Fields);

/// Validated JSON body fields, available to handlers behind a body validator.
#[derive(Debug, Clone)]
pub struct ValidatedBody(pub Fields);

impl Deref for ValidatedQuery {
    type Target = Fields;

    fn deref(&self) -> &Fields {
        &self.0
    }
}

impl Deref for ValidatedBody {
    type Target = Fields;

    fn deref(&self) -> &Fields {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ValidatedQuery {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(|| ApiError::unexpected("route has no query validator installed"))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ValidatedBody {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(|| ApiError::unexpected("route has no body validator installed"))
    }
}

/// Middleware body for `from_fn_with_state(validator, validate_request)`.
pub async fn validate_request(
    State(validator): State<Validator>,
    request: Request,
    next: Next,
) -> Response {
    match validator.source {
        Source::Query => {
            let input = query_value(request.uri());
            match validator.schema.validate(&input) {
                Ok(fields) => {
                    let mut request = request;
                    request.extensions_mut().insert(ValidatedQuery(fields.into()));
                    next.run(request).await
                }
                Err(violations) => reject(&validator, violations),
            }
        }
        Source::Body => {
            let (mut parts, body) = request.into_parts();
            let bytes = match buffer_body(&parts, body).await {
                Ok(bytes) => bytes,
                Err(err) => return ApiError::from(err).into_response(),
            };

            let result = body_value(&bytes).and_then(|input| validator.schema.validate(&input));
            match result {
                Ok(fields) => {
                    parts.extensions.insert(ValidatedBody(fields.into()));
                    next.run(Request::from_parts(parts, Body::from(bytes))).await
                }
                Err(violations) => reject(&validator, violations),
            }
        }
    }
}

/// Read the whole body, honoring the route's `DefaultBodyLimit`.
async fn buffer_body(parts: &Parts, body: Body) -> Result<Bytes, AppError> {
    let mut buffering = Request::new(body);
    *buffering.extensions_mut() = parts.extensions.clone();

    Bytes::from_request(buffering, &()).await.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Failed to buffer request body");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::new(
                StatusCode::PAYLOAD_TOO_LARGE.as_u16(),
                "PayloadTooLarge",
                format!("Request body exceeds {MAX_BODY_BYTES} bytes"),
            )
        } else {
            AppError::bad_request("Unable to read request body")
        }
    })
}

/// Query string as a JSON object of strings; repeated keys become arrays.
fn query_value(uri: &Uri) -> Value {
    let pairs = match Query::<Vec<(String, String)>>::try_from_uri(uri) {
        Ok(Query(pairs)) => pairs,
        Err(e) => {
            tracing::debug!(error = %e, "Unparseable query string treated as empty");
            Vec::new()
        }
    };

    let mut object = Map::new();
    for (key, value) in pairs {
        match object.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(Value::String(value));
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                Value::Array(values) => values.push(Value::String(value)),
                existing => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, Value::String(value)]);
                }
            },
        }
    }
    Value::Object(object)
}

/// An absent body validates as `{}`.
fn body_value(bytes: &Bytes) -> Result<Value, Vec<Violation>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(bytes)
        .map_err(|e| vec![Violation::new("", format!("Malformed JSON: {e}"))])
}

fn reject(validator: &Validator, violations: Vec<Violation>) -> Response {
    tracing::debug!(
        schema = validator.schema.name(),
        source = validator.source.as_str(),
        violations = violations.len(),
        "Request failed validation"
    );

    ApiResponse::<Value>::failure(
        StatusCode::BAD_REQUEST,
        messages::BAD_REQUEST,
        codes::VALIDATION_ERROR,
        serde_json::to_value(&violations).ok(),
    )
    .into_response()
}
