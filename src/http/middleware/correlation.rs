//! Per-request correlation IDs.
//!
//! # Responsibilities
//! - Generate a fresh correlation ID for every inbound request
//! - Make it (with method and URI) available to all code running inside the
//!   request's future via a tokio task-local, without threading parameters
//! - Build the `request` span the trace layer opens, so every log line of the
//!   request (including tower-http's request/response lines) carries the ID
//! - Echo the ID on the response as `x-correlation-id`
//!
//! # Design Decisions
//! - The request itself is never mutated; the task-local is the only carrier
//! - The context lives exactly as long as the request future, so requests
//!   multiplexed on one worker cannot observe each other's IDs
//! - Tasks spawned from a handler do not inherit the context; wrap them with
//!   [`RequestContext::scope`] to propagate it
//! - [`attach_correlation_id`] must sit outside the trace layer: the span is
//!   made while the context is already installed

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue, Method, Uri},
    middleware::Next,
    response::Response,
};
use rand::Rng;
use tracing::Span;

pub const X_CORRELATION_ID: HeaderName = HeaderName::from_static("x-correlation-id");

/// Length of generated IDs. With a 64-symbol alphabet this is 126 random bits.
pub const CORRELATION_ID_LEN: usize = 21;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

tokio::task_local! {
    static REQUEST_CONTEXT: RequestContext;
}

/// Ambient data for one in-flight request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    correlation_id: Arc<str>,
    method: Method,
    uri: Uri,
}

impl RequestContext {
    /// Context with a freshly generated correlation ID.
    pub fn new(method: Method, uri: Uri) -> Self {
        Self::with_id(generate_correlation_id(), method, uri)
    }

    /// Context with a caller-chosen ID, e.g. to carry an existing one into a spawned task.
    pub fn with_id(correlation_id: impl Into<Arc<str>>, method: Method, uri: Uri) -> Self {
        Self { correlation_id: correlation_id.into(), method, uri }
    }

    /// The request's correlation ID.
    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    /// Method of the request.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// URI of the request, including the query string.
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Run `fut` with this context installed as the ambient one.
    pub async fn scope<F: Future>(self, fut: F) -> F::Output {
        REQUEST_CONTEXT.scope(self, fut).await
    }
}

/// The context of the request currently executing, if any.
pub fn current() -> Option<RequestContext> {
    REQUEST_CONTEXT.try_with(Clone::clone).ok()
}

/// Correlation ID of the request currently executing, if any.
pub fn current_correlation_id() -> Option<String> {
    REQUEST_CONTEXT.try_with(|ctx| ctx.correlation_id.to_string()).ok()
}

/// URL-safe random ID, nanoid-style.
pub fn generate_correlation_id() -> String {
    let mut rng = rand::thread_rng();
    (0..CORRELATION_ID_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Install a fresh [`RequestContext`] around the rest of the pipeline and
/// echo its ID on the response.
pub async fn attach_correlation_id(request: Request, next: Next) -> Response {
    let context = RequestContext::new(request.method().clone(), request.uri().clone());
    let correlation_id = Arc::clone(&context.correlation_id);

    let mut response = context.scope(next.run(request)).await;

    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        response.headers_mut().insert(X_CORRELATION_ID, value);
    }
    response
}

/// Span factory for `TraceLayer::make_span_with`.
///
/// Called inside the scope [`attach_correlation_id`] installs, so the span
/// (and the trace layer's own events recorded in it) carries the ID.
pub fn request_span(request: &Request) -> Span {
    let correlation_id = current_correlation_id().unwrap_or_default();
    tracing::info_span!(
        "request",
        correlation_id = %correlation_id,
        method = %request.method(),
        uri = %request.uri(),
    )
}
