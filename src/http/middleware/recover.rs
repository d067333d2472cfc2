//! Async-safety wrapper around the handler stack.
//!
//! Handler failures normally travel as `Err(ApiError)` and need nothing from
//! this layer. A panic inside a handler future, before or after an `.await`,
//! is caught here and answered through [`ApiError::Unexpected`] instead of
//! tearing down the connection.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures_util::FutureExt;

use crate::http::error::ApiError;

#[derive(Debug, thiserror::Error)]
#[error("handler panicked: {message}")]
pub struct HandlerPanic {
    message: String,
}

impl HandlerPanic {
    fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self { message }
    }

    /// Panic payload rendered as text.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Answer a panicking handler with the unexpected-error envelope.
pub async fn catch_panics(request: Request, next: Next) -> Response {
    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(payload) => ApiError::unexpected(HandlerPanic::from_payload(payload)).into_response(),
    }
}
