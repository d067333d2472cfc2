//! Request pipeline middleware.
//!
//! Outermost to innermost, per request:
//!
//! ```text
//! correlation.rs  assign ID, install ambient RequestContext
//! TraceLayer      `request` span (built by correlation::request_span), access log
//! recover.rs      turn handler panics into ApiError::Unexpected
//! validate.rs     per-route schema check, short-circuits with 400
//! handler
//! ```

pub mod correlation;
pub mod recover;
pub mod validate;

pub use correlation::{attach_correlation_id, request_span, RequestContext, X_CORRELATION_ID};
pub use recover::catch_panics;
pub use validate::{validate_request, Fields, ValidatedBody, ValidatedQuery, Validator};
