//! Route handlers.
//!
//! Handlers are leaf functions: inputs arrive already validated through the
//! `Validated*` extractors and failures are returned as `ApiError`.

pub mod health;
pub mod ping;

use chrono::{SecondsFormat, Utc};

/// Current time as ISO-8601 with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
