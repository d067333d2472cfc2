//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events inside the per-request `request` span
//!       (correlation_id, method, uri attached by http::middleware::correlation)
//!
//! Consumers:
//!     → logging.rs subscriber → stdout (pretty or JSON)
//! ```

pub mod logging;
