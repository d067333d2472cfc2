//! Request validation subsystem.
//!
//! # Data Flow
//! ```text
//! startup:
//!     registry.rs builds Schema per (method, path)
//!     → http::server wraps each route with a validator
//!
//! per request:
//!     raw query / JSON body as serde_json::Value
//!     → schema.rs Schema::validate
//!     → Ok(coerced fields) | Err(ordered violations)
//! ```
//!
//! # Design Decisions
//! - Validation is a pure function returning a sum type, never panics
//! - One violation per field, in declaration order
//! - Transforms (string → integer) run before the constraints that follow them

pub mod registry;
pub mod schema;

pub use registry::{RouteSchema, SchemaRegistry, Source};
pub use schema::{Field, Presence, Schema, Step, ValueType, Violation};
