//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional) + process environment
//!     → loader.rs (collect raw NODE_ENV / PORT / HOST)
//!     → validation.rs (semantic checks, every issue collected)
//!     → ServiceConfig (validated, immutable)
//!     → shared via Arc to the HTTP layer
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup and never reloaded
//! - Every field has a default so an empty environment is valid
//! - Invalid values abort startup with the full list of issues

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{from_vars, load, ConfigError};
pub use schema::{Environment, ServiceConfig};
pub use validation::ConfigIssue;
