//! Minimal HTTP service: ping and health endpoints behind a request
//! validation and error-normalization pipeline.

pub mod config;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod validation;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
