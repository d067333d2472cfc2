//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, route table)
//!     → middleware/correlation.rs (correlation ID, ambient context)
//!     → TraceLayer (`request` span carrying the correlation ID)
//!     → middleware/recover.rs (panic → ApiError)
//!     → middleware/validate.rs (schema check or 400)
//!     → handler → ApiResponse | ApiError
//!     → error.rs (ApiError → error envelope)
//!     → Send to client
//! ```

pub mod error;
pub mod middleware;
pub mod response;
pub mod server;

pub use error::{ApiError, AppError};
pub use middleware::{RequestContext, X_CORRELATION_ID};
pub use response::ApiResponse;
pub use server::{AppState, HttpServer};
