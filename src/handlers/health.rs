//! Health check handlers.
//!
//! `/health` reports status and uptime as JSON. `/ping/health` is the bare
//! liveness probe: if the process can answer at all, it answers `OK`.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::handlers::iso_timestamp;
use crate::http::server::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Up,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub success: bool,
    pub message: &'static str,
    pub status: HealthStatus,
    pub timestamp: String,
    /// Seconds since the process started.
    pub uptime: f64,
}

/// `GET /health`
pub async fn health_check(State(state): State<AppState>) -> Json<HealthReport> {
    tracing::debug!("Performing health check");

    Json(HealthReport {
        success: true,
        message: "Server is healthy",
        status: HealthStatus::Up,
        timestamp: iso_timestamp(),
        uptime: state.uptime().as_secs_f64(),
    })
}

/// `GET /ping/health`
pub async fn liveness_check() -> &'static str {
    "OK"
}
