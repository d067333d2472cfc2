//! Ping endpoints.

use serde::Serialize;

use crate::handlers::iso_timestamp;
use crate::http::middleware::{ValidatedBody, ValidatedQuery};
use crate::http::response::ApiResponse;

pub const PONG: &str = "Pong!";

#[derive(Debug, Clone, Serialize)]
pub struct PingData {
    pub timestamp: String,
}

/// `GET /ping?name=&delay=`
pub async fn get_ping(query: ValidatedQuery) -> ApiResponse<PingData> {
    tracing::info!(name = query.str("name"), delay = query.i64("delay"), "Ping request received");

    ApiResponse::ok(PONG, PingData { timestamp: iso_timestamp() })
}

/// `POST /ping` with `{ "message"?: string }`
pub async fn post_ping(body: ValidatedBody) -> ApiResponse<PingData> {
    tracing::info!(ping_message = body.str("message"), "Ping message received");

    ApiResponse::ok(PONG, PingData { timestamp: iso_timestamp() })
}
