//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Attach per-route validators from the schema registry
//! - Wire up the request pipeline (correlation, tracing, panic recovery, body limit)
//! - Route unmatched paths and methods through the error normalizer
//! - Serve until the shutdown signal, draining in-flight requests

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::DefaultBodyLimit,
    http::Method,
    middleware,
    routing::{get, post, MethodRouter},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::handlers::{health, ping};
use crate::lifecycle;
use crate::http::error;
use crate::http::middleware::validate::MAX_BODY_BYTES;
use crate::http::middleware::{
    attach_correlation_id, catch_panics, request_span, validate_request, Validator,
};
use crate::validation::SchemaRegistry;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    /// Process start, shared by every router built in this process.
    pub started_at: Instant,
}

impl AppState {
    /// Create state for `config`.
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config: Arc::new(config),
            started_at: lifecycle::process_started_at(),
        }
    }

    /// Process uptime.
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

/// HTTP server for the ping service.
pub struct HttpServer {
    router: Router,
    config: Arc<ServiceConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        let state = AppState::new(config);
        let config = Arc::clone(&state.config);
        let schemas = SchemaRegistry::builtin();

        tracing::debug!(schemas = schemas.len(), "Schema registry built");

        let router = build_router(state, &schemas);
        Self { router, config }
    }

    /// The fully layered router, e.g. for driving with `tower::ServiceExt`.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until a message arrives on `shutdown`.
    ///
    /// After the signal no new connections are accepted; requests already in
    /// flight run to completion before this returns.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            environment = %self.config.environment,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all routes and middleware layers.
pub fn build_router(state: AppState, schemas: &SchemaRegistry) -> Router {
    let routes = Router::new()
        .route("/ping", validated(schemas, Method::GET, "/ping", get(ping::get_ping)))
        .route("/ping", validated(schemas, Method::POST, "/ping", post(ping::post_ping)))
        .route("/ping/health", get(health::liveness_check))
        .route("/health", get(health::health_check));

    with_pipeline(routes).with_state(state)
}

/// Attach the request pipeline shared by every route.
///
/// Layers added later run first, so a request passes through correlation,
/// then tracing, then panic recovery before reaching route-level validators
/// and the handler. The trace layer's span is built from the correlation
/// context, so it has to stay inside `attach_correlation_id`.
pub fn with_pipeline<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .fallback(error::not_found)
        .method_not_allowed_fallback(error::method_not_allowed)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(catch_panics))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(middleware::from_fn(attach_correlation_id))
}

fn validated<S>(
    schemas: &SchemaRegistry,
    method: Method,
    path: &'static str,
    route: MethodRouter<S>,
) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    match schemas.lookup(&method, path) {
        Some(entry) => route.route_layer(middleware::from_fn_with_state(
            Validator::from(entry),
            validate_request,
        )),
        None => {
            tracing::warn!(method = %method, path, "No schema registered, route left unvalidated");
            route
        }
    }
}
