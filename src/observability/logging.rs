//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Pick the output format for the environment
//!
//! # Design Decisions
//! - JSON format for production, pretty format for development and test
//! - `RUST_LOG` overrides the per-environment default filter

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Environment, ServiceConfig};

/// Filter used when `RUST_LOG` is unset.
pub fn default_directives(environment: Environment) -> &'static str {
    match environment {
        Environment::Production => "ping_service=info,tower_http=info",
        Environment::Development | Environment::Test => "ping_service=debug,tower_http=debug",
    }
}

/// Install the global subscriber. Call once, before serving.
pub fn init(config: &ServiceConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directives(config.environment).into());

    let registry = tracing_subscriber::registry().with(filter);

    if config.environment.is_production() {
        registry
            .with(fmt::layer().json().with_current_span(true).with_span_list(false))
            .init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
