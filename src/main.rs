//! Ping service binary.
//!
//! # Startup
//!
//! ```text
//! .env + environment ─▶ config (validated, abort on error)
//!                           │
//!                           ▼
//!                       logging init ─▶ bind listener ─▶ HttpServer::run
//!                                                           ▲
//!                            SIGINT / SIGTERM ─▶ Shutdown ──┘ (drain, exit)
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use tokio::net::TcpListener;

use ping_service::config::{self, ConfigError};
use ping_service::lifecycle;
use ping_service::observability::logging;
use ping_service::{HttpServer, Shutdown};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    lifecycle::process_started_at();

    let config = match config::load() {
        Ok(config) => config,
        Err(ConfigError::Validation(issues)) => {
            eprintln!("Environment validation failed:");
            for issue in &issues {
                eprintln!("   {issue}");
            }
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => {
            eprintln!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    logging::init(&config);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        "ping-service starting"
    );

    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.subscribe();
    let signal_task = tokio::spawn({
        let shutdown = Arc::clone(&shutdown);
        async move { shutdown.trigger_on_signal().await }
    });

    HttpServer::new(config).run(listener, server_shutdown).await?;
    signal_task.abort();

    tracing::info!("Shutdown complete");
    Ok(ExitCode::SUCCESS)
}
