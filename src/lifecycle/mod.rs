//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Mark process start → Load config → Validate (abort on error)
//!         → Init logging → Bind → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain in-flight requests → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```

pub mod shutdown;
pub mod signals;

use std::sync::OnceLock;
use std::time::{Duration, Instant};

pub use shutdown::Shutdown;

static PROCESS_START: OnceLock<Instant> = OnceLock::new();

/// When the process started. `main` calls this first thing; any later call
/// returns the same instant.
pub fn process_started_at() -> Instant {
    *PROCESS_START.get_or_init(Instant::now)
}

/// Time since [`process_started_at`].
pub fn process_uptime() -> Duration {
    process_started_at().elapsed()
}
