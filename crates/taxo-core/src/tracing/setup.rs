//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the taxo tracing/logging system.
///
/// Reads `TAXO_LOG` environment variable for per-subsystem log levels.
/// Format: `TAXO_LOG=classifier=debug,profile=info,drift=warn`
///
/// Falls back to `taxo=info` if `TAXO_LOG` is not set or is invalid.
///
/// This function is idempotent — calling it multiple times is safe.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("TAXO_LOG")
            .unwrap_or_else(|_| EnvFilter::new("taxo=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .init();
    });
}
