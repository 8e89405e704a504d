//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Default filter when `KEEL_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "keel=info";

/// Initialize the keel tracing/logging system.
///
/// Reads the `KEEL_LOG` environment variable for per-module log levels.
/// Format: `KEEL_LOG=keel_graph::walker=debug,keel_graph::index=info`
///
/// Falls back to `keel=info` if `KEEL_LOG` is not set or is invalid.
/// Idempotent.
pub fn init_tracing() {
    init_tracing_with_default(DEFAULT_FILTER);
}

/// Same as [`init_tracing`] with a caller-chosen fallback filter.
pub fn init_tracing_with_default(default_filter: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("KEEL_LOG")
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        // Output goes to stderr so stdout stays clean for package lists.
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();
    });
}
