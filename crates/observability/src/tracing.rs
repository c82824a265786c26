//! Tracing/logging initialization.
//!
//! One JSON object per line, so the function's log group stays queryable.
//! Each line carries the current span, which holds the invocation id.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Build the JSON subscriber without installing it.
///
/// Tests scope it with `tracing::subscriber::with_default`.
pub fn subscriber() -> impl ::tracing::Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .finish()
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let _ = ::tracing::subscriber::set_global_default(subscriber());
}
