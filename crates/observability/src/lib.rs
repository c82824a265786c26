//! Structured logging setup shared by the function binary and tests.

/// Install the process-wide JSON subscriber.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init();
}

pub use self::tracing::{DEFAULT_FILTER, subscriber};

/// Subscriber construction (filter, JSON layout).
pub mod tracing;
