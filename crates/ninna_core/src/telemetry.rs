//! Tracing subscriber setup shared by binaries and tests.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Filter level comes from `RUST_LOG`, defaulting to `info`. Safe to
/// call more than once; later calls are no-ops, which keeps tests that
/// each initialize logging from panicking.
pub fn init_telemetry() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}
