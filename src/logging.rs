//! Tracing subscriber setup for the binary
//!
//! `RUST_LOG` takes precedence; otherwise the `log_filter` from settings
//! applies. Events go to stderr so command output on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Build the filter from `RUST_LOG`, falling back to `fallback`
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber
///
/// Safe to call more than once; later calls are no-ops.
pub fn init(fallback: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(fallback))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
