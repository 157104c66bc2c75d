//! Diagnostic logging: `tracing` to stderr, filter from the environment.
//!
//! Stdout carries the user-facing progress output and the audit trail lives
//! in its own file, so the subscriber stays on stderr.

use tracing_subscriber::EnvFilter;

/// Initialize the `tracing` subscriber.
///
/// The default filter is `warn`; override with `RUST_LOG`, e.g.
/// `RUST_LOG=dspace_dl=debug`.
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
