#![forbid(unsafe_code)]

use tracing_subscriber::EnvFilter;

/// Stdout carries protocol frames only, so every log line goes to stderr.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
