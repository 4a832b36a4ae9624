//! Tracing subscriber setup for the CLI.

use tracing_subscriber::EnvFilter;

pub(crate) fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
