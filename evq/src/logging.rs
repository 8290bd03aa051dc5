//! Diagnostic logging setup.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing on stderr, filtered by RUST_LOG (default: warn).
///
/// Stdout is left for command output.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}
