//! Logging init for the command line program.
//!
//! Log lines go to stderr so they never interleave with the progress table on
//! stdout. The filter comes from `RUST_LOG` and defaults to warnings only.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Builds the filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize logging to stderr.
///
/// Does nothing if a global subscriber is already installed, so tests and
/// embedding programs can set up their own.
pub fn init() {
    let result = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();

    if result.is_ok() {
        tracing::debug!("logging initialized");
    }
}
