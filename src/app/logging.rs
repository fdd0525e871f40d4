//! Logging setup.
//!
//! Events go to stderr so stdout stays clean for summaries and fragments.

use tracing_subscriber::EnvFilter;

/// Default filter for a `-v` count when `RUST_LOG` is not set.
pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global fmt subscriber. Safe to call more than once.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose >= 2)
        .with_writer(std::io::stderr)
        .try_init();

    tracing::debug!(verbose, "logging initialized");
}
