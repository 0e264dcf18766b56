//! Logging initialisation (tracing + tracing-subscriber)
//!
//! Diagnostics go to stderr so tables and CSV on stdout stay pipeable.
//! `RUST_LOG` wins over the verbosity flags when set.

use tracing_subscriber::{fmt, EnvFilter};

/// Default filter directive for a verbosity level
pub fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "maintwatch=debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .without_time()
        .try_init();
}
