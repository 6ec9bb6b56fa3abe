//! Diagnostic logging setup.
//!
//! Library code emits `tracing` events; only the binary installs a
//! subscriber. Events go to stderr so they never mix with a JSON report on
//! stdout.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub fn default_log_filter(verbose: bool) -> &'static str {
    if verbose {
        "warn,pdfsplice=debug"
    } else {
        "warn"
    }
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `verbose`. Calling this more than once is harmless;
/// later calls leave the first subscriber in place.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
