//! Diagnostic logging for the experiment binaries.
//!
//! Experiment output goes to stdout; log events go to stderr so the two
//! never interleave in a redirected trace.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a `-v` count.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `verbose` when set. Calling this twice is harmless;
/// the second call leaves the first subscriber in place.
pub fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
