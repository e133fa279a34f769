//! Logging
//!
//! Installs the `tracing` subscriber for the `tuixc` binary. Output goes to stderr so it never
//! mixes with JSON diagnostics on stdout.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `tui_xaml_compiler=trace`.
pub const LOG_ENV: &str = "TUIXC_LOG";

pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Safe to call more than once; later calls keep the first subscriber.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
