//! Logging setup and crash reporting.
//!
//! Logs go to stderr so report output on stdout stays machine-readable.
//! `QAROI_LOG` takes a full `EnvFilter` directive (`QAROI_LOG=qa_roi=debug`);
//! without it the level follows the `-v` count.

pub mod panic_hook;

pub use panic_hook::install_panic_hook;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "QAROI_LOG";

/// Default filter directive for a `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "qa_roi=warn",
        1 => "qa_roi=info",
        2 => "qa_roi=debug",
        _ => "qa_roi=trace",
    }
}

/// Install the global subscriber. Safe to call more than once; later calls are ignored.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
