//! Log output for the command-line tool

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset
pub const fn default_filter(quiet: bool) -> &'static str {
    if quiet { "warn" } else { "info" }
}

/// Install a stderr subscriber honouring `RUST_LOG`
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_logging(quiet: bool) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
