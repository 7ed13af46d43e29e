//! Diagnostic logging
//!
//! Diagnostics go to stderr through `tracing`. User-facing progress lines are
//! printed by [`crate::ui`] and are not affected by the filter.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive
pub const LOG_ENV: &str = "EZPKGM_LOG";

/// Filter used when `EZPKGM_LOG` is unset
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "ezpkgm=debug" } else { "ezpkgm=warn" }
}

/// Install the global subscriber; later calls are ignored
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
