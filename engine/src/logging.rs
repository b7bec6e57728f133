//! Logger setup for hosts and demos.
//!
//! The library itself only emits through the `log` facade; binaries call
//! [`init`] once at startup. `RUST_LOG` overrides the default level.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Install the global logger.
///
/// `verbose` lowers the default filter from info to debug.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // Already installed (tests, embedding hosts)
    let _ = builder.try_init();
}
