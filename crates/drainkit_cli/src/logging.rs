//! Subscriber setup for the `drainkit` binary.

use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise the level is `info`, or `debug` with
/// `--verbose`.
pub fn init(if_verbose: bool) {
    let c_level_default = if if_verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(c_level_default));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
