//! Sets up logging for the command line app.
//!
//! Logs are written to stderr so they never mix with table or CSV output on stdout.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// The default filter directive for a verbosity level given by repeated `-v` flags.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the level picked from `verbosity`. Calling this more
/// than once keeps the first subscriber.
pub fn setup_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    if let Err(error) = tracing_subscriber::registry().with(stderr_log).try_init() {
        tracing::debug!("Logging was already set up: {error}");
    }
}
