//! Tracing subscriber setup.
//!
//! Library code only emits `tracing` events; the binary decides where they go.
//! Events are written to stderr so they never mix with session output.
//!
//! The filter is picked from, in order:
//! 1. the `JOBTRACK_LOG` environment variable,
//! 2. the configured `log-level`,
//! 3. the `-v` count (`warn`, `info`, `debug`, then `trace`).

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "JOBTRACK_LOG";

pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn resolve_filter(configured: Option<&str>, verbosity: u8) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return filter;
    }
    configured
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(level_for_verbosity(verbosity)))
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init_logging(configured: Option<&str>, verbosity: u8) {
    let subscriber = tracing_subscriber::registry()
        .with(resolve_filter(configured, verbosity))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false));

    let _ = subscriber.try_init();
}

/// Routes events through the test harness's captured output.
pub fn init_for_tests() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
