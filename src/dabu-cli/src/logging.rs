//! Log output for the command-line tools
//!
//! Logs go to stderr so listings on stdout stay machine-readable.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable that switches on debug output
pub const DEBUG_ENV: &str = "dabu_debug";

/// Default filter directive when `RUST_LOG` is unset
fn default_directive(debug: bool) -> &'static str {
    if debug {
        "dabu=debug,dabu_cli=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber
pub fn init() {
    let debug = std::env::var_os(DEBUG_ENV).is_some();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
