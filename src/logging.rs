//! Diagnostic logging on stderr via `tracing`.
//!
//! Level selection, first match wins:
//! 1. `--verbose`: debug for this crate
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`
//! 4. info for this crate

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("importgraph=debug")
    } else if quiet {
        EnvFilter::new("importgraph=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("importgraph=info"))
    }
}

/// Install the global subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool) {
    let no_color = std::env::var_os("NO_COLOR").is_some();
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(fmt_layer)
        .try_init();
}
