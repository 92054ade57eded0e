//! Diagnostic logging via `tracing`.
//!
//! Status output for humans goes through [`crate::output::Printer`]; this
//! subscriber carries the debug trail (scan decisions, skipped markers,
//! staged files) behind `--verbose` or `RUST_LOG`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Call once, before any logging.
///
/// `verbose` wins over `quiet`; with neither, `RUST_LOG` is honoured and
/// falls back to `element=info`.
pub fn init_logger(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("element=debug")
    } else if quiet {
        EnvFilter::new("element=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("element=info"))
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time();

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
