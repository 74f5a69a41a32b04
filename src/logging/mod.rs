//! Tracing setup for the command-line binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Respects `RUST_LOG` when set, otherwise falls back to a crate-scoped
/// default. Logs go to stderr so stdout carries only the result line.
///
/// Should be called once at startup.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbose)));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn filter_directive(verbose: bool) -> &'static str {
    if verbose {
        "tagwrap=debug,info"
    } else {
        "tagwrap=info,warn"
    }
}
