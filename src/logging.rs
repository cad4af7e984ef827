// src/logging.rs

use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter, e.g.
/// `STOCKSIM_LOG=vaccine_stock_sim::simulation=debug`.
pub const LOG_ENV: &str = "STOCKSIM_LOG";

/// Installs the global subscriber. Safe to call more than once.
///
/// `STOCKSIM_LOG` wins when set and valid; otherwise the crate logs at
/// `info`, or `debug` when `verbose` is on.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let fallback = if verbose {
            "vaccine_stock_sim=debug"
        } else {
            "vaccine_stock_sim=info"
        };
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}
