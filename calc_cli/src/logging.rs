//! Diagnostic logging to stderr, so stdout stays machine readable.
//!
//! `LOADLINE_LOG` sets the filter directive (e.g. `debug`,
//! `calc_core=debug`); when unset `RUST_LOG` is honoured, finally defaulting
//! to `warn`.

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Registry;

use crate::config::LogFormat;

const LOG_ENV: &str = "LOADLINE_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

pub fn init(format: LogFormat) {
    let filter = match std::env::var(LOG_ENV) {
        Ok(directive) => EnvFilter::try_new(&directive).unwrap_or_else(|err| {
            eprintln!("invalid {} directive ({}); defaulting to {}", LOG_ENV, err, DEFAULT_DIRECTIVE);
            EnvFilter::new(DEFAULT_DIRECTIVE)
        }),
        Err(_) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
    };

    let fmt_layer = match format {
        LogFormat::Text => fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    if let Err(err) = Registry::default().with(filter).with(fmt_layer).try_init() {
        eprintln!("log subscriber not installed ({}); continuing without logging", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_does_not_panic() {
        init(LogFormat::Text);
        // A global subscriber is already set; the failure is reported, not raised.
        init(LogFormat::Json);
        tracing::debug!("still logging");
    }
}
