//! Diagnostic logging for the command line front end.
//!
//! Logs go to stderr so stdout carries only JSON. Records emitted by the
//! pattern library through the `log` facade are forwarded to the same
//! subscriber.

use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

fn filter_from_config(config: &CliConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Initialise logging from configuration.
///
/// If a global subscriber is already installed, the existing one is kept.
pub fn init_logging(config: &CliConfig) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .try_init();
    if result.is_err() {
        tracing::trace!("logging already initialised");
    }
}
