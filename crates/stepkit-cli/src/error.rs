//! Error types for the command line front end.
//!
//! Failures while running a command are reported through `eyre` with
//! context; this type covers the settings that are validated before any
//! command runs.

use thiserror::Error;

/// Errors detected while assembling the CLI configuration.
#[derive(Debug, Error)]
pub enum CliError {
    /// An environment variable or flag holds an unusable value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
