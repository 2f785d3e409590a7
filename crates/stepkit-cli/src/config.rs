//! CLI configuration parsed from environment variables.
//!
//! Settings are read from variables prefixed with `STEPKIT_` and may be
//! overridden by command line flags.

use std::env;
use std::str::FromStr;

use crate::error::CliError;

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Warn` so command output is not drowned in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Every candidate considered while matching.
    Trace,
    /// Fallbacks and skipped definitions.
    Debug,
    /// Command lifecycle messages.
    Info,
    /// Potential problems only.
    #[default]
    Warn,
    /// Failures only.
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(CliError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub const fn as_filter_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, CliError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(CliError::InvalidConfig(format!(
            "invalid {name} value '{value}', expected true or false"
        ))),
    }
}

/// Configuration for the `stepkit` command.
///
/// # Environment Variables
///
/// - `STEPKIT_LOG_LEVEL`: log level (trace, debug, info, warn, error)
/// - `STEPKIT_PRETTY`: pretty-print JSON output when true
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log level for diagnostics written to stderr.
    pub log_level: LogLevel,
    /// Whether JSON output is indented.
    pub pretty: bool,
}

impl CliConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// Missing variables fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if a variable holds an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CliError> {
        let log_level = match lookup("STEPKIT_LOG_LEVEL") {
            Some(val) => val.parse()?,
            None => LogLevel::default(),
        };
        let pretty = match lookup("STEPKIT_PRETTY") {
            Some(val) => parse_flag("STEPKIT_PRETTY", &val)?,
            None => false,
        };
        Ok(Self { log_level, pretty })
    }

    /// Apply command line overrides, which take precedence over the
    /// environment.
    #[must_use]
    pub fn apply_overrides(mut self, log_level: Option<LogLevel>, pretty: Option<bool>) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(pretty) = pretty {
            self.pretty = pretty;
        }
        self
    }
}
