//! Error types surfaced by the engine.
//!
//! Ordinary outcomes such as "no match" are never errors; these cover the
//! few genuinely exceptional paths.

use thiserror::Error;

/// Failure to turn a step pattern into a usable regular expression.
///
/// The lexer accepts any input, so the only failure left is the regex
/// engine rejecting the generated source, typically because it exceeds the
/// compiled size limit.
///
/// # Examples
/// ```
/// use stepkit_patterns::PatternError;
///
/// let err = PatternError::from(regex::Error::Syntax("bad".into()));
/// assert!(err.to_string().starts_with("step pattern does not compile"));
/// ```
#[derive(Debug, Error)]
pub enum PatternError {
    /// The generated regex source was rejected.
    #[error("step pattern does not compile: {0}")]
    Regex(#[from] regex::Error),
}

/// Error returned when parsing a [`StepKeyword`](crate::StepKeyword) fails.
///
/// Holds the unrecognised keyword text, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid step keyword: {0}")]
pub struct StepKeywordParseError(pub String);
