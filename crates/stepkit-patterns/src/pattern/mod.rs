//! Step-pattern lexing and compilation.

mod compiler;
pub(crate) mod handlers;
pub(crate) mod lexer;

use crate::errors::PatternError;
use regex::Regex;

pub use compiler::build_regex_from_pattern;

/// Build and compile a regular expression from a step pattern.
///
/// # Errors
/// Returns [`PatternError`] when the generated regex source cannot be
/// compiled, for example because it exceeds the regex size limit.
///
/// # Examples
/// ```
/// use stepkit_patterns::compile_regex_from_pattern;
///
/// let regex = compile_regex_from_pattern("I click on {string}").expect("pattern compiles");
/// assert!(regex.is_match(r#"I click on "ok""#));
/// assert!(!regex.is_match(r#"I click on "ok" extra"#));
/// ```
pub fn compile_regex_from_pattern(pat: &str) -> Result<Regex, PatternError> {
    let source = build_regex_from_pattern(pat);
    Regex::new(&source).map_err(PatternError::from)
}
