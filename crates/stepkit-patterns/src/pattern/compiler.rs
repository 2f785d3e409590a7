//! Convert lexed tokens into anchored regular-expression sources.
//!
//! Each token is already an isolated construct, so literal text is escaped
//! token by token and DSL characters can never leak into the regex or be
//! escaped twice.

use super::lexer::lex_pattern;

/// Build the anchored regex source for a step pattern.
///
/// Argument constructs other than tables contribute one capture group each,
/// in pattern order. Optional text and alternatives use non-capturing
/// groups, and a trailing table declaration compiles to a bare `:`.
///
/// # Examples
/// ```
/// use stepkit_patterns::build_regex_from_pattern;
///
/// assert_eq!(
///     build_regex_from_pattern("I have {int} cucumber(s)"),
///     r"^I have (-?\d+) cucumber(?:s)?$"
/// );
/// ```
#[must_use]
pub fn build_regex_from_pattern(pattern: &str) -> String {
    let tokens = lex_pattern(pattern);
    let mut regex = String::with_capacity(pattern.len().saturating_mul(2) + 2);
    regex.push('^');
    for token in &tokens {
        regex.push_str(&token.piece.construct().regex_fragment());
    }
    regex.push('$');
    regex
}
