//! Argument extraction from step patterns.

use crate::pattern::handlers::Piece;
use crate::pattern::lexer::{Token, ends_with_table, lex_pattern};
use crate::types::ArgumentDefinition;

/// Argument definitions in the order their constructs appear.
///
/// A pattern ending in a data-table declaration yields only the table
/// argument: table rows replace every inline value of the step.
///
/// # Examples
/// ```
/// use stepkit_patterns::{ArgType, parse_args};
///
/// let args = parse_args("^I am logged in as (manager|seller)$");
/// assert_eq!(args.len(), 1);
/// assert_eq!(args[0].arg_type, ArgType::Enum);
/// assert_eq!(args[0].enum_values(), ["manager", "seller"]);
/// ```
#[must_use]
pub fn parse_args(pattern: &str) -> Vec<ArgumentDefinition> {
    let tokens = lex_pattern(pattern);
    if ends_with_table(&tokens) {
        return tokens
            .iter()
            .filter(|token| matches!(token.piece, Piece::Table(_)))
            .find_map(|token| token.piece.construct().to_arg_def(0))
            .into_iter()
            .collect();
    }
    argument_tokens(&tokens)
        .map(|(_, definition)| definition)
        .collect()
}

/// Tokens that declare an argument, paired with their definitions.
///
/// Indices are ordinal among arguments, not token positions.
pub(crate) fn argument_tokens<'t, 'a>(
    tokens: &'t [Token<'a>],
) -> impl Iterator<Item = (&'t Token<'a>, ArgumentDefinition)> {
    tokens
        .iter()
        .filter(|token| token.piece.is_argument())
        .enumerate()
        .filter_map(|(index, token)| {
            token
                .piece
                .construct()
                .to_arg_def(index)
                .map(|definition| (token, definition))
        })
}
