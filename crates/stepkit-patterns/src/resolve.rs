//! Rendering a pattern back into literal step text.
//!
//! Values are handed to constructs by type rather than by position, because
//! editors collect them per argument kind. Each construct takes the next
//! unconsumed value it can use:
//!
//! - an enum alternation takes the next `enum` value;
//! - `{type}` takes the next value of its type, else the next value that is
//!   neither an enum choice nor a table;
//! - `{}` takes the next value whose type still has more values left than
//!   unprocessed `{type}` parameters waiting for it.

use std::collections::HashMap;

use crate::pattern::handlers::Piece;
use crate::pattern::lexer::lex_pattern;
use crate::types::{ArgType, ConcreteArg};

struct ValuePool<'v> {
    values: &'v [ConcreteArg],
    consumed: Vec<bool>,
    reserved: HashMap<ArgType, usize>,
}

impl<'v> ValuePool<'v> {
    fn new(values: &'v [ConcreteArg], reserved: HashMap<ArgType, usize>) -> Self {
        Self {
            values,
            consumed: vec![false; values.len()],
            reserved,
        }
    }

    fn take(&mut self, accept: impl Fn(&ConcreteArg) -> bool) -> Option<&'v str> {
        let values = self.values;
        let (index, arg) = values
            .iter()
            .enumerate()
            .find(|&(index, arg)| !self.is_consumed(index) && accept(arg))?;
        if let Some(flag) = self.consumed.get_mut(index) {
            *flag = true;
        }
        Some(arg.value.as_str())
    }

    fn is_consumed(&self, index: usize) -> bool {
        self.consumed.get(index).copied().unwrap_or(true)
    }

    fn available(&self, arg_type: ArgType) -> usize {
        self.values
            .iter()
            .enumerate()
            .filter(|(index, arg)| !self.is_consumed(*index) && arg.arg_type() == arg_type)
            .count()
    }

    fn reserved(&self, arg_type: ArgType) -> usize {
        self.reserved.get(&arg_type).copied().unwrap_or_default()
    }

    fn release(&mut self, arg_type: ArgType) {
        if let Some(count) = self.reserved.get_mut(&arg_type) {
            *count = count.saturating_sub(1);
        }
    }

    fn take_enum(&mut self) -> Option<&'v str> {
        self.take(|arg| arg.arg_type() == ArgType::Enum)
    }

    fn take_typed(&mut self, kind: ArgType) -> Option<&'v str> {
        self.release(kind);
        self.take(|arg| arg.arg_type() == kind)
            .or_else(|| self.take(|arg| is_inline(arg.arg_type())))
    }

    fn take_anonymous(&mut self) -> Option<&'v str> {
        let spare: Vec<ArgType> = [
            ArgType::String,
            ArgType::Int,
            ArgType::Float,
            ArgType::Word,
            ArgType::Any,
        ]
        .into_iter()
        .filter(|kind| self.available(*kind) > self.reserved(*kind))
        .collect();
        self.take(|arg| spare.contains(&arg.arg_type()))
    }
}

/// Whether a value of this type can stand in for an untyped parameter.
const fn is_inline(arg_type: ArgType) -> bool {
    !matches!(arg_type, ArgType::Enum | ArgType::Table)
}

/// Literal step text for `pattern` with `values` substituted.
///
/// Anchors and escape backslashes are dropped, optional text is always
/// included, alternative words collapse to the first and a data-table
/// declaration collapses to the colon ending the step line. `string`
/// parameters are quoted unless the value is a `<name>` outline reference.
/// Constructs left without a value render empty, except enum alternations,
/// which fall back to their first alternative.
///
/// # Examples
/// ```
/// use stepkit_patterns::{ArgType, ConcreteArg, resolve_pattern};
///
/// let values = [
///     ConcreteArg::typed(ArgType::String, "a"),
///     ConcreteArg::typed(ArgType::String, "b"),
/// ];
/// assert_eq!(
///     resolve_pattern("I fill {string} with {string}", &values),
///     r#"I fill "a" with "b""#
/// );
/// ```
#[must_use]
pub fn resolve_pattern(pattern: &str, values: &[ConcreteArg]) -> String {
    let tokens = lex_pattern(pattern);
    let mut reserved: HashMap<ArgType, usize> = HashMap::new();
    for token in &tokens {
        if let Piece::Cucumber(param) = &token.piece {
            *reserved.entry(param.kind).or_default() += 1;
        }
    }
    let mut pool = ValuePool::new(values, reserved);

    let mut text = String::with_capacity(pattern.len());
    for token in &tokens {
        let value = match &token.piece {
            Piece::Enum(_) => pool.take_enum(),
            Piece::Cucumber(param) => pool.take_typed(param.kind),
            Piece::Anonymous(_) => pool.take_anonymous(),
            _ => None,
        };
        text.push_str(&token.piece.construct().resolve(value));
    }
    text
}
