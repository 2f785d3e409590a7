//! Read-only display rendering of step patterns.

use crate::args::argument_tokens;
use crate::pattern::handlers::{ArgLabel, Rendered};
use crate::pattern::lexer::lex_pattern;
use crate::types::{ArgDescription, ArgType, ArgumentDefinition, FormattedPattern};

fn describe(definition: &ArgumentDefinition) -> String {
    match definition.arg_type {
        ArgType::Enum => format!("one of: {}", definition.enum_values().join(", ")),
        ArgType::Table => definition
            .table_columns
            .as_ref()
            .map_or_else(
                || "data table".to_string(),
                |columns| format!("data table with columns: {}", columns.join(", ")),
            ),
        ArgType::String => "text value".to_string(),
        ArgType::Int => "integer value".to_string(),
        ArgType::Float => "decimal value".to_string(),
        ArgType::Word => "single word".to_string(),
        ArgType::Any => "any value".to_string(),
    }
}

/// Highlighted HTML, plain text and argument descriptions for `pattern`.
///
/// Arguments, including a trailing table declaration, become numbered
/// placeholders labelled identically in all three outputs. Optional text and
/// alternatives are wrapped in non-interactive markers. Literal text is
/// HTML-escaped; descriptions carry raw values.
///
/// Placeholders are numbered over every argument construct in textual
/// order. A trailing table is therefore labelled after the inline arguments
/// before it, while [`parse_args`](crate::parse_args), which reports a table
/// on its own, names it `arg0`.
///
/// # Examples
/// ```
/// use stepkit_patterns::format_pattern;
///
/// let formatted = format_pattern("^I pick (red|blue) & go$");
/// assert_eq!(formatted.plain_text, "I pick [arg0] & go");
/// assert_eq!(
///     formatted.html,
///     r#"I pick <span class="step-arg step-arg-enum" data-arg-index="0">arg0</span> &amp; go"#
/// );
/// assert_eq!(formatted.arg_descriptions[0].description, "one of: red, blue");
/// ```
#[must_use]
pub fn format_pattern(pattern: &str) -> FormattedPattern {
    let tokens = lex_pattern(pattern);
    let mut arguments = argument_tokens(&tokens).peekable();

    let mut html = String::with_capacity(pattern.len());
    let mut plain_text = String::with_capacity(pattern.len());
    let mut arg_descriptions = Vec::new();

    for token in &tokens {
        let argument = arguments
            .next_if(|(arg_token, _)| std::ptr::eq(*arg_token, token))
            .map(|(_, definition)| definition);
        let construct = token.piece.construct();
        let Rendered { html: h, plain } = argument.map_or_else(
            || construct.format(None),
            |definition| {
                let index = arg_descriptions.len();
                let rendered = construct.format(Some(&ArgLabel {
                    index,
                    name: &definition.name,
                }));
                arg_descriptions.push(ArgDescription {
                    index,
                    description: describe(&definition),
                    name: definition.name,
                    arg_type: definition.arg_type,
                    enum_values: definition.enum_values,
                    table_columns: definition.table_columns,
                });
                rendered
            },
        );
        html.push_str(&h);
        plain_text.push_str(&plain);
    }

    FormattedPattern {
        html,
        plain_text,
        arg_descriptions,
    }
}
