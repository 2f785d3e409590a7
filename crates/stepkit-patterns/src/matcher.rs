//! Matching literal step text against a single definition.

use regex::Regex;

use crate::pattern::compile_regex_from_pattern;
use crate::pattern::handlers::strip_quotes;
use crate::types::{ArgType, ConcreteArg, MatchResult, StepDefinition};

/// Capture groups of `re` against `text`, or `None` when it does not match.
///
/// Group 0 is skipped and groups that do not participate yield empty strings
/// so values stay aligned with argument positions.
fn captured_values<'t>(re: &Regex, text: &'t str) -> Option<Vec<&'t str>> {
    let caps = re.captures(text)?;
    Some(
        caps.iter()
            .skip(1)
            .map(|capture| capture.map_or("", |m| m.as_str()))
            .collect(),
    )
}

/// Match `text` against `definition` and extract its argument values.
///
/// Returns `None` when the text does not match, which is the ordinary
/// outcome for most candidates. Table arguments never consume a capture and
/// are reported with an empty value; `string` values lose one layer of
/// quotes.
///
/// # Examples
/// ```
/// use stepkit_patterns::{StepDefinition, StepKeyword, match_step};
///
/// let def = StepDefinition::from_pattern("fill", "I fill {string} with {int}", StepKeyword::When);
/// let result = match_step(r#"I fill "name" with 3"#, &def).expect("text matches");
/// assert_eq!(result.values(), ["name", "3"]);
/// assert_eq!(result.definition_id.as_deref(), Some("fill"));
/// ```
#[must_use]
pub fn match_step(text: &str, definition: &StepDefinition) -> Option<MatchResult> {
    let regex = compile_regex_from_pattern(&definition.pattern)
        .inspect_err(|err| {
            log::debug!(
                "skipping step definition '{}' with pattern '{}': {err}",
                definition.id,
                definition.pattern
            );
        })
        .ok()?;
    let values = captured_values(&regex, text)?;
    let mut captures = values.into_iter();

    let args = definition
        .args
        .iter()
        .map(|arg| {
            let value = if arg.arg_type.is_captured() {
                captures.next().unwrap_or_default()
            } else {
                ""
            };
            let value = if arg.arg_type == ArgType::String {
                strip_quotes(value)
            } else {
                value
            };
            ConcreteArg::new(arg.clone(), value)
        })
        .collect();

    Some(MatchResult {
        pattern: definition.pattern.clone(),
        args,
        definition_id: Some(definition.id.clone()),
    })
}
