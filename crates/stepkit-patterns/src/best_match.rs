//! Choosing one definition for a step among many candidates.
//!
//! Candidates are filtered by keyword, matched, and ranked by
//! [`SpecificityScore`]. When nothing matches, a definition is synthesised
//! from the text itself so callers always receive a usable result.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::keyword::StepKeyword;
use crate::matcher::match_step;
use crate::pattern::handlers::auto_name;
use crate::specificity::SpecificityScore;
use crate::types::{ArgType, ArgumentDefinition, ConcreteArg, MatchResult, StepDefinition};

/// Tokens the fallback turns into arguments: a double-quoted string, an
/// outline reference, or a bare number.
static FALLBACK_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""([^"]*)"|<([^<>\s][^<>]*)>|\b(\d+\.\d+|\d+)\b"#)
        .unwrap_or_else(|_| unreachable!("fallback value regex is valid"))
});

/// Characters that would be read as pattern syntax in literal step text.
const DSL_META: &[char] = &['{', '}', '(', ')', '/'];

/// A matching candidate with its specificity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedMatch {
    /// Specificity of the matched definition.
    pub score: SpecificityScore,
    /// Values extracted by the definition.
    pub result: MatchResult,
}

/// Every definition usable with `keyword` that matches `text`, most
/// specific first.
///
/// Candidates with equal scores keep their input order, so the first
/// registered definition wins a tie. An empty result means nothing matched.
///
/// # Examples
/// ```
/// use stepkit_patterns::{StepDefinition, StepKeyword, rank_matches};
///
/// let defs = [
///     StepDefinition::from_pattern("free", "I am {string}", StepKeyword::Given),
///     StepDefinition::from_pattern("role", "I am (admin|guest)", StepKeyword::Given),
/// ];
/// let ranked = rank_matches("I am admin", StepKeyword::Given, &defs);
/// assert_eq!(ranked.len(), 2);
/// assert_eq!(ranked[0].result.definition_id.as_deref(), Some("role"));
/// ```
#[must_use]
pub fn rank_matches(
    text: &str,
    keyword: StepKeyword,
    definitions: &[StepDefinition],
) -> Vec<RankedMatch> {
    let mut ranked: Vec<RankedMatch> = definitions
        .iter()
        .filter(|definition| keyword.accepts(definition.keyword))
        .filter_map(|definition| {
            let result = match_step(text, definition);
            log::trace!(
                "candidate '{}' ({}) {} '{text}'",
                definition.pattern,
                definition.id,
                if result.is_some() { "matches" } else { "does not match" }
            );
            Some(RankedMatch {
                score: SpecificityScore::of_definition(definition),
                result: result?,
            })
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// The most specific definition matching `text`, or a synthesised fallback.
///
/// Never fails: when no candidate matches, see [`fallback_match`].
///
/// # Examples
/// ```
/// use stepkit_patterns::{StepKeyword, find_best_match};
///
/// let result = find_best_match("I do something new", StepKeyword::When, &[]);
/// assert_eq!(result.pattern, "I do something new");
/// assert!(result.args.is_empty());
/// assert!(result.is_fallback());
/// ```
#[must_use]
pub fn find_best_match(
    text: &str,
    keyword: StepKeyword,
    definitions: &[StepDefinition],
) -> MatchResult {
    if let Some(best) = rank_matches(text, keyword, definitions).into_iter().next() {
        return best.result;
    }
    log::debug!(
        "no {keyword} definition among {} candidates matches '{text}'; synthesising one",
        definitions.len()
    );
    fallback_match(text)
}

/// Synthesise a pattern and arguments from literal step text.
///
/// Double-quoted substrings and `<name>` outline references become `string`
/// arguments, bare integers `int` and bare decimals `float`. Arguments are
/// named `arg0`, `arg1`, ... in source order. The remaining text is kept
/// literally with pattern syntax escaped, so the synthesised pattern matches
/// the text it came from. Outline references keep `<name>` as their value.
///
/// # Examples
/// ```
/// use stepkit_patterns::fallback_match;
///
/// let result = fallback_match(r#"I type "hello" 3 times"#);
/// assert_eq!(result.pattern, "I type {string} {int} times");
/// assert_eq!(result.values(), ["hello", "3"]);
/// ```
#[must_use]
pub fn fallback_match(text: &str) -> MatchResult {
    let mut pattern = String::with_capacity(text.len());
    let mut args = Vec::new();
    let mut last = 0;

    for caps in FALLBACK_VALUE_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        push_escaped(
            &mut pattern,
            text.get(last..whole.start()).unwrap_or_default(),
            last == 0,
            false,
        );
        last = whole.end();

        let (arg_type, value) = match (caps.get(1), caps.get(2)) {
            (Some(quoted), _) => (ArgType::String, quoted.as_str()),
            (None, Some(_)) => (ArgType::String, whole.as_str()),
            (None, None) if whole.as_str().contains('.') => (ArgType::Float, whole.as_str()),
            (None, None) => (ArgType::Int, whole.as_str()),
        };
        pattern.push('{');
        pattern.push_str(arg_type.as_str());
        pattern.push('}');
        let definition = ArgumentDefinition::new(auto_name(args.len()), arg_type);
        args.push(ConcreteArg::new(definition, value));
    }
    push_escaped(&mut pattern, text.get(last..).unwrap_or_default(), last == 0, true);

    MatchResult {
        pattern,
        args,
        definition_id: None,
    }
}

/// Append `literal` with pattern syntax escaped. A `^` opening the text and
/// a `$` or `:` ending it are escaped too, or they would be read back as an
/// anchor or a table declaration.
fn push_escaped(pattern: &mut String, literal: &str, opens_text: bool, ends_text: bool) {
    let colon_end = literal.trim_end().len();
    for (offset, character) in literal.char_indices() {
        let boundary = match character {
            '^' => opens_text && offset == 0,
            '$' => ends_text && offset + 1 == literal.len(),
            ':' => ends_text && offset + 1 == colon_end,
            _ => false,
        };
        if boundary || DSL_META.contains(&character) {
            pattern.push('\\');
        }
        pattern.push(character);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::compile_regex_from_pattern;
    use rstest::rstest;

    fn def(id: &str, pattern: &str, keyword: StepKeyword) -> StepDefinition {
        StepDefinition::from_pattern(id, pattern, keyword)
    }

    fn best_id(text: &str, keyword: StepKeyword, defs: &[StepDefinition]) -> Option<String> {
        find_best_match(text, keyword, defs).definition_id
    }

    #[test]
    fn prefers_enum_over_string() {
        let defs = [
            def("string", "I am logged in as {string}", StepKeyword::Given),
            def("enum", "I am logged in as (manager|seller)", StepKeyword::Given),
        ];
        assert_eq!(
            best_id("I am logged in as manager", StepKeyword::Given, &defs).as_deref(),
            Some("enum")
        );
    }

    #[test]
    fn first_candidate_wins_ties() {
        let defs = [
            def("first", "I see {word}", StepKeyword::Then),
            def("second", "I {word} it", StepKeyword::Then),
            def("third", "I see {word}", StepKeyword::Then),
        ];
        assert_eq!(
            best_id("I see it", StepKeyword::Then, &defs).as_deref(),
            Some("first")
        );
    }

    #[rstest]
    #[case(StepKeyword::When, StepKeyword::When, true)]
    #[case(StepKeyword::When, StepKeyword::Then, false)]
    #[case(StepKeyword::And, StepKeyword::Then, true)]
    #[case(StepKeyword::Given, StepKeyword::But, true)]
    fn filters_by_keyword_with_conjunction_wildcards(
        #[case] step: StepKeyword,
        #[case] registered: StepKeyword,
        #[case] matched: bool,
    ) {
        let defs = [def("only", "I wait", registered)];
        assert_eq!(best_id("I wait", step, &defs).is_some(), matched);
    }

    #[test]
    fn ranks_every_matching_candidate() {
        let defs = [
            def("any", "I buy {}", StepKeyword::When),
            def("int", "I buy {int}", StepKeyword::When),
            def("other", "I sell {int}", StepKeyword::When),
        ];
        let ranked: Vec<(u32, Option<String>)> = rank_matches("I buy 3", StepKeyword::When, &defs)
            .into_iter()
            .map(|m| (m.score.0, m.result.definition_id))
            .collect();
        assert_eq!(
            ranked,
            vec![(60, Some("int".into())), (20, Some("any".into()))]
        );
    }

    #[test]
    fn empty_candidate_list_falls_back_verbatim() {
        let result = find_best_match("I do something new", StepKeyword::When, &[]);
        assert_eq!(result.pattern, "I do something new");
        assert!(result.args.is_empty());
        assert!(result.is_fallback());
    }

    #[rstest]
    #[case(r#"I type "a b" into <field>"#, "I type {string} into {string}", vec!["a b", "<field>"])]
    #[case("I wait 5 then 0.5 seconds", "I wait {int} then {float} seconds", vec!["5", "0.5"])]
    #[case("version v2 and x1", "version v2 and x1", vec![])]
    #[case("pick (this)/that", r"pick \(this\)\/that", vec![])]
    #[case(r#"say """#, "say {string}", vec![""])]
    #[case("I pay 5$", r"I pay {int}\$", vec!["5"])]
    #[case("^start", r"\^start", vec![])]
    #[case("the following users: ", r"the following users\: ", vec![])]
    #[case("at 10:30 sharp", "at {int}:{int} sharp", vec!["10", "30"])]
    fn fallback_synthesises_arguments(
        #[case] text: &str,
        #[case] pattern: &str,
        #[case] values: Vec<&str>,
    ) {
        let result = fallback_match(text);
        assert_eq!(result.pattern, pattern);
        assert_eq!(result.values(), values);
    }

    #[test]
    fn fallback_arguments_are_numbered_and_typed() {
        let described: Vec<(String, ArgType)> = fallback_match(r#"put "x" in 2 slots"#)
            .args
            .into_iter()
            .map(|a| (a.definition.name, a.definition.arg_type))
            .collect();
        assert_eq!(
            described,
            vec![("arg0".into(), ArgType::String), ("arg1".into(), ArgType::Int)]
        );
    }

    #[rstest]
    #[case(r#"I type "a b" into <field>"#)]
    #[case("costs 3.50 (incl. tax) and/or 2 more {x}")]
    #[case("I pay 5$")]
    #[case("^x^ marks the spot")]
    #[case("the following users:")]
    fn fallback_pattern_matches_its_own_text(#[case] text: &str) {
        let pattern = fallback_match(text).pattern;
        let Ok(regex) = compile_regex_from_pattern(&pattern) else {
            panic!("fallback pattern {pattern:?} should compile");
        };
        assert!(regex.is_match(text), "{pattern:?} should match {text:?}");
    }

    #[rstest]
    #[case("the following users:")]
    #[case(r#"I pay "5$""#)]
    #[case("^ and $")]
    fn fallback_arguments_agree_with_the_pattern(#[case] text: &str) {
        let result = fallback_match(text);
        let declared: Vec<ArgumentDefinition> =
            result.args.iter().map(|a| a.definition.clone()).collect();
        assert_eq!(crate::args::parse_args(&result.pattern), declared);
    }
}
