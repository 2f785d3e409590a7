//! End-to-end behaviour of the public pattern operations.
#![expect(clippy::expect_used, reason = "tests assert successful conversion paths")]

use rstest::rstest;
use stepkit_patterns::{
    ArgType, ArgumentDefinition, ConcreteArg, SegmentKind, StepDefinition, StepKeyword,
    build_regex_from_pattern,
    compile_regex_from_pattern, format_pattern, match_step, parse_args, parse_segments,
    resolve_pattern,
};

#[test]
fn extracts_enum_arguments_from_anchored_patterns() {
    let args = parse_args("^I am logged in as (manager|seller)$");
    let described: Vec<(ArgType, &[String])> = args
        .iter()
        .map(|arg| (arg.arg_type, arg.enum_values()))
        .collect();
    assert_eq!(
        described,
        vec![(
            ArgType::Enum,
            &["manager".to_string(), "seller".to_string()][..]
        )]
    );
}

#[rstest]
#[case(r#"I click on "ok""#, true)]
#[case("I click on 'ok'", true)]
#[case("I click on ok", true)]
#[case(r#"I click on "ok" extra"#, false)]
fn string_parameters_match_whole_lines(#[case] text: &str, #[case] expected: bool) {
    let regex = compile_regex_from_pattern("I click on {string}").expect("pattern compiles");
    assert_eq!(regex.is_match(text), expected);
}

#[test]
fn resolves_string_parameters_with_quotes() {
    let values = [
        ConcreteArg::typed(ArgType::String, "a"),
        ConcreteArg::typed(ArgType::String, "b"),
    ];
    assert_eq!(
        resolve_pattern("I fill {string} with {string}", &values),
        r#"I fill "a" with "b""#
    );
}

#[test]
fn table_suffix_ends_up_in_trailing_text() {
    let segments = parse_segments("I see users (name, email) :", &[]);
    let last = segments.last().expect("pattern yields segments");
    assert_eq!(last.kind, SegmentKind::Text);
    assert!(last.value.ends_with("(name, email) :"));
}

#[rstest]
#[case("^I log in$", "I log in")]
#[case("I press the button", "I press the button")]
#[case(r"costs \(about\) 5 \/ 6", "costs (about) 5 / 6")]
#[case(r"set \{key\}", "set {key}")]
#[case(r"I call(\(s\)) now", "I call(s) now")]
#[case(r"it costs 5\$", "it costs 5$")]
fn zero_argument_patterns_resolve_to_their_literal_text(
    #[case] pattern: &str,
    #[case] expected: &str,
) {
    assert!(parse_args(pattern).is_empty());
    assert_eq!(resolve_pattern(pattern, &[]), expected);
}

#[rstest]
#[case("I wait")]
#[case("I have {int} and {float:ratio}")]
#[case("^as (manager|seller) I see {} and {word}$")]
#[case("I log/sign in(to) {string} at <time>")]
#[case(r"literal \{int\} and {any}")]
#[case("I wait( {int} seconds)")]
fn argument_and_description_counts_agree(#[case] pattern: &str) {
    assert_eq!(
        parse_args(pattern).len(),
        format_pattern(pattern).arg_descriptions.len()
    );
}

#[rstest]
#[case("I add {int} items", vec![(ArgType::Int, "42")])]
#[case("I rate {float} of {word}", vec![(ArgType::Float, "0.75"), (ArgType::Word, "stars")])]
#[case(
    "I log in as (admin|guest) named {string}",
    vec![(ArgType::Enum, "guest"), (ArgType::String, "Ada Lovelace")]
)]
#[case("I type {string:text} then {any}", vec![(ArgType::String, "hi"), (ArgType::Any, "x=1")])]
#[case("I say {string}", vec![(ArgType::String, "'a' and 'b'")])]
#[case("I say {string}", vec![(ArgType::String, "'bob'")])]
#[case("I say {string}", vec![(ArgType::String, r#"say "hi""#)])]
#[case(r"I pick (a\/b|c)", vec![(ArgType::Enum, "a/b")])]
#[case(r"I pick (\(x\)|y) now", vec![(ArgType::Enum, "(x)")])]
#[case("I wait( {int} seconds)", vec![(ArgType::Int, "5")])]
fn resolved_text_matches_back_to_the_same_values(
    #[case] pattern: &str,
    #[case] assignment: Vec<(ArgType, &str)>,
) {
    let definition = StepDefinition::from_pattern("round-trip", pattern, StepKeyword::Given);
    let values: Vec<ConcreteArg> = definition
        .args
        .iter()
        .zip(&assignment)
        .map(|(arg, (_, value))| ConcreteArg::new(arg.clone(), *value))
        .collect();
    let text = resolve_pattern(pattern, &values);
    let matched = match_step(&text, &definition).expect("resolved text matches its definition");
    let expected: Vec<&str> = assignment.iter().map(|(_, value)| *value).collect();
    assert_eq!(matched.values(), expected);
}

#[rstest]
#[case("^I log in$")]
#[case("I pick (a|b) for {string:who}")]
#[case(r"I \(really\) log/sign in <when> cucumber(s) {}")]
#[case("I see users (name, email) :")]
fn segments_cover_the_pattern(#[case] pattern: &str) {
    let rebuilt: String = parse_segments(pattern, &[])
        .into_iter()
        .map(|segment| segment.value)
        .collect();
    assert_eq!(rebuilt, pattern);
}

#[test]
fn regex_source_and_compiled_regex_agree() {
    let pattern = "I have {int} cucumber(s)";
    let regex = compile_regex_from_pattern(pattern).expect("pattern compiles");
    assert_eq!(regex.as_str(), build_regex_from_pattern(pattern));
}

#[test]
fn parameters_inside_optional_text_are_arguments() {
    assert_eq!(
        parse_args("I wait( {int} seconds)"),
        vec![ArgumentDefinition::new("arg0", ArgType::Int)]
    );
    let definition =
        StepDefinition::from_pattern("wait", "I wait( {int} seconds)", StepKeyword::When);
    let matched = match_step("I wait", &definition).expect("optional text may be omitted");
    assert_eq!(matched.values(), vec![""]);
}

#[test]
fn escaped_enum_alternatives_match_their_literal_text() {
    let regex = compile_regex_from_pattern(r"I pick (a\/b|c)").expect("pattern compiles");
    assert!(regex.is_match("I pick a/b"));
    assert!(!regex.is_match(r"I pick a\/b"));
}

#[rstest]
#[case("(x|y) as {string}", "{string} as (a|b)")]
#[case("{int} and {word}", "(a|b) and (c|d)")]
#[case("(x|y)", "<user> picks {int}")]
fn caller_metadata_never_gives_enum_values_to_other_types(
    #[case] caller_pattern: &str,
    #[case] pattern: &str,
) {
    let caller = parse_args(caller_pattern);
    for arg in parse_segments(pattern, &caller).iter().filter_map(|s| s.arg.as_ref()) {
        assert_eq!(
            arg.enum_values().is_empty(),
            arg.arg_type != ArgType::Enum,
            "{arg:?}"
        );
    }
}
