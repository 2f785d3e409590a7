//! Cucumber expressions `{type}` / `{type:name}` and the anonymous `{}`.

use regex::Regex;
use std::sync::LazyLock;

use super::literal::is_outline_reference;
use super::{ArgLabel, Construct, Detect, Rendered, Scan, arg_placeholder, auto_name};
use crate::types::{ArgType, ArgumentDefinition};

static CUCUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A\{(string|int|float|word|any)(?::(\w+))?\}")
        .unwrap_or_else(|_| unreachable!("cucumber expression regex is valid"))
});

/// Capture fragment for a cucumber parameter type.
///
/// `string` accepts a double-quoted, single-quoted or bare token so steps
/// written either way match the same definition.
pub(crate) fn type_fragment(arg_type: ArgType) -> &'static str {
    match arg_type {
        ArgType::String => r#"("[^"]*"|'[^']*'|\S+)"#,
        ArgType::Int => r"(-?\d+)",
        ArgType::Float => r"(-?\d*\.?\d+)",
        ArgType::Word | ArgType::Any | ArgType::Enum | ArgType::Table => r"(\S+)",
    }
}

/// Remove one layer of matching single or double quotes.
pub(crate) fn strip_quotes(value: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|quote| value.strip_prefix(quote)?.strip_suffix(quote))
        .unwrap_or(value)
}

/// Wrap a `string` value so the `string` fragment reads it back unchanged:
/// in double quotes, or in single quotes when the value holds double quotes
/// but no single ones.
fn quote(value: &str) -> String {
    if value.contains('"') && !value.contains('\'') {
        format!("'{value}'")
    } else {
        format!("\"{value}\"")
    }
}

/// A typed cucumber parameter such as `{int}` or `{string:user}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CucumberParam {
    pub kind: ArgType,
    pub name: Option<String>,
}

impl Detect for CucumberParam {
    fn detect(scan: &Scan<'_>) -> Option<(usize, Self)> {
        let caps = CUCUMBER_RE.captures(scan.rest())?;
        let kind = ArgType::from_cucumber_name(caps.get(1)?.as_str())?;
        let name = caps.get(2).map(|m| m.as_str().to_string());
        Some((caps.get(0)?.end(), Self { kind, name }))
    }
}

impl Construct for CucumberParam {
    fn regex_fragment(&self) -> String {
        type_fragment(self.kind).to_string()
    }

    fn resolve(&self, value: Option<&str>) -> String {
        let value = value.unwrap_or_default();
        if self.kind == ArgType::String && !is_outline_reference(value) {
            quote(value)
        } else {
            value.to_string()
        }
    }

    fn to_arg_def(&self, index: usize) -> Option<ArgumentDefinition> {
        let name = self.name.clone().unwrap_or_else(|| auto_name(index));
        Some(ArgumentDefinition::new(name, self.kind))
    }

    fn format(&self, label: Option<&ArgLabel<'_>>) -> Rendered {
        arg_placeholder(self.kind, label)
    }
}

/// `{}`: an untyped parameter matching any non-empty text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AnonymousParam;

impl Detect for AnonymousParam {
    fn detect(scan: &Scan<'_>) -> Option<(usize, Self)> {
        scan.rest().starts_with("{}").then_some((2, Self))
    }
}

impl Construct for AnonymousParam {
    fn regex_fragment(&self) -> String {
        "(.+)".into()
    }

    fn resolve(&self, value: Option<&str>) -> String {
        value.unwrap_or_default().to_string()
    }

    fn to_arg_def(&self, index: usize) -> Option<ArgumentDefinition> {
        Some(ArgumentDefinition::new(auto_name(index), ArgType::Any))
    }

    fn format(&self, label: Option<&ArgLabel<'_>>) -> Rendered {
        arg_placeholder(ArgType::Any, label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn detect(input: &str) -> Option<CucumberParam> {
        CucumberParam::detect(&Scan::new(input, 0)).map(|(_, param)| param)
    }

    #[rstest]
    #[case("{string}", ArgType::String, None)]
    #[case("{int:count}", ArgType::Int, Some("count"))]
    #[case("{float}", ArgType::Float, None)]
    #[case("{word:w}", ArgType::Word, Some("w"))]
    #[case("{any}", ArgType::Any, None)]
    fn detects_the_five_types(
        #[case] input: &str,
        #[case] kind: ArgType,
        #[case] name: Option<&str>,
    ) {
        assert_eq!(
            detect(input),
            Some(CucumberParam {
                kind,
                name: name.map(str::to_string),
            })
        );
    }

    #[rstest]
    #[case("{u32}")]
    #[case("{enum}")]
    #[case("{string:}")]
    #[case("{}")]
    fn ignores_unknown_or_malformed_types(#[case] input: &str) {
        assert_eq!(detect(input), None);
    }

    #[rstest]
    #[case(r#""ok""#, "ok")]
    #[case("'ok'", "ok")]
    #[case("ok", "ok")]
    #[case(r#""ok'"#, r#""ok'"#)]
    #[case(r#""""ok""""#, r#"""ok"""#)]
    #[case("\"", "\"")]
    fn strips_one_layer_of_quotes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_quotes(input), expected);
    }

    #[rstest]
    #[case(ArgType::String, "a b", r#""a b""#)]
    #[case(ArgType::String, r#"say "hi""#, r#"'say "hi"'"#)]
    #[case(ArgType::String, "'bob'", r#""'bob'""#)]
    #[case(ArgType::String, "'a' and 'b'", r#""'a' and 'b'""#)]
    #[case(ArgType::String, r#""hi""#, r#"'"hi"'"#)]
    #[case(ArgType::String, "<name>", "<name>")]
    #[case(ArgType::String, "", r#""""#)]
    #[case(ArgType::Int, "42", "42")]
    fn quotes_string_values_except_outline_references(
        #[case] kind: ArgType,
        #[case] value: &str,
        #[case] expected: &str,
    ) {
        let param = CucumberParam { kind, name: None };
        assert_eq!(param.resolve(Some(value)), expected);
    }

    #[test]
    fn anonymous_parameter_is_any_typed() {
        assert_eq!(
            AnonymousParam::detect(&Scan::new("{} left", 0)),
            Some((2, AnonymousParam))
        );
        assert_eq!(
            AnonymousParam.to_arg_def(3),
            Some(ArgumentDefinition::new("arg3", ArgType::Any))
        );
        assert_eq!(AnonymousParam.regex_fragment(), "(.+)");
    }
}
