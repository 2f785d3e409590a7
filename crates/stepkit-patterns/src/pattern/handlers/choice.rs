//! Parenthesised groups and slash-joined words.
//!
//! `(a|b)` is an enum argument, `(text)` is optional literal text and
//! `w1/w2` accepts either word. Only the enum captures a value itself. The
//! body of an optional group is lexed again, so it may hold escapes and
//! parameters of its own; slashes inside it stay literal.

use regex::Regex;
use std::sync::LazyLock;

use super::literal::{ESCAPABLE, unescape};
use super::{ArgLabel, Construct, Detect, Rendered, Scan, arg_placeholder, auto_name, escape_html};
use crate::types::{ArgType, ArgumentDefinition};

static ALTERNATIVES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A\w+(?:/\w+)+").unwrap_or_else(|_| unreachable!("alternatives regex is valid"))
});

/// Byte length of the `(...)` group at the scan position and its raw body.
///
/// Escaped parentheses neither open nor close a group, and groups do not
/// nest.
fn group<'a>(scan: &Scan<'a>) -> Option<(usize, &'a str)> {
    let rest = scan.rest();
    if !rest.starts_with('(') {
        return None;
    }
    let mut chars = rest.char_indices().skip(1).peekable();
    while let Some((offset, character)) = chars.next() {
        match character {
            '\\' => {
                chars.next_if(|(_, next)| ESCAPABLE.contains(next));
            }
            '(' => return None,
            ')' => return Some((offset + 1, rest.get(1..offset)?)),
            _ => {}
        }
    }
    None
}

fn is_word_char(character: char) -> bool {
    character.is_alphanumeric() || character == '_'
}

/// `(a|b|c)`: a closed choice between literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EnumAlternation {
    pub values: Vec<String>,
}

impl Detect for EnumAlternation {
    fn detect(scan: &Scan<'_>) -> Option<(usize, Self)> {
        let (len, content) = group(scan)?;
        if !content.contains('|') {
            return None;
        }
        let values: Vec<String> = content
            .split('|')
            .map(|value| unescape(value.trim()))
            .filter(|value| !value.is_empty())
            .collect();
        (!values.is_empty()).then_some((len, Self { values }))
    }
}

impl Construct for EnumAlternation {
    fn regex_fragment(&self) -> String {
        let alternatives: Vec<String> = self.values.iter().map(|v| regex::escape(v)).collect();
        format!("({})", alternatives.join("|"))
    }

    fn resolve(&self, value: Option<&str>) -> String {
        value
            .filter(|chosen| !chosen.is_empty())
            .or_else(|| self.values.first().map(String::as_str))
            .unwrap_or_default()
            .to_string()
    }

    fn to_arg_def(&self, index: usize) -> Option<ArgumentDefinition> {
        Some(ArgumentDefinition::enumeration(
            auto_name(index),
            self.values.clone(),
        ))
    }

    fn format(&self, label: Option<&ArgLabel<'_>>) -> Rendered {
        arg_placeholder(ArgType::Enum, label)
    }
}

/// The `(` opening optional text. The lexer emits the body's own tokens
/// next, then an [`OptionalClose`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OptionalOpen {
    /// Byte length of the whole group, both parentheses included.
    pub group_len: usize,
}

impl Detect for OptionalOpen {
    fn detect(scan: &Scan<'_>) -> Option<(usize, Self)> {
        let (group_len, content) = group(scan)?;
        if content.contains('|') || content.trim().is_empty() {
            return None;
        }
        Some((1, Self { group_len }))
    }
}

impl Construct for OptionalOpen {
    fn regex_fragment(&self) -> String {
        "(?:".into()
    }

    fn resolve(&self, _value: Option<&str>) -> String {
        String::new()
    }

    fn format(&self, _label: Option<&ArgLabel<'_>>) -> Rendered {
        Rendered {
            html: r#"<span class="step-optional">("#.into(),
            plain: "(".into(),
        }
    }
}

/// The `)` closing optional text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OptionalClose;

impl Construct for OptionalClose {
    fn regex_fragment(&self) -> String {
        ")?".into()
    }

    fn resolve(&self, _value: Option<&str>) -> String {
        String::new()
    }

    fn format(&self, _label: Option<&ArgLabel<'_>>) -> Rendered {
        Rendered {
            html: ")</span>".into(),
            plain: ")".into(),
        }
    }
}

/// `w1/w2/...`: interchangeable words. The first is canonical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AlternativeWords {
    pub words: Vec<String>,
}

impl Detect for AlternativeWords {
    fn detect(scan: &Scan<'_>) -> Option<(usize, Self)> {
        if scan.is_in_group() || scan.previous_char().is_some_and(is_word_char) {
            return None;
        }
        let chain = ALTERNATIVES_RE.find(scan.rest())?;
        let words = chain.as_str().split('/').map(str::to_string).collect();
        Some((chain.end(), Self { words }))
    }
}

impl Construct for AlternativeWords {
    fn regex_fragment(&self) -> String {
        let words: Vec<String> = self.words.iter().map(|w| regex::escape(w)).collect();
        format!("(?:{})", words.join("|"))
    }

    fn resolve(&self, _value: Option<&str>) -> String {
        self.words.first().cloned().unwrap_or_default()
    }

    fn format(&self, _label: Option<&ArgLabel<'_>>) -> Rendered {
        let joined = self.words.join("/");
        Rendered {
            html: format!(
                r#"<span class="step-alternatives">{}</span>"#,
                escape_html(&joined)
            ),
            plain: joined,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn enum_values_are_trimmed_and_escaped() {
        let (len, alternation) = EnumAlternation::detect(&Scan::new("( a.b | c ) rest", 0))
            .unwrap_or_else(|| panic!("enum should be detected"));
        assert_eq!(len, 11);
        assert_eq!(alternation.values, vec!["a.b", "c"]);
        assert_eq!(alternation.regex_fragment(), r"(a\.b|c)");
    }

    #[rstest]
    #[case("(manager)")]
    #[case("(|)")]
    #[case("(a|b")]
    fn enum_requires_a_closed_piped_group(#[case] input: &str) {
        assert_eq!(EnumAlternation::detect(&Scan::new(input, 0)), None);
    }

    #[rstest]
    #[case(Some("seller"), "seller")]
    #[case(Some(""), "manager")]
    #[case(None, "manager")]
    fn enum_resolves_to_choice_or_first_value(#[case] value: Option<&str>, #[case] expected: &str) {
        let alternation = EnumAlternation {
            values: vec!["manager".into(), "seller".into()],
        };
        assert_eq!(alternation.resolve(value), expected);
    }

    #[rstest]
    #[case(r"(a\/b|c)", vec!["a/b", "c"])]
    #[case(r"(\(x\)|y)", vec!["(x)", "y"])]
    fn enum_values_drop_escape_backslashes(#[case] input: &str, #[case] expected: Vec<&str>) {
        let found = EnumAlternation::detect(&Scan::new(input, 0)).map(|(len, alt)| (len, alt.values));
        assert_eq!(found, Some((input.len(), expected.into_iter().map(String::from).collect())));
    }

    #[rstest]
    #[case("(s) left", Some(3))]
    #[case(r"(\(s\)) now", Some(7))]
    #[case(" ({int} seconds)", None)]
    #[case("( {int} seconds)", Some(16))]
    #[case(r"(a\d) b", Some(5))]
    #[case(r"(a\)", None)]
    #[case("(a (b))", None)]
    fn optional_group_spans_to_the_unescaped_close(
        #[case] input: &str,
        #[case] group_len: Option<usize>,
    ) {
        let found = OptionalOpen::detect(&Scan::new(input, 0));
        assert_eq!(found, group_len.map(|group_len| (1, OptionalOpen { group_len })));
    }

    #[rstest]
    #[case("()")]
    #[case("( )")]
    #[case("(a|b)")]
    fn optional_text_rejects_empty_and_piped_groups(#[case] input: &str) {
        assert_eq!(OptionalOpen::detect(&Scan::new(input, 0)), None);
    }

    #[test]
    fn optional_markers_wrap_the_body() {
        let open = OptionalOpen { group_len: 3 };
        assert_eq!(
            format!("{}s{}", open.regex_fragment(), OptionalClose.regex_fragment()),
            "(?:s)?"
        );
        assert_eq!(open.resolve(None), "");
        assert_eq!(OptionalClose.format(None).plain, ")");
    }

    #[test]
    fn alternatives_require_a_word_boundary() {
        assert_eq!(
            AlternativeWords::detect(&Scan::new("x a/b", 2)).map(|(len, alt)| (len, alt.words)),
            Some((3, vec!["a".to_string(), "b".to_string()]))
        );
        assert_eq!(AlternativeWords::detect(&Scan::new("xa/b", 1)), None);
        assert_eq!(AlternativeWords::detect(&Scan::new("ab", 0)), None);
        assert_eq!(AlternativeWords::detect(&Scan::in_group("a/b", 0)), None);
    }

    #[test]
    fn alternatives_compile_and_resolve() {
        let alternatives = AlternativeWords {
            words: vec!["log".into(), "sign".into(), "check".into()],
        };
        assert_eq!(alternatives.regex_fragment(), "(?:log|sign|check)");
        assert_eq!(alternatives.resolve(None), "log");
        assert_eq!(alternatives.format(None).plain, "log/sign/check");
    }
}
