//! Constructs that never take a value: text, anchors, escapes and
//! scenario-outline references.

use regex::Regex;
use std::sync::LazyLock;

use super::{ArgLabel, Construct, Detect, Rendered, Scan, escape_html};

/// Characters the grammar lets a backslash protect. Besides the construct
/// delimiters, `^`, `$` and `:` can be escaped so literal text may begin with
/// a caret or end with a dollar sign or colon.
pub(crate) const ESCAPABLE: &[char] = &['{', '}', '(', ')', '/', '^', '$', ':'];

static OUTLINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A<([^<>\s][^<>]*)>")
        .unwrap_or_else(|_| unreachable!("outline placeholder regex is valid"))
});

/// Plain text between constructs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LiteralText(pub String);

impl Construct for LiteralText {
    fn regex_fragment(&self) -> String {
        regex::escape(&self.0)
    }

    fn resolve(&self, _value: Option<&str>) -> String {
        self.0.clone()
    }

    fn format(&self, _label: Option<&ArgLabel<'_>>) -> Rendered {
        Rendered {
            html: escape_html(&self.0),
            plain: self.0.clone(),
        }
    }
}

/// A leading `^` or trailing `$` copied from regex-style definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Anchor;

impl Construct for Anchor {
    fn regex_fragment(&self) -> String {
        String::new()
    }

    fn resolve(&self, _value: Option<&str>) -> String {
        String::new()
    }

    fn format(&self, _label: Option<&ArgLabel<'_>>) -> Rendered {
        Rendered::default()
    }
}

/// A backslash-protected grammar character such as `\(`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Escape(pub char);

impl Detect for Escape {
    fn detect(scan: &Scan<'_>) -> Option<(usize, Self)> {
        let mut chars = scan.rest().chars();
        if chars.next()? != '\\' {
            return None;
        }
        let escaped = chars.next().filter(|c| ESCAPABLE.contains(c))?;
        Some((1 + escaped.len_utf8(), Self(escaped)))
    }
}

impl Construct for Escape {
    fn regex_fragment(&self) -> String {
        regex::escape(self.0.encode_utf8(&mut [0; 4]))
    }

    fn resolve(&self, _value: Option<&str>) -> String {
        self.0.to_string()
    }

    fn format(&self, _label: Option<&ArgLabel<'_>>) -> Rendered {
        let literal = self.0.to_string();
        Rendered {
            html: escape_html(&literal),
            plain: literal,
        }
    }
}

/// A `<name>` reference to an Examples column, resolved outside the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OutlinePlaceholder {
    pub name: String,
}

impl OutlinePlaceholder {
    fn literal(&self) -> String {
        format!("<{}>", self.name)
    }
}

impl Detect for OutlinePlaceholder {
    fn detect(scan: &Scan<'_>) -> Option<(usize, Self)> {
        let caps = OUTLINE_RE.captures(scan.rest())?;
        let whole = caps.get(0)?;
        let name = caps.get(1)?.as_str().to_string();
        Some((whole.end(), Self { name }))
    }
}

impl Construct for OutlinePlaceholder {
    fn regex_fragment(&self) -> String {
        regex::escape(&self.literal())
    }

    fn resolve(&self, _value: Option<&str>) -> String {
        self.literal()
    }

    fn format(&self, _label: Option<&ArgLabel<'_>>) -> Rendered {
        let literal = self.literal();
        Rendered {
            html: escape_html(&literal),
            plain: literal,
        }
    }
}

/// Drop the backslash from every escape sequence in `text`.
pub(crate) fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(character) = chars.next() {
        if character == '\\' {
            if let Some(escaped) = chars.next_if(|next| ESCAPABLE.contains(next)) {
                out.push(escaped);
                continue;
            }
        }
        out.push(character);
    }
    out
}

/// Whether `value` is a whole `<name>` outline reference.
pub(crate) fn is_outline_reference(value: &str) -> bool {
    OUTLINE_RE
        .find(value)
        .is_some_and(|found| found.end() == value.len())
}
