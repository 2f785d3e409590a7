//! Recognisers for each construct of the step-pattern grammar.
//!
//! A construct kind is a type implementing [`Detect`] (how the lexer finds
//! it) and [`Construct`] (what every consumer does with it once found). The
//! lexer tries detectors in the order of [`HANDLERS`]; adding a construct
//! means adding a type, a [`Piece`] variant and a registry slot.

mod choice;
mod cucumber;
mod literal;
mod table;

use std::fmt::Write;

use crate::types::{ArgType, ArgumentDefinition};

pub(crate) use choice::{AlternativeWords, EnumAlternation, OptionalClose, OptionalOpen};
pub(crate) use cucumber::{AnonymousParam, CucumberParam, strip_quotes};
pub(crate) use literal::{Anchor, Escape, LiteralText, OutlinePlaceholder};
pub(crate) use table::TableDecl;

/// Position of the lexer within the anchor-free body of a pattern, or
/// within the body of an optional group.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scan<'a> {
    body: &'a str,
    pos: usize,
    in_group: bool,
}

impl<'a> Scan<'a> {
    pub(crate) const fn new(body: &'a str, pos: usize) -> Self {
        Self {
            body,
            pos,
            in_group: false,
        }
    }

    /// A scan over the body of an optional group.
    pub(crate) const fn in_group(body: &'a str, pos: usize) -> Self {
        Self {
            body,
            pos,
            in_group: true,
        }
    }

    /// Whether the scanned body sits inside parentheses.
    pub(crate) const fn is_in_group(&self) -> bool {
        self.in_group
    }

    /// Unconsumed input from the current position.
    pub(crate) fn rest(&self) -> &'a str {
        self.body.get(self.pos..).unwrap_or_default()
    }

    /// Character immediately before the current position.
    pub(crate) fn previous_char(&self) -> Option<char> {
        self.body.get(..self.pos)?.chars().next_back()
    }
}

/// Label attached to an argument placeholder when formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ArgLabel<'a> {
    pub index: usize,
    pub name: &'a str,
}

/// Display output of a single token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Rendered {
    pub html: String,
    pub plain: String,
}

/// Recognise a construct at the current scan position.
pub(crate) trait Detect: Sized {
    /// Return the byte length consumed and the parsed construct.
    fn detect(scan: &Scan<'_>) -> Option<(usize, Self)>;
}

/// Operations every consumer of the token stream needs from a construct.
pub(crate) trait Construct {
    /// Regex source for the construct. Argument constructs that capture
    /// contribute exactly one capture group; all others none.
    fn regex_fragment(&self) -> String;

    /// Literal text for the construct once `value` has been chosen.
    fn resolve(&self, value: Option<&str>) -> String;

    /// Argument definition, named `argN` unless the construct names itself.
    fn to_arg_def(&self, _index: usize) -> Option<ArgumentDefinition> {
        None
    }

    /// Display rendering. `label` is supplied for argument constructs.
    fn format(&self, label: Option<&ArgLabel<'_>>) -> Rendered;
}

/// A lexed construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Piece {
    Anchor(Anchor),
    Text(LiteralText),
    Escape(Escape),
    Table(TableDecl),
    Enum(EnumAlternation),
    Cucumber(CucumberParam),
    Anonymous(AnonymousParam),
    OptionalOpen(OptionalOpen),
    OptionalClose(OptionalClose),
    Alternatives(AlternativeWords),
    Outline(OutlinePlaceholder),
}

macro_rules! piece_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Piece {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*

        impl Piece {
            /// The construct behind this piece.
            pub(crate) fn construct(&self) -> &dyn Construct {
                match self {
                    $(Self::$variant(inner) => inner,)*
                }
            }
        }
    };
}

impl Piece {
    /// Whether the piece declares an argument.
    pub(crate) const fn is_argument(&self) -> bool {
        matches!(
            self,
            Self::Table(_) | Self::Enum(_) | Self::Cucumber(_) | Self::Anonymous(_)
        )
    }
}

piece_from!(
    Anchor(Anchor),
    Text(LiteralText),
    Escape(Escape),
    Table(TableDecl),
    Enum(EnumAlternation),
    Cucumber(CucumberParam),
    Anonymous(AnonymousParam),
    OptionalOpen(OptionalOpen),
    OptionalClose(OptionalClose),
    Alternatives(AlternativeWords),
    Outline(OutlinePlaceholder),
);

type Detector = fn(&Scan<'_>) -> Option<(usize, Piece)>;

fn detector<C: Detect + Into<Piece>>(scan: &Scan<'_>) -> Option<(usize, Piece)> {
    C::detect(scan).map(|(len, construct)| (len, construct.into()))
}

/// Detectors in priority order: escapes are protected before any construct
/// can claim their characters, tables before enums before cucumber types.
pub(crate) const HANDLERS: [Detector; 8] = [
    detector::<Escape>,
    detector::<TableDecl>,
    detector::<EnumAlternation>,
    detector::<CucumberParam>,
    detector::<AnonymousParam>,
    detector::<OptionalOpen>,
    detector::<AlternativeWords>,
    detector::<OutlinePlaceholder>,
];

/// Escape the five markup-significant characters.
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Placeholder rendering shared by every argument construct.
pub(crate) fn arg_placeholder(arg_type: ArgType, label: Option<&ArgLabel<'_>>) -> Rendered {
    let Some(label) = label else {
        return Rendered::default();
    };
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<span class="step-arg step-arg-{}" data-arg-index="{}">{}</span>"#,
        arg_type.as_str(),
        label.index,
        escape_html(label.name)
    );
    Rendered {
        html,
        plain: format!("[{}]", label.name),
    }
}

/// Name for an argument without an explicit cucumber name.
pub(crate) fn auto_name(index: usize) -> String {
    format!("arg{index}")
}
