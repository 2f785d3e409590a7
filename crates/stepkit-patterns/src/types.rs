//! Plain data passed in and out of the engine.
//!
//! Every type here is serialisable so step catalogues, editors and feature
//! file writers can exchange them across process boundaries without
//! conversion.

use serde::{Deserialize, Serialize};

use crate::keyword::StepKeyword;

/// Type of value an argument accepts.
///
/// # Examples
/// ```
/// use stepkit_patterns::ArgType;
///
/// assert_eq!(ArgType::Enum.specificity(), 80);
/// assert_eq!(ArgType::Any.as_str(), "any");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgType {
    /// Quoted or bare text, written as `{string}`.
    String,
    /// Signed integer, written as `{int}`.
    Int,
    /// Signed decimal, written as `{float}`.
    Float,
    /// A run of non-space characters, written as `{word}`.
    Word,
    /// Unconstrained value, written as `{any}` or `{}`.
    Any,
    /// One of a closed set of literals, written as `(a|b|c)`.
    Enum,
    /// Multi-row data table declared by a trailing `(col, ...) :` suffix.
    Table,
}

impl ArgType {
    /// Cucumber type name as it appears inside braces and on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Word => "word",
            Self::Any => "any",
            Self::Enum => "enum",
            Self::Table => "table",
        }
    }

    /// Parse one of the five cucumber type names.
    ///
    /// `enum` and `table` have no brace syntax and are rejected.
    #[must_use]
    pub fn from_cucumber_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            "word" => Some(Self::Word),
            "any" => Some(Self::Any),
            _ => None,
        }
    }

    /// Weight this argument kind contributes to a definition's specificity.
    ///
    /// More constrained kinds weigh more, so a definition built from closed
    /// choices outranks one that accepts free text in the same position.
    #[must_use]
    pub const fn specificity(self) -> u32 {
        match self {
            Self::Table => 90,
            Self::Enum => 80,
            Self::Int | Self::Float => 60,
            Self::String => 40,
            Self::Word => 30,
            Self::Any => 20,
        }
    }

    /// Whether values of this type arrive through a regex capture.
    #[must_use]
    pub const fn is_captured(self) -> bool {
        !matches!(self, Self::Table)
    }
}

/// One typed argument declared by a step pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentDefinition {
    /// Explicit cucumber name, or `argN` for the argument's ordinal position.
    pub name: String,
    /// Kind of value the argument accepts.
    #[serde(rename = "type")]
    pub arg_type: ArgType,
    /// Whether the step needs a value for this argument.
    #[serde(default = "required_by_default")]
    pub required: bool,
    /// Declared alternatives; present only for [`ArgType::Enum`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    /// Declared column headers; present only for [`ArgType::Table`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_columns: Option<Vec<String>>,
}

const fn required_by_default() -> bool {
    true
}

impl ArgumentDefinition {
    /// Create a required argument of the given type.
    #[must_use]
    pub fn new(name: impl Into<String>, arg_type: ArgType) -> Self {
        Self {
            name: name.into(),
            arg_type,
            required: true,
            enum_values: None,
            table_columns: None,
        }
    }

    /// Create an enum argument offering `values`.
    #[must_use]
    pub fn enumeration(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            enum_values: Some(values),
            ..Self::new(name, ArgType::Enum)
        }
    }

    /// Create a data-table argument, optionally with declared columns.
    #[must_use]
    pub fn table(name: impl Into<String>, columns: Option<Vec<String>>) -> Self {
        Self {
            table_columns: columns,
            ..Self::new(name, ArgType::Table)
        }
    }

    /// Declared enum alternatives, or an empty slice.
    #[must_use]
    pub fn enum_values(&self) -> &[String] {
        self.enum_values.as_deref().unwrap_or_default()
    }
}

/// Argument definition paired with the concrete value chosen for it.
///
/// # Examples
/// ```
/// use stepkit_patterns::{ArgType, ConcreteArg};
///
/// let arg = ConcreteArg::typed(ArgType::String, "alice");
/// assert_eq!(arg.arg_type(), ArgType::String);
/// assert_eq!(arg.value, "alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcreteArg {
    /// The argument this value belongs to.
    #[serde(flatten)]
    pub definition: ArgumentDefinition,
    /// Captured or chosen value; may be empty.
    #[serde(default)]
    pub value: String,
}

impl ConcreteArg {
    /// Pair a definition with a value.
    #[must_use]
    pub fn new(definition: ArgumentDefinition, value: impl Into<String>) -> Self {
        Self {
            definition,
            value: value.into(),
        }
    }

    /// Build an anonymous value of the given type.
    #[must_use]
    pub fn typed(arg_type: ArgType, value: impl Into<String>) -> Self {
        Self::new(ArgumentDefinition::new(String::new(), arg_type), value)
    }

    /// Type of the underlying definition.
    #[must_use]
    pub const fn arg_type(&self) -> ArgType {
        self.definition.arg_type
    }
}

/// Source location of a step definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepLocation {
    /// File declaring the step.
    pub file: String,
    /// One-based line number within `file`.
    pub line: u32,
}

/// Externally supplied step definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDefinition {
    /// Caller-assigned identifier.
    pub id: String,
    /// Step pattern in the hybrid DSL.
    pub pattern: String,
    /// Keyword the definition was registered under.
    pub keyword: StepKeyword,
    /// Arguments in pattern order.
    #[serde(default)]
    pub args: Vec<ArgumentDefinition>,
    /// Where the definition lives, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<StepLocation>,
}

impl StepDefinition {
    /// Build a definition whose arguments are extracted from `pattern`.
    ///
    /// # Examples
    /// ```
    /// use stepkit_patterns::{ArgType, StepDefinition, StepKeyword};
    ///
    /// let def = StepDefinition::from_pattern("login", "I log in as {string}", StepKeyword::Given);
    /// assert_eq!(def.args.len(), 1);
    /// assert_eq!(def.args[0].arg_type, ArgType::String);
    /// ```
    #[must_use]
    pub fn from_pattern(
        id: impl Into<String>,
        pattern: impl Into<String>,
        keyword: StepKeyword,
    ) -> Self {
        let pattern = pattern.into();
        let args = crate::args::parse_args(&pattern);
        Self {
            id: id.into(),
            pattern,
            keyword,
            args,
            location: None,
        }
    }

    /// Attach a source location.
    #[must_use]
    pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.location = Some(StepLocation {
            file: file.into(),
            line,
        });
        self
    }
}

/// Outcome of matching step text against a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Pattern that matched, or the synthesised fallback pattern.
    pub pattern: String,
    /// Extracted values in argument order.
    pub args: Vec<ConcreteArg>,
    /// Identifier of the matching definition; absent for a fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_id: Option<String>,
}

impl MatchResult {
    /// Whether the result was synthesised rather than matched.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.definition_id.is_none()
    }

    /// Values only, in argument order.
    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        self.args.iter().map(|arg| arg.value.as_str()).collect()
    }
}

/// Whether a segment is literal text or an editable argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Literal pattern text.
    Text,
    /// An argument rendered as an inline control.
    Arg,
}

/// A slice of a pattern for inline editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSegment {
    /// Segment kind.
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    /// Raw pattern text covered by the segment.
    pub value: String,
    /// Merged argument metadata for [`SegmentKind::Arg`] segments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg: Option<ArgumentDefinition>,
}

impl PatternSegment {
    /// A literal text segment.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::Text,
            value: value.into(),
            arg: None,
        }
    }

    /// An argument segment.
    #[must_use]
    pub fn arg(value: impl Into<String>, arg: ArgumentDefinition) -> Self {
        Self {
            kind: SegmentKind::Arg,
            value: value.into(),
            arg: Some(arg),
        }
    }
}

/// Human-readable summary of one argument in a formatted pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgDescription {
    /// Ordinal position, matching `data-arg-index` in the HTML.
    pub index: usize,
    /// Label used in both the HTML and the plain text.
    pub name: String,
    /// Argument type.
    #[serde(rename = "type")]
    pub arg_type: ArgType,
    /// Short prose description.
    pub description: String,
    /// Unescaped enum alternatives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    /// Unescaped table columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_columns: Option<Vec<String>>,
}

/// Read-only rendering of a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedPattern {
    /// Highlighted markup with escaped literal text.
    pub html: String,
    /// The same rendering without markup.
    pub plain_text: String,
    /// One entry per argument placeholder, in order.
    pub arg_descriptions: Vec<ArgDescription>,
}
