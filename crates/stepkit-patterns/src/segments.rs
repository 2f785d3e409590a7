//! Splitting a pattern into editable segments.

use crate::pattern::handlers::Piece;
use crate::pattern::lexer::{ends_with_table, lex_pattern};
use crate::types::{ArgType, ArgumentDefinition, PatternSegment, SegmentKind};

/// Combine the pattern's view of an argument with caller metadata at the
/// same ordinal position.
fn merge(parsed: ArgumentDefinition, existing: Option<&ArgumentDefinition>) -> ArgumentDefinition {
    let Some(existing) = existing else {
        return parsed;
    };
    let enum_values = match parsed.arg_type {
        ArgType::Enum if existing.enum_values().is_empty() => parsed.enum_values,
        ArgType::Enum => existing.enum_values.clone(),
        _ => None,
    };
    ArgumentDefinition {
        name: existing.name.clone(),
        arg_type: parsed.arg_type,
        required: existing.required,
        enum_values,
        table_columns: parsed.table_columns,
    }
}

/// Ordered text and argument segments covering the whole pattern.
///
/// Enum alternations, cucumber parameters, `{}` and `<name>` references
/// become argument segments; everything between them, including anchors,
/// escapes, optional text, alternatives and table declarations, is text.
///
/// `existing` supplies caller metadata in [`parse_args`](crate::parse_args)
/// order: names and `required` come from it, types and table columns from
/// the pattern, and enum values from it only when it lists any for an enum.
/// Outline references are named after their column and take no caller
/// metadata. When the pattern ends in a table, `parse_args` describes only
/// the table, so inline arguments keep their pattern-derived definitions.
///
/// Concatenating the segment values reproduces `pattern`.
///
/// # Examples
/// ```
/// use stepkit_patterns::{SegmentKind, parse_segments};
///
/// let segments = parse_segments("I pick (red|blue) now", &[]);
/// let kinds: Vec<SegmentKind> = segments.iter().map(|s| s.kind).collect();
/// assert_eq!(kinds, [SegmentKind::Text, SegmentKind::Arg, SegmentKind::Text]);
/// assert_eq!(segments[1].value, "(red|blue)");
/// ```
#[must_use]
pub fn parse_segments(pattern: &str, existing: &[ArgumentDefinition]) -> Vec<PatternSegment> {
    let tokens = lex_pattern(pattern);
    let existing: &[ArgumentDefinition] = if ends_with_table(&tokens) {
        &[]
    } else {
        existing
    };
    let mut segments: Vec<PatternSegment> = Vec::new();
    let mut ordinal = 0;

    for token in &tokens {
        let arg = match &token.piece {
            Piece::Outline(outline) => Some(ArgumentDefinition::new(
                outline.name.clone(),
                ArgType::String,
            )),
            Piece::Enum(_) | Piece::Cucumber(_) | Piece::Anonymous(_) => {
                let parsed = token.piece.construct().to_arg_def(ordinal);
                let merged = parsed.map(|parsed| merge(parsed, existing.get(ordinal)));
                ordinal += 1;
                merged
            }
            _ => None,
        };
        if let Some(arg) = arg {
            segments.push(PatternSegment::arg(token.raw, arg));
            continue;
        }
        match segments.last_mut() {
            Some(last) if last.kind == SegmentKind::Text => last.value.push_str(token.raw),
            _ => segments.push(PatternSegment::text(token.raw)),
        }
    }
    segments
}
