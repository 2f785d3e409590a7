//! Step-pattern processing for BDD step definitions.
//!
//! Patterns mix Cucumber expressions (`{int}`, `{string:name}`, `{}`),
//! enum alternations (`(a|b)`), optional text (`cucumber(s)`), alternative
//! words (`log/sign`), outline references (`<name>`), escapes and a trailing
//! data-table declaration (`(col, ...) :`). Every operation lexes the pattern
//! into one token stream, so argument extraction, regex compilation, text
//! resolution, segmentation and display formatting always agree on where the
//! arguments are.
//!
//! All functions are pure: they take plain data and return plain,
//! serialisable data.

mod args;
mod best_match;
mod errors;
mod format;
mod keyword;
mod matcher;
mod pattern;
mod resolve;
mod segments;
mod specificity;
mod types;

pub use args::parse_args;
pub use best_match::{RankedMatch, fallback_match, find_best_match, rank_matches};
pub use errors::{PatternError, StepKeywordParseError};
pub use format::format_pattern;
pub use keyword::StepKeyword;
pub use matcher::match_step;
pub use pattern::{build_regex_from_pattern, compile_regex_from_pattern};
pub use resolve::resolve_pattern;
pub use segments::parse_segments;
pub use specificity::SpecificityScore;
pub use types::{
    ArgDescription, ArgType, ArgumentDefinition, ConcreteArg, FormattedPattern, MatchResult,
    PatternSegment, SegmentKind, StepDefinition, StepLocation,
};
