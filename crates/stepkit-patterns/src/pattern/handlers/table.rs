//! Trailing data-table declarations: `(col1, col2) :` or a bare `:`.
//!
//! Tables never take part in text matching. Their rows come from the
//! DataTable block below the step, so every consumer collapses the
//! declaration to the colon that ends the step line.

use regex::Regex;
use std::sync::LazyLock;

use super::{ArgLabel, Construct, Detect, Rendered, Scan, arg_placeholder, auto_name};
use crate::types::{ArgType, ArgumentDefinition};

static TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A\s*\(([^()|]*)\)\s*:\s*\z")
        .unwrap_or_else(|_| unreachable!("table declaration regex is valid"))
});

static BARE_COLON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A:\s*\z").unwrap_or_else(|_| unreachable!("bare colon regex is valid"))
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TableDecl {
    pub columns: Option<Vec<String>>,
}

impl Detect for TableDecl {
    fn detect(scan: &Scan<'_>) -> Option<(usize, Self)> {
        if scan.is_in_group() {
            return None;
        }
        let rest = scan.rest();
        let first = rest.chars().next()?;
        if !(first.is_whitespace() || first == '(' || first == ':') {
            return None;
        }
        if let Some(caps) = TABLE_RE.captures(rest) {
            let columns: Vec<String> = caps
                .get(1)?
                .as_str()
                .split(',')
                .map(str::trim)
                .filter(|column| !column.is_empty())
                .map(str::to_string)
                .collect();
            let columns = (!columns.is_empty()).then_some(columns);
            return Some((rest.len(), Self { columns }));
        }
        BARE_COLON_RE
            .is_match(rest)
            .then_some((rest.len(), Self { columns: None }))
    }
}

impl Construct for TableDecl {
    fn regex_fragment(&self) -> String {
        ":".into()
    }

    fn resolve(&self, _value: Option<&str>) -> String {
        ":".into()
    }

    fn to_arg_def(&self, index: usize) -> Option<ArgumentDefinition> {
        Some(ArgumentDefinition::table(
            auto_name(index),
            self.columns.clone(),
        ))
    }

    fn format(&self, label: Option<&ArgLabel<'_>>) -> Rendered {
        let placeholder = arg_placeholder(ArgType::Table, label);
        Rendered {
            html: format!(": {}", placeholder.html),
            plain: format!(": {}", placeholder.plain),
        }
    }
}
