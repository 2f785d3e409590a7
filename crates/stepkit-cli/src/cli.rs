//! Command dispatch for the `stepkit` entrypoint.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use eyre::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use stepkit_patterns::{
    ArgumentDefinition, ConcreteArg, StepDefinition, StepKeyword, build_regex_from_pattern,
    find_best_match, format_pattern, match_step, parse_args, parse_segments, rank_matches,
    resolve_pattern,
};

use crate::config::{CliConfig, LogLevel};
use crate::logging::init_logging;

/// Inspect, match and render BDD step patterns.
#[derive(Parser, Debug)]
#[command(name = "stepkit", author, version, about)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,
    /// Indent JSON output.
    #[arg(long, global = true)]
    pretty: bool,
    #[command(subcommand)]
    command: Commands,
}

/// Supported commands. Each prints one JSON document to stdout.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the arguments a pattern declares.
    Args {
        /// Step pattern.
        pattern: String,
    },
    /// Print the regular expression a pattern compiles to.
    Regex {
        /// Step pattern.
        pattern: String,
    },
    /// Match step text against a single pattern.
    Match {
        /// Step pattern.
        pattern: String,
        /// Literal step text.
        text: String,
    },
    /// Pick the best definition for step text.
    Best {
        /// Literal step text.
        text: String,
        /// Keyword the step is written with.
        #[arg(long, default_value = "Given")]
        keyword: StepKeyword,
        /// JSON file holding an array of step definitions.
        #[arg(long)]
        definitions: Option<PathBuf>,
        /// Print every matching candidate with its score instead.
        #[arg(long)]
        all: bool,
    },
    /// Render a pattern as step text with the given values.
    Resolve {
        /// Step pattern.
        pattern: String,
        /// Argument values, in argument order.
        #[arg(long = "value")]
        values: Vec<String>,
    },
    /// Split a pattern into text and argument segments.
    Segments {
        /// Step pattern.
        pattern: String,
        /// JSON file holding an array of argument definitions to merge.
        #[arg(long)]
        existing: Option<PathBuf>,
    },
    /// Render a pattern for display.
    Format {
        /// Step pattern.
        pattern: String,
    },
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Self::Args { .. } => "args",
            Self::Regex { .. } => "regex",
            Self::Match { .. } => "match",
            Self::Best { .. } => "best",
            Self::Resolve { .. } => "resolve",
            Self::Segments { .. } => "segments",
            Self::Format { .. } => "format",
        }
    }
}

#[derive(Serialize)]
struct RegexOutput {
    regex: String,
}

#[derive(Serialize)]
struct ResolveOutput {
    text: String,
}

/// Parse arguments, configure logging and run the requested command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, an input file cannot be
/// read or parsed, or output cannot be written.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::from_env()?.apply_overrides(cli.log_level, cli.pretty.then_some(true));
    init_logging(&config);
    tracing::debug!(command = cli.command.name(), "running command");

    let mut stdout = io::stdout();
    execute(cli.command, config.pretty, &mut stdout)?;
    stdout.flush().wrap_err("failed to flush JSON output")
}

/// Run `command` and write its JSON result to `writer`.
///
/// # Errors
///
/// Returns an error if an input file cannot be read or parsed, or output
/// cannot be written.
pub fn execute(command: Commands, pretty: bool, writer: &mut dyn Write) -> Result<()> {
    match command {
        Commands::Args { pattern } => write_json(writer, &parse_args(&pattern), pretty),
        Commands::Regex { pattern } => {
            let output = RegexOutput {
                regex: build_regex_from_pattern(&pattern),
            };
            write_json(writer, &output, pretty)
        }
        Commands::Match { pattern, text } => {
            let definition = StepDefinition::from_pattern("pattern", pattern, StepKeyword::Given);
            write_json(writer, &match_step(&text, &definition), pretty)
        }
        Commands::Best {
            text,
            keyword,
            definitions,
            all,
        } => {
            let definitions = match definitions {
                Some(path) => load_definitions(&path)?,
                None => Vec::new(),
            };
            if all {
                write_json(writer, &rank_matches(&text, keyword, &definitions), pretty)
            } else {
                write_json(writer, &find_best_match(&text, keyword, &definitions), pretty)
            }
        }
        Commands::Resolve { pattern, values } => {
            let values: Vec<ConcreteArg> = parse_args(&pattern)
                .into_iter()
                .zip(values)
                .map(|(definition, value)| ConcreteArg::new(definition, value))
                .collect();
            let output = ResolveOutput {
                text: resolve_pattern(&pattern, &values),
            };
            write_json(writer, &output, pretty)
        }
        Commands::Segments { pattern, existing } => {
            let existing: Vec<ArgumentDefinition> = match existing {
                Some(path) => read_json(&path)?,
                None => Vec::new(),
            };
            write_json(writer, &parse_segments(&pattern, &existing), pretty)
        }
        Commands::Format { pattern } => write_json(writer, &format_pattern(&pattern), pretty),
    }
}

/// Read step definitions, extracting arguments for entries that omit them.
fn load_definitions(path: &Path) -> Result<Vec<StepDefinition>> {
    let mut definitions: Vec<StepDefinition> = read_json(path)?;
    for definition in &mut definitions {
        if definition.args.is_empty() {
            definition.args = parse_args(&definition.pattern);
        }
    }
    tracing::debug!(
        count = definitions.len(),
        path = %path.display(),
        "loaded step definitions"
    );
    Ok(definitions)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents).wrap_err_with(|| format!("invalid JSON in {}", path.display()))
}

fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T, pretty: bool) -> Result<()> {
    let serialised = if pretty {
        serde_json::to_writer_pretty(&mut *writer, value)
    } else {
        serde_json::to_writer(&mut *writer, value)
    };
    serialised.wrap_err("failed to serialise output to JSON")?;
    writer
        .write_all(b"\n")
        .wrap_err("failed to terminate JSON output with newline")
}
