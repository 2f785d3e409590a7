//! Command line front end for `stepkit-patterns`.
//!
//! Every library operation is exposed as a subcommand printing JSON, which
//! makes patterns easy to inspect from scripts and editors.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
