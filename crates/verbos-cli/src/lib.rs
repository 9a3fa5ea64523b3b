//! Verbos CLI library.
//!
//! This library provides the core functionality for the `verbos` command-line
//! interface, including configuration management, command execution, the
//! typed conjugation record, and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod conjugation;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use conjugation::VerbConjugation;
pub use error::{CliError, Result};
pub use output::Formatter;
