//! Error types for the generator

use std::path::PathBuf;
use thiserror::Error;
use verbos_domain::ItemError;

/// Errors that abort a run or reject an input
///
/// Per-item failures during a batch are not errors of this type; they are
/// reported through [`verbos_domain::ItemReport`].
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Schema file does not exist
    #[error("Schema file not found: {}", .0.display())]
    MissingSchema(PathBuf),

    /// Schema could not be parsed or is structurally unusable
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// Worked example file does not exist
    #[error("Example file not found: {}. Please provide a valid example document.", .0.display())]
    MissingExample(PathBuf),

    /// Worked example exists but does not satisfy the schema
    #[error("Example file {} does not satisfy the schema: {error}", .path.display())]
    InvalidExample {
        /// Path of the example
        path: PathBuf,
        /// Validation error
        error: String,
    },

    /// A required prompt input was empty
    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    /// Item identifier rejected
    #[error("Invalid item: {0}")]
    InvalidItem(#[from] ItemError),

    /// Artifact could not be written
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error while reading inputs
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_yaml::Error> for GeneratorError {
    fn from(e: serde_yaml::Error) -> Self {
        GeneratorError::InvalidSchema(e.to_string())
    }
}
