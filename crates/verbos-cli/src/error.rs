//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No API key in the environment or on the command line
    #[error("OPENAI_API_KEY is not set. Export it or pass --api-key.")]
    MissingCredential,

    /// Generator error
    #[error(transparent)]
    Generator(#[from] verbos_generator::GeneratorError),

    /// Completion provider error
    #[error("LLM error: {0}")]
    Llm(#[from] verbos_llm::LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Requested artifact does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The batch finished but some items failed
    #[error("{0} item(s) failed")]
    ItemsFailed(usize),
}

impl CliError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::ItemsFailed(_) => 2,
            _ => 1,
        }
    }
}

impl From<verbos_domain::ItemError> for CliError {
    fn from(e: verbos_domain::ItemError) -> Self {
        CliError::Generator(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::ItemsFailed(3).exit_code(), 2);
        assert_eq!(CliError::MissingCredential.exit_code(), 1);
        assert_eq!(CliError::Config("bad".into()).exit_code(), 1);
    }

    #[test]
    fn test_item_error_conversion() {
        let err: CliError = verbos_domain::ItemError::Empty.into();
        assert!(err.to_string().contains("Invalid item"));
    }
}
