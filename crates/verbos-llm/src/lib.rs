//! Verbos LLM Provider Layer
//!
//! Implementations of the `CompletionClient` trait from `verbos-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Scripted, deterministic provider for testing
//! - `OpenAiProvider`: Chat-completions HTTP API integration
//!
//! # Examples
//!
//! ```
//! use verbos_llm::MockProvider;
//! use verbos_domain::CompletionClient;
//!
//! let provider = MockProvider::new("infinitivo: hablar");
//! let result = provider.request("test prompt").unwrap();
//! assert_eq!(result, "infinitivo: hablar");
//! ```

#![warn(missing_docs)]

pub mod openai;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use verbos_domain::CompletionClient;

pub use openai::{OpenAiProvider, ProviderSettings};

/// Errors that can occur during completion requests
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// Network or transport failure (unreachable host, timeout, TLS)
    #[error("Communication error: {0}")]
    Communication(String),

    /// Credential was rejected by the service
    #[error("Authentication rejected: {0}")]
    Authentication(String),

    /// No credential was supplied
    #[error("Missing API credential")]
    MissingCredential,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Service answered with a non-success status
    #[error("Service error (HTTP {status}): {message}")]
    Service {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Response could not be decoded into a completion
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Scripted LLM provider for deterministic testing
///
/// Responses queued with [`push_response`](Self::push_response) and
/// [`push_error`](Self::push_error) are returned in order; once the queue is
/// empty every call returns the default response. No network calls are made.
///
/// # Examples
///
/// ```
/// use verbos_llm::{LlmError, MockProvider};
/// use verbos_domain::CompletionClient;
///
/// let provider = MockProvider::new("fallback");
/// provider.push_response("first");
/// provider.push_error(LlmError::RateLimitExceeded);
///
/// assert_eq!(provider.request("a").unwrap(), "first");
/// assert!(provider.request("b").is_err());
/// assert_eq!(provider.request("c").unwrap(), "fallback");
/// assert_eq!(provider.call_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    queue: Arc<Mutex<VecDeque<Result<String, LlmError>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            queue: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a provider that answers with the given responses in order
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let provider = Self::default();
        for response in responses {
            provider.push_response(response);
        }
        provider
    }

    /// Queue a successful response
    pub fn push_response(&self, response: impl Into<String>) {
        self.lock_queue().push_back(Ok(response.into()));
    }

    /// Queue a failure
    pub fn push_error(&self, error: LlmError) {
        self.lock_queue().push_back(Err(error));
    }

    /// Get the number of times request was called
    pub fn call_count(&self) -> usize {
        self.lock_prompts().len()
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.lock_prompts().clone()
    }

    fn lock_queue(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<String, LlmError>>> {
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_prompts(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.prompts.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl CompletionClient for MockProvider {
    type Error = LlmError;

    fn request(&self, prompt: &str) -> Result<String, Self::Error> {
        self.lock_prompts().push(prompt.to_string());

        match self.lock_queue().pop_front() {
            Some(scripted) => scripted,
            None => Ok(self.default_response.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.request("any prompt");
        assert_eq!(result.unwrap(), "Test response");
    }

    #[test]
    fn test_mock_provider_queued_responses() {
        let provider = MockProvider::with_responses(["one", "two"]);

        assert_eq!(provider.request("a").unwrap(), "one");
        assert_eq!(provider.request("b").unwrap(), "two");
        assert_eq!(provider.request("c").unwrap(), "Default mock response");
    }

    #[test]
    fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");

        assert_eq!(provider.call_count(), 0);

        provider.request("prompt1").unwrap();
        assert_eq!(provider.call_count(), 1);

        provider.request("prompt2").unwrap();
        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.prompts(), vec!["prompt1", "prompt2"]);
    }

    #[test]
    fn test_mock_provider_error() {
        let provider = MockProvider::default();
        provider.push_error(LlmError::Communication("connection refused".to_string()));

        let result = provider.request("bad prompt");
        assert!(matches!(result.unwrap_err(), LlmError::Communication(_)));
    }

    #[test]
    fn test_mock_provider_clone() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.request("test").unwrap();

        // Both should share the same call log due to Arc
        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }

    #[test]
    fn test_error_messages() {
        let err = LlmError::Service {
            status: 503,
            message: "overloaded".to_string(),
        };
        assert_eq!(err.to_string(), "Service error (HTTP 503): overloaded");
        assert_eq!(LlmError::MissingCredential.to_string(), "Missing API credential");
    }
}
