//! OpenAI-compatible Provider Implementation
//!
//! Talks to any service exposing the `/chat/completions` endpoint (OpenAI,
//! LM Studio, vLLM, Ollama's compatibility layer).
//!
//! # Features
//!
//! - Blocking HTTP communication, one exchange per request
//! - Configurable endpoint, model, temperature and transport timeout
//! - Status codes mapped onto [`LlmError`] variants
//!
//! Retrying is left to the caller.
//!
//! # Examples
//!
//! ```no_run
//! use verbos_llm::{OpenAiProvider, ProviderSettings};
//! use verbos_domain::CompletionClient;
//!
//! let provider = OpenAiProvider::new(ProviderSettings::default(), "sk-...").unwrap();
//! let yaml = provider.request("Conjugate the Spanish verb \"comer\"").unwrap();
//! ```

use crate::LlmError;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use verbos_domain::CompletionClient;

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default transport timeout (2 minutes; full conjugation tables are long)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

const SYSTEM_MESSAGE: &str = "You are a helpful assistant.";

/// Connection settings for [`OpenAiProvider`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Base URL, without the `/chat/completions` suffix
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Transport timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ProviderSettings {
    /// Validate the settings
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("endpoint cannot be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model cannot be empty".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!("temperature must be within 0.0-2.0, got {}", self.temperature));
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Chat-completions provider
pub struct OpenAiProvider {
    settings: ProviderSettings,
    api_key: String,
    client: reqwest::blocking::Client,
}

/// Request body for the chat-completions API
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response from the chat-completions API
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a new provider
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingCredential`] if `api_key` is blank, and
    /// [`LlmError::Communication`] if the HTTP client cannot be built.
    pub fn new(settings: ProviderSettings, api_key: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::MissingCredential);
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| LlmError::Communication(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            settings,
            api_key,
            client,
        })
    }

    /// Model name used for requests
    pub fn model(&self) -> &str {
        &self.settings.model
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.settings.endpoint.trim_end_matches('/'))
    }

    /// Issue one chat-completions request
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The service is unreachable or the transport times out
    /// - The credential is rejected (HTTP 401/403)
    /// - The rate limit is hit (HTTP 429)
    /// - The service answers with any other non-success status
    /// - The body is not a chat completion or carries no content
    pub fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = ChatCompletionRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_MESSAGE,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.settings.temperature,
        };

        let response = self
            .client
            .post(self.url())
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(map_status(status, error_text));
        }

        let completion = response
            .json::<ChatCompletionResponse>()
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        extract_content(completion)
    }
}

fn map_status(status: StatusCode, body: String) -> LlmError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Authentication(body),
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
        _ => LlmError::Service {
            status: status.as_u16(),
            message: body,
        },
    }
}

fn extract_content(completion: ChatCompletionResponse) -> Result<String, LlmError> {
    let content = completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse("Response contained no choices".to_string()))?
        .message
        .content
        .unwrap_or_default();

    let content = content.trim();
    if content.is_empty() {
        return Err(LlmError::InvalidResponse("Completion was empty".to_string()));
    }
    Ok(content.to_string())
}

impl CompletionClient for OpenAiProvider {
    type Error = LlmError;

    fn request(&self, prompt: &str) -> Result<String, Self::Error> {
        self.complete(prompt)
    }
}
