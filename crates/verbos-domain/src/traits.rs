//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

/// Trait for generative-model completion services
///
/// Implemented by the infrastructure layer (verbos-llm).
///
/// One call is one network exchange. Implementations must not retry
/// internally; retry and correction policy belongs to the caller.
pub trait CompletionClient {
    /// Error type for completion failures
    type Error;

    /// Send a prompt and return the raw completion text
    fn request(&self, prompt: &str) -> Result<String, Self::Error>;
}

impl<T: CompletionClient + ?Sized> CompletionClient for &T {
    type Error = T::Error;

    fn request(&self, prompt: &str) -> Result<String, Self::Error> {
        (**self).request(prompt)
    }
}
