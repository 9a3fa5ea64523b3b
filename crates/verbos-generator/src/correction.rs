//! Single-shot self-correction

use crate::document::CandidateDocument;
use crate::prompt::correction_prompt;
use tracing::debug;
use verbos_domain::{CompletionClient, Item};

/// Asks the completion service to repair a rejected document
///
/// Exactly one request per call. The engine never loops: the caller decides
/// what to do with a candidate that is still invalid.
pub struct CorrectionEngine<'c, C> {
    client: &'c C,
}

impl<'c, C: CompletionClient> CorrectionEngine<'c, C> {
    /// Create an engine that uses the given client
    pub fn new(client: &'c C) -> Self {
        Self { client }
    }

    /// Request a repaired document for `item`
    ///
    /// `original_prompt` is the prompt of the rejected attempt and `error` is
    /// the validator's description of what was wrong with it.
    pub fn correct(
        &self,
        item: &Item,
        original_prompt: &str,
        error: &str,
    ) -> Result<CandidateDocument, C::Error> {
        let prompt = correction_prompt(item, original_prompt, error);
        debug!(item = %item, prompt_len = prompt.len(), "Requesting correction");

        let raw = self.client.request(&prompt)?;
        Ok(CandidateDocument::from_completion(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verbos_llm::{LlmError, MockProvider};

    #[test]
    fn test_correct_issues_one_request() {
        let client = MockProvider::with_responses(["infinitivo: comer"]);
        let engine = CorrectionEngine::new(&client);
        let item = Item::new("comer").unwrap();

        let doc = engine
            .correct(&item, "Conjugate comer", "'infinitivo' is a required property")
            .unwrap();

        assert_eq!(doc.text(), "infinitivo: comer");
        assert_eq!(client.call_count(), 1);

        let sent = &client.prompts()[0];
        assert!(sent.starts_with("Conjugate comer"));
        assert!(sent.contains("'infinitivo' is a required property"));
    }

    #[test]
    fn test_correct_propagates_failure() {
        let client = MockProvider::default();
        client.push_error(LlmError::RateLimitExceeded);
        let engine = CorrectionEngine::new(&client);
        let item = Item::new("comer").unwrap();

        let result = engine.correct(&item, "prompt", "error");
        assert_eq!(result.unwrap_err(), LlmError::RateLimitExceeded);
        assert_eq!(client.call_count(), 1);
    }
}
