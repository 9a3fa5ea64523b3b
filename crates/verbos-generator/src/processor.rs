//! Per-item generate → validate → correct → persist state machine

use crate::correction::CorrectionEngine;
use crate::document::CandidateDocument;
use crate::inputs::GenerationInputs;
use crate::store::ArtifactStore;
use std::fmt::Display;
use tracing::{debug, info, warn};
use verbos_domain::{CompletionClient, Item, ItemOutcome, ItemReport};

/// Where an item currently is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Pending,
    Requested,
    Validating,
    CorrectionRequested,
    Accepted,
    Failed,
}

/// Runs one item through the pipeline
///
/// Every path ends in an [`ItemReport`]; nothing escapes to abort the batch.
/// At most two completion requests are made per item: the initial one and a
/// single correction.
pub struct ItemProcessor<'a, C> {
    client: &'a C,
    inputs: &'a GenerationInputs,
    store: &'a ArtifactStore,
}

impl<'a, C> ItemProcessor<'a, C>
where
    C: CompletionClient,
    C::Error: Display,
{
    /// Create a new processor
    pub fn new(client: &'a C, inputs: &'a GenerationInputs, store: &'a ArtifactStore) -> Self {
        Self {
            client,
            inputs,
            store,
        }
    }

    /// Process one item to a terminal outcome
    pub fn process(&self, item: &Item) -> ItemReport {
        let mut calls = 0;
        let mut state = State::Pending;
        trace_state(item, state);

        let prompt = match self.inputs.prompt_for(item) {
            Ok(prompt) => prompt,
            Err(e) => return self.fail(item, calls, format!("cannot build prompt: {}", e)),
        };

        state = State::Requested;
        trace_state(item, state);
        calls += 1;
        let candidate = match self.client.request(&prompt) {
            Ok(raw) => CandidateDocument::from_completion(raw),
            // Transport and auth failures are not something a correction prompt can fix
            Err(e) => return self.fail(item, calls, format!("completion request failed: {}", e)),
        };

        state = State::Validating;
        trace_state(item, state);
        let validator = self.inputs.validator();
        let verdict = validator.validate(&candidate);
        let first_error = match verdict.error() {
            None => return self.accept(item, &candidate, ItemOutcome::Created, calls),
            Some(error) => error.to_string(),
        };

        state = State::CorrectionRequested;
        trace_state(item, state);
        info!(item = %item, error = %first_error, "First attempt rejected, requesting correction");
        calls += 1;
        let corrected = match CorrectionEngine::new(self.client).correct(item, &prompt, &first_error) {
            Ok(candidate) => candidate,
            Err(e) => return self.fail(item, calls, format!("correction request failed: {}", e)),
        };

        let verdict = validator.validate(&corrected);
        match verdict.error() {
            None => self.accept(item, &corrected, ItemOutcome::Corrected, calls),
            Some(error) => self.fail(item, calls, format!("corrected document still invalid: {}", error)),
        }
    }

    fn accept(
        &self,
        item: &Item,
        candidate: &CandidateDocument,
        outcome: ItemOutcome,
        calls: u32,
    ) -> ItemReport {
        match self.store.write(item, candidate.text()) {
            Ok(path) => {
                trace_state(item, State::Accepted);
                info!(item = %item, outcome = %outcome, path = %path.display(), "Artifact written");
                ItemReport::accepted(item.clone(), outcome, calls, path)
            }
            Err(e) => self.fail(item, calls, e.to_string()),
        }
    }

    fn fail(&self, item: &Item, calls: u32, error: String) -> ItemReport {
        trace_state(item, State::Failed);
        warn!(item = %item, calls, error = %error, "Item failed");
        ItemReport::failed(item.clone(), calls, error)
    }
}

fn trace_state(item: &Item, state: State) {
    debug!(item = %item, state = ?state, "Item state");
}
