//! Sequential batch driver

use crate::error::GeneratorError;
use crate::inputs::GenerationInputs;
use crate::processor::ItemProcessor;
use crate::store::ArtifactStore;
use std::fmt;
use std::fmt::Display;
use tracing::{debug, info};
use verbos_domain::{CompletionClient, Item, ItemOutcome, ItemReport};

/// Position of an item within its batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based position
    pub position: usize,
    /// Batch size
    pub total: usize,
}

impl Progress {
    /// Completed share of the batch, 0-100
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            100
        } else {
            self.position * 100 / self.total
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}/{} {:>3}%]", self.position, self.total, self.percent())
    }
}

/// Receives batch events as they happen
///
/// All methods default to doing nothing.
pub trait BatchObserver {
    /// An item reached its terminal outcome
    fn on_report(&mut self, _progress: Progress, _report: &ItemReport) {}

    /// A prompt was built in prompt-only mode
    fn on_prompt(&mut self, _item: &Item, _prompt: &str) {}

    /// An item would be processed (list mode)
    fn on_affected(&mut self, _item: &Item) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl BatchObserver for SilentObserver {}

/// Aggregate result of a batch
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Per-item reports, in input order
    pub reports: Vec<ItemReport>,
}

impl BatchSummary {
    /// Number of items with the given outcome
    pub fn count(&self, outcome: ItemOutcome) -> usize {
        self.reports.iter().filter(|r| r.outcome == outcome).count()
    }

    /// Whether any item failed
    pub fn has_failures(&self) -> bool {
        self.count(ItemOutcome::Failed) > 0
    }

    /// Completion requests issued across the batch
    pub fn completion_calls(&self) -> u32 {
        self.reports.iter().map(|r| r.completion_calls).sum()
    }

    /// Failed reports only
    pub fn failures(&self) -> impl Iterator<Item = &ItemReport> {
        self.reports.iter().filter(|r| r.outcome == ItemOutcome::Failed)
    }
}

/// Drives a list of items through the pipeline, one at a time
///
/// Items are handled strictly in input order and each finishes before the
/// next starts, so an interrupted batch leaves a prefix of complete
/// artifacts. The skip-if-exists check always happens before any request
/// for that item.
pub struct BatchDriver<'a> {
    inputs: &'a GenerationInputs,
    store: &'a ArtifactStore,
    force: bool,
}

impl<'a> BatchDriver<'a> {
    /// Create a driver
    pub fn new(inputs: &'a GenerationInputs, store: &'a ArtifactStore) -> Self {
        Self {
            inputs,
            store,
            force: false,
        }
    }

    /// Regenerate items even when their artifact exists
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    fn should_skip(&self, item: &Item) -> bool {
        !self.force && self.store.exists(item)
    }

    /// Generate every item, reporting each outcome to `observer`
    pub fn run<C>(&self, client: &C, items: &[Item], observer: &mut dyn BatchObserver) -> BatchSummary
    where
        C: CompletionClient,
        C::Error: Display,
    {
        let processor = ItemProcessor::new(client, self.inputs, self.store);
        let total = items.len();
        let mut summary = BatchSummary::default();

        info!("Processing {} item(s){}", total, if self.force { " (forced)" } else { "" });

        for (idx, item) in items.iter().enumerate() {
            let progress = Progress {
                position: idx + 1,
                total,
            };

            let report = if self.should_skip(item) {
                debug!(item = %item, "Artifact exists, skipping");
                ItemReport::skipped(item.clone())
            } else {
                processor.process(item)
            };

            observer.on_report(progress, &report);
            summary.reports.push(report);
        }

        info!(
            "Batch complete: {} created, {} corrected, {} skipped, {} failed ({} completion call(s))",
            summary.count(ItemOutcome::Created),
            summary.count(ItemOutcome::Corrected),
            summary.count(ItemOutcome::Skipped),
            summary.count(ItemOutcome::Failed),
            summary.completion_calls()
        );

        summary
    }

    /// Build the prompt for every item without any network or file writes
    ///
    /// Returns the number of prompts emitted.
    pub fn emit_prompts(&self, items: &[Item], observer: &mut dyn BatchObserver) -> Result<usize, GeneratorError> {
        for item in items {
            let prompt = self.inputs.prompt_for(item)?;
            observer.on_prompt(item, &prompt);
        }
        Ok(items.len())
    }

    /// Items that a `run` with the current settings would process
    pub fn affected(&self, items: &[Item], observer: &mut dyn BatchObserver) -> Vec<Item> {
        items
            .iter()
            .filter(|item| !self.should_skip(item))
            .inspect(|item| observer.on_affected(item))
            .cloned()
            .collect()
    }
}
