//! Outcome module - terminal results of processing one item

use crate::Item;
use std::fmt;
use std::path::PathBuf;

/// Terminal state of one item in a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemOutcome {
    /// Artifact already present and re-generation was not forced
    Skipped,

    /// First completion validated and was written
    Created,

    /// First completion failed validation; the correction validated and was written
    Corrected,

    /// A call failed, both attempts were invalid, or the artifact could not be written
    Failed,
}

impl ItemOutcome {
    /// Get the outcome name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemOutcome::Skipped => "skipped",
            ItemOutcome::Created => "created",
            ItemOutcome::Corrected => "corrected",
            ItemOutcome::Failed => "failed",
        }
    }

    /// Whether an artifact was written for this outcome
    pub fn wrote_artifact(&self) -> bool {
        matches!(self, ItemOutcome::Created | ItemOutcome::Corrected)
    }
}

impl fmt::Display for ItemOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything worth reporting about one processed item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReport {
    /// The item this report is about
    pub item: Item,

    /// Terminal outcome
    pub outcome: ItemOutcome,

    /// Number of completion requests issued for this item (0..=2)
    pub completion_calls: u32,

    /// Final error description for failed items
    pub error: Option<String>,

    /// Path of the written artifact for created/corrected items
    pub artifact: Option<PathBuf>,
}

impl ItemReport {
    /// Report for an item whose artifact already exists
    pub fn skipped(item: Item) -> Self {
        Self {
            item,
            outcome: ItemOutcome::Skipped,
            completion_calls: 0,
            error: None,
            artifact: None,
        }
    }

    /// Report for an item whose artifact was written
    pub fn accepted(item: Item, outcome: ItemOutcome, completion_calls: u32, artifact: PathBuf) -> Self {
        Self {
            item,
            outcome,
            completion_calls,
            error: None,
            artifact: Some(artifact),
        }
    }

    /// Report for an item that failed
    pub fn failed(item: Item, completion_calls: u32, error: impl Into<String>) -> Self {
        Self {
            item,
            outcome: ItemOutcome::Failed,
            completion_calls,
            error: Some(error.into()),
            artifact: None,
        }
    }
}
