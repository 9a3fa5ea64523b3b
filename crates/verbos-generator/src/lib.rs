//! Verbos Generator
//!
//! Produces one schema-valid YAML conjugation record per verb by asking a
//! completion service, validating the reply, and allowing a single
//! self-correction round before giving up on the item.
//!
//! # Architecture
//!
//! ```text
//! Item → PromptBuilder → CompletionClient → DocumentValidator ─┬─ valid ──→ ArtifactStore
//!                                                             └─ invalid → CorrectionEngine → DocumentValidator
//! ```
//!
//! # Key Features
//!
//! - **Skip-if-exists**: Items with an artifact are not regenerated unless forced
//! - **Bounded correction**: At most two completion requests per item
//! - **Atomic writes**: Artifacts are never observed half-written
//! - **Failure isolation**: One item's failure never aborts the batch
//!
//! # Example Usage
//!
//! ```no_run
//! use verbos_generator::{BatchDriver, GenerationInputs, GeneratorConfig, SilentObserver};
//! use verbos_domain::Item;
//! use verbos_llm::MockProvider;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GeneratorConfig::default();
//! let store = config.artifact_store();
//! let inputs = GenerationInputs::load(&config, &store)?;
//!
//! let client = MockProvider::new("infinitivo: comer");
//! let items = vec![Item::new("comer")?, Item::new("vivir")?];
//!
//! let summary = BatchDriver::new(&inputs, &store).run(&client, &items, &mut SilentObserver);
//! println!("Failures: {}", summary.failures().count());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod batch;
mod config;
mod correction;
mod document;
mod error;
mod inputs;
mod processor;
mod prompt;
mod schema;
mod store;
mod validator;

#[cfg(test)]
mod tests;

pub use batch::{BatchDriver, BatchObserver, BatchSummary, Progress, SilentObserver};
pub use config::GeneratorConfig;
pub use correction::CorrectionEngine;
pub use document::CandidateDocument;
pub use error::GeneratorError;
pub use inputs::GenerationInputs;
pub use processor::ItemProcessor;
pub use prompt::{correction_prompt, PromptBuilder};
pub use schema::{SchemaDefinition, Violation, ViolationKind};
pub use store::ArtifactStore;
pub use validator::DocumentValidator;
