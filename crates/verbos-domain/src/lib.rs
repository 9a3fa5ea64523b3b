//! Verbos Domain Layer
//!
//! Core vocabulary for the conjugation generator. Like every domain crate in
//! this workspace it carries no external dependencies; infrastructure (HTTP
//! clients, YAML parsing, the file system) lives in the other crates.
//!
//! ## Key Concepts
//!
//! - **Item**: the unit of work, a verb infinitive that also names a file
//! - **ValidationVerdict**: whether a candidate document satisfies the schema
//! - **ItemOutcome**: the terminal state of one item in a batch
//! - **CompletionClient**: the boundary to a generative-model service

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod item;
pub mod outcome;
pub mod traits;
pub mod verdict;

// Re-exports for convenience
pub use item::{Item, ItemError};
pub use outcome::{ItemOutcome, ItemReport};
pub use traits::CompletionClient;
pub use verdict::ValidationVerdict;
