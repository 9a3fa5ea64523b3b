//! Run-wide inputs: the schema and the worked example

use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::prompt::PromptBuilder;
use crate::schema::SchemaDefinition;
use crate::store::ArtifactStore;
use crate::validator::DocumentValidator;
use std::fs;
use tracing::info;
use verbos_domain::Item;

/// Read-only inputs shared by every item of a run
#[derive(Debug, Clone)]
pub struct GenerationInputs {
    schema: SchemaDefinition,
    example: String,
}

impl GenerationInputs {
    /// Load and check the schema and the worked example
    ///
    /// The example is the sentinel item's artifact and must already exist and
    /// satisfy the schema; no default content is ever substituted.
    ///
    /// # Errors
    /// Any failure here is a fatal precondition for the run.
    pub fn load(config: &GeneratorConfig, store: &ArtifactStore) -> Result<Self, GeneratorError> {
        let schema = SchemaDefinition::load(&config.schema_path)?;

        let sentinel = config.sentinel()?;
        let example_path = store.path_for(&sentinel);
        if !example_path.is_file() {
            return Err(GeneratorError::MissingExample(example_path));
        }
        let example = fs::read_to_string(&example_path)?;

        let verdict = DocumentValidator::new(&schema).validate_text(&example);
        if let Some(error) = verdict.error() {
            return Err(GeneratorError::InvalidExample {
                path: example_path,
                error: error.to_string(),
            });
        }

        info!(
            "Loaded schema {} and example {}",
            config.schema_path.display(),
            example_path.display()
        );

        Self::new(schema, example)
    }

    /// Assemble inputs that are already in memory
    pub fn new(schema: SchemaDefinition, example: impl Into<String>) -> Result<Self, GeneratorError> {
        let example = example.into();
        if example.trim().is_empty() {
            return Err(GeneratorError::EmptyInput("worked example"));
        }
        Ok(Self { schema, example })
    }

    /// The schema
    pub fn schema(&self) -> &SchemaDefinition {
        &self.schema
    }

    /// The worked example text
    pub fn example(&self) -> &str {
        &self.example
    }

    /// A validator bound to this run's schema
    pub fn validator(&self) -> DocumentValidator<'_> {
        DocumentValidator::new(&self.schema)
    }

    /// Build the generation prompt for an item
    pub fn prompt_for(&self, item: &Item) -> Result<String, GeneratorError> {
        PromptBuilder::new(item, &self.example, self.schema.text())
            .with_required_fields(self.schema.required_fields())
            .build()
    }
}
