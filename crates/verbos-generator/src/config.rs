//! Configuration for the generator

use crate::error::GeneratorError;
use crate::store::ArtifactStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use verbos_domain::Item;

/// Where inputs are read from and artifacts are written to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Directory holding one artifact per item
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Path of the schema document
    #[serde(default = "default_schema_path")]
    pub schema_path: PathBuf,

    /// Item whose artifact serves as the worked example
    #[serde(default = "default_sentinel_item")]
    pub sentinel_item: String,

    /// Artifact file extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl GeneratorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.output_dir.as_os_str().is_empty() {
            return Err("output_dir cannot be empty".to_string());
        }
        if self.schema_path.as_os_str().is_empty() {
            return Err("schema_path cannot be empty".to_string());
        }
        Item::new(&self.sentinel_item).map_err(|e| format!("sentinel_item: {}", e))?;
        if self.extension.is_empty() || self.extension.contains(['.', '/', '\\']) {
            return Err(format!("extension '{}' must be a bare suffix such as 'yml'", self.extension));
        }
        Ok(())
    }

    /// The sentinel item as a validated identifier
    pub fn sentinel(&self) -> Result<Item, GeneratorError> {
        Ok(Item::new(&self.sentinel_item)?)
    }

    /// Artifact store rooted at the output directory
    pub fn artifact_store(&self) -> ArtifactStore {
        ArtifactStore::new(self.output_dir.clone(), self.extension.clone())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            schema_path: default_schema_path(),
            sentinel_item: default_sentinel_item(),
            extension: default_extension(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("verbs")
}

fn default_schema_path() -> PathBuf {
    PathBuf::from("verb-schema.yml")
}

fn default_sentinel_item() -> String {
    "hablar".to_string()
}

fn default_extension() -> String {
    "yml".to_string()
}
