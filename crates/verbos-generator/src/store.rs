//! Per-item artifact files

use crate::error::GeneratorError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use verbos_domain::Item;

/// Directory of artifacts, one file per item at `{dir}/{item}.{extension}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactStore {
    dir: PathBuf,
    extension: String,
}

impl ArtifactStore {
    /// Create a store rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    /// Root directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Deterministic artifact path for an item
    pub fn path_for(&self, item: &Item) -> PathBuf {
        self.dir.join(format!("{}.{}", item.as_str(), self.extension))
    }

    /// Whether an artifact already exists for the item
    pub fn exists(&self, item: &Item) -> bool {
        self.path_for(item).is_file()
    }

    /// Read an existing artifact
    pub fn read(&self, item: &Item) -> std::io::Result<String> {
        fs::read_to_string(self.path_for(item))
    }

    /// Write an artifact as a single unit
    ///
    /// The text goes to a temporary file in the same directory which is then
    /// renamed over the target, so readers never observe a partial file. A
    /// process killed mid-write can leave that hidden `.tmp*` file behind;
    /// it never carries the artifact extension, so [`exists`](Self::exists)
    /// ignores it. A trailing newline is added when missing.
    pub fn write(&self, item: &Item, text: &str) -> Result<PathBuf, GeneratorError> {
        let path = self.path_for(item);
        let persistence = |e: std::io::Error| {
            GeneratorError::Persistence(format!("cannot write {}: {}", path.display(), e))
        };

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(persistence)?;
        tmp.write_all(text.as_bytes()).map_err(persistence)?;
        if !text.ends_with('\n') {
            tmp.write_all(b"\n").map_err(persistence)?;
        }
        tmp.as_file().sync_all().map_err(persistence)?;
        tmp.persist(&path).map_err(|e| persistence(e.error))?;

        Ok(path)
    }
}
