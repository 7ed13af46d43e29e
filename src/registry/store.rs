//! Registry persistence
//!
//! Loading never fails the caller: a missing or broken document is reported
//! and replaced by the empty registry, so every later lookup reports
//! "not found" instead of aborting the run.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::Registry;
use crate::error::{Result, config_load_failed, config_write_failed};
use crate::ui;

/// Key-value persistence for the local registry
pub trait RegistryStore {
    /// Location of the backing document
    fn path(&self) -> &Path;

    /// Load the registry, falling back to an empty one on any failure
    fn load(&self) -> Registry;

    /// Replace the stored registry
    fn save(&self, registry: &Registry) -> Result<()>;
}

/// Registry stored as a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the registry, propagating read and parse failures
    pub fn try_load(&self) -> Result<Registry> {
        let shown = self.path.display().to_string();
        let content = fs::read_to_string(&self.path)
            .map_err(|e| config_load_failed(&shown, e.to_string()))?;
        Registry::from_json(&content).map_err(|e| config_load_failed(&shown, e.to_string()))
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl RegistryStore for JsonFileStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Registry {
        match self.try_load() {
            Ok(registry) => {
                tracing::debug!(
                    path = %self.path.display(),
                    projects = registry.len(),
                    "loaded registry"
                );
                registry
            }
            Err(e) => {
                ui::error(&e);
                ui::warn("Using an empty registry");
                Registry::new()
            }
        }
    }

    /// Write through a sibling temporary file and rename it over the target,
    /// so a failed write leaves the previous document intact.
    fn save(&self, registry: &Registry) -> Result<()> {
        let shown = self.path.display().to_string();
        let json = registry
            .to_json()
            .map_err(|e| config_write_failed(&shown, e.to_string()))?;

        let parent = self.parent_dir();
        fs::create_dir_all(parent).map_err(|e| config_write_failed(&shown, e.to_string()))?;

        let mut temp = NamedTempFile::new_in(parent)
            .map_err(|e| config_write_failed(&shown, e.to_string()))?;
        temp.write_all(json.as_bytes())
            .map_err(|e| config_write_failed(&shown, e.to_string()))?;
        temp.persist(&self.path)
            .map_err(|e| config_write_failed(&shown, e.error.to_string()))?;

        tracing::debug!(path = %shown, projects = registry.len(), "saved registry");
        Ok(())
    }
}
