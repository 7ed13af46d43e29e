//! Project registry (config.json)
//!
//! Maps project names to the repository, version tag and destination
//! directory needed to install them:
//!
//! ```json
//! { "projects": { "foo": { "Repo": "foo-repo", "Version": "v1.0", "Origin": "./out/foo" } } }
//! ```

pub mod diff;
pub mod store;
pub mod sync;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, project_not_found};

pub use diff::RegistryDiff;
pub use store::{JsonFileStore, RegistryStore};
pub use sync::SyncEngine;

/// One installable project
///
/// Fields are not validated; a record with missing keys loads with empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Remote repository name
    #[serde(rename = "Repo", default)]
    pub repo: String,

    /// Tag identifying the archive to fetch
    #[serde(rename = "Version", default)]
    pub version: String,

    /// Directory the archive is extracted into
    #[serde(rename = "Origin", default)]
    pub origin: String,
}

impl ProjectRecord {
    pub fn new(
        repo: impl Into<String>,
        version: impl Into<String>,
        origin: impl Into<String>,
    ) -> Self {
        Self {
            repo: repo.into(),
            version: version.into(),
            origin: origin.into(),
        }
    }
}

/// Project name to record mapping
///
/// Unknown top-level keys are ignored and a missing `projects` key reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub projects: BTreeMap<String, ProjectRecord>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a registry from a JSON document
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize as pretty JSON with a trailing newline
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Look up a project by name
    pub fn lookup(&self, name: &str) -> Result<&ProjectRecord> {
        self.projects
            .get(name)
            .ok_or_else(|| project_not_found(name))
    }

    /// Add or replace a project
    #[cfg(test)]
    pub fn insert(&mut self, name: impl Into<String>, record: ProjectRecord) {
        self.projects.insert(name.into(), record);
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
