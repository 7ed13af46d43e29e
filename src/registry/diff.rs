//! Project-level summary of what a registry overwrite would change

use super::Registry;

/// Differences between a local registry and a replacement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryDiff {
    /// Projects only in the replacement
    pub added: Vec<String>,
    /// Projects only in the local registry; lost if the overwrite goes ahead
    pub removed: Vec<String>,
    /// Projects in both with a different record
    pub changed: Vec<String>,
}

impl RegistryDiff {
    /// Compare `local` against `remote`, names in sorted order
    pub fn between(local: &Registry, remote: &Registry) -> Self {
        let mut diff = Self::default();

        for (name, record) in &remote.projects {
            match local.projects.get(name) {
                None => diff.added.push(name.clone()),
                Some(existing) if existing != record => diff.changed.push(name.clone()),
                Some(_) => {}
            }
        }

        diff.removed = local
            .projects
            .keys()
            .filter(|name| !remote.projects.contains_key(*name))
            .cloned()
            .collect();

        diff
    }

    /// True when no project differs
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}
