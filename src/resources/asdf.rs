//! asdf plugin and tool version resource.
use std::collections::HashSet;

use anyhow::Result;

use super::{Resource, ResourceChange, ResourceState};
use crate::exec::Executor;

/// Names of every installed asdf plugin, from one `asdf plugin list`.
///
/// # Errors
///
/// Returns an error if `asdf` cannot be spawned.
pub fn installed_plugins(executor: &dyn Executor) -> Result<HashSet<String>> {
    let result = executor.run_unchecked("asdf", &["plugin", "list"])?;
    if !result.success {
        return Ok(HashSet::new());
    }
    Ok(result
        .stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect())
}

/// An asdf plugin and, optionally, one installed version of it.
#[derive(Debug)]
pub struct AsdfToolResource<'a> {
    /// Plugin name.
    pub name: String,
    /// Version; empty means plugin only.
    pub version: String,
    plugin_installed: bool,
    executor: &'a dyn Executor,
}

impl<'a> AsdfToolResource<'a> {
    /// Create a tool resource; `plugin_installed` comes from
    /// [`installed_plugins`].
    #[must_use]
    pub const fn new(
        name: String,
        version: String,
        plugin_installed: bool,
        executor: &'a dyn Executor,
    ) -> Self {
        Self {
            name,
            version,
            plugin_installed,
            executor,
        }
    }

    fn version_installed(&self) -> Result<bool> {
        let result = self.executor.run_unchecked("asdf", &["list", &self.name])?;
        Ok(result.success
            && result
                .stdout
                .lines()
                .map(|l| l.trim().trim_start_matches('*').trim())
                .any(|v| v == self.version))
    }
}

impl Resource for AsdfToolResource<'_> {
    fn description(&self) -> String {
        if self.version.is_empty() {
            format!("{} (plugin)", self.name)
        } else {
            format!("{} {}", self.name, self.version)
        }
    }

    fn current_state(&self) -> Result<ResourceState> {
        if !self.plugin_installed {
            return Ok(ResourceState::Missing);
        }
        if self.version.is_empty() || self.version_installed()? {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Missing)
        }
    }

    fn apply(&self) -> Result<ResourceChange> {
        if !self.plugin_installed {
            self.executor.run("asdf", &["plugin", "add", &self.name])?;
        }
        if !self.version.is_empty() {
            self.executor
                .run_attached("asdf", &["install", &self.name, &self.version], &[])?;
        }
        Ok(ResourceChange::Applied)
    }
}
