//! Homebrew formula and cask resources.
use std::collections::HashSet;

use anyhow::Result;

use super::{Resource, ResourceChange, ResourceState};
use crate::exec::Executor;

/// Kind of Homebrew package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrewKind {
    /// Command-line formula.
    Formula,
    /// GUI application cask.
    Cask,
}

impl BrewKind {
    const fn list_flag(self) -> &'static str {
        match self {
            Self::Formula => "--formula",
            Self::Cask => "--cask",
        }
    }
}

impl std::fmt::Display for BrewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Formula => write!(f, "formula"),
            Self::Cask => write!(f, "cask"),
        }
    }
}

/// Short name of a possibly tap-qualified package (`owner/tap/name`).
fn short_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// A Homebrew package that can be checked and installed.
#[derive(Debug)]
pub struct BrewPackageResource<'a> {
    /// Package name as configured.
    pub name: String,
    /// Formula or cask.
    pub kind: BrewKind,
    brew: String,
    executor: &'a dyn Executor,
}

impl<'a> BrewPackageResource<'a> {
    /// Create a package resource installed via the `brew` program at `brew`.
    #[must_use]
    pub const fn new(
        name: String,
        kind: BrewKind,
        brew: String,
        executor: &'a dyn Executor,
    ) -> Self {
        Self {
            name,
            kind,
            brew,
            executor,
        }
    }

    /// Determine the state from a pre-fetched set of installed names.
    #[must_use]
    pub fn state_from_installed(&self, installed: &HashSet<String>) -> ResourceState {
        if installed.contains(short_name(&self.name)) {
            ResourceState::Correct
        } else {
            ResourceState::Missing
        }
    }
}

/// Query every installed package of `kind` with a single `brew list`.
///
/// # Errors
///
/// Returns an error if `brew` cannot be spawned.
pub fn installed_packages(
    brew: &str,
    kind: BrewKind,
    executor: &dyn Executor,
) -> Result<HashSet<String>> {
    let result = executor.run_unchecked(brew, &["list", kind.list_flag(), "-1"])?;
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

impl Resource for BrewPackageResource<'_> {
    fn description(&self) -> String {
        format!("{} ({})", self.name, self.kind)
    }

    fn current_state(&self) -> Result<ResourceState> {
        let installed = installed_packages(&self.brew, self.kind, self.executor)?;
        Ok(self.state_from_installed(&installed))
    }

    fn apply(&self) -> Result<ResourceChange> {
        match self.kind {
            BrewKind::Formula => self.executor.run_attached(&self.brew, &["install", &self.name], &[])?,
            BrewKind::Cask => self
                .executor
                .run_attached(&self.brew, &["install", "--cask", &self.name], &[])?,
        }
        Ok(ResourceChange::Applied)
    }
}
