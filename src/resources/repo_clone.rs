//! A git repository cloned to a fixed location.
use anyhow::Result;
use std::path::PathBuf;

use super::{Resource, ResourceChange, ResourceState, fs};
use crate::exec::Executor;

/// `git clone --depth 1 <url> <dest>` when `dest` is absent.
#[derive(Debug)]
pub struct RepoCloneResource<'a> {
    /// Repository URL.
    pub url: String,
    /// Checkout location.
    pub dest: PathBuf,
    executor: &'a dyn Executor,
}

impl<'a> RepoCloneResource<'a> {
    /// Create a clone resource.
    #[must_use]
    pub const fn new(url: String, dest: PathBuf, executor: &'a dyn Executor) -> Self {
        Self {
            url,
            dest,
            executor,
        }
    }
}

impl Resource for RepoCloneResource<'_> {
    fn description(&self) -> String {
        format!("{} -> {}", self.url, self.dest.display())
    }

    fn current_state(&self) -> Result<ResourceState> {
        if self.dest.join(".git").exists() {
            return Ok(ResourceState::Correct);
        }
        if fs::is_occupied(&self.dest) {
            return Ok(ResourceState::Invalid {
                reason: format!("{} exists and is not a git checkout", self.dest.display()),
            });
        }
        Ok(ResourceState::Missing)
    }

    fn apply(&self) -> Result<ResourceChange> {
        fs::ensure_parent_dir(&self.dest)?;
        let dest = self.dest.to_string_lossy();
        self.executor
            .run("git", &["clone", "--depth", "1", &self.url, &dest])?;
        Ok(ResourceChange::Applied)
    }
}
