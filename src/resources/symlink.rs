//! Symlink resource with conflict handling.
use anyhow::{Context as _, Result};
use std::io::IsTerminal as _;
use std::path::{Path, PathBuf};

use super::{Resource, ResourceChange, ResourceState, fs};
use crate::config::symlinks::ConflictPolicy;

/// A link at `target` pointing to `source`.
#[derive(Debug, Clone)]
pub struct SymlinkResource {
    /// What the link points to.
    pub source: PathBuf,
    /// Where the link lives.
    pub target: PathBuf,
    /// What to do when `target` is occupied by something else.
    pub policy: ConflictPolicy,
}

impl SymlinkResource {
    /// Create a symlink resource.
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf, policy: ConflictPolicy) -> Self {
        Self {
            source,
            target,
            policy,
        }
    }

    fn links_to_source(&self) -> bool {
        std::fs::read_link(&self.target).is_ok_and(|existing| existing == self.source)
    }

    fn describe_occupant(&self) -> String {
        match std::fs::read_link(&self.target) {
            Ok(existing) => format!("points to {}", existing.display()),
            Err(_) if self.target.is_dir() => "target is a directory".to_string(),
            Err(_) => "target is a regular file".to_string(),
        }
    }

    /// Resolve [`ConflictPolicy::Prompt`] into a concrete choice.
    ///
    /// Without a terminal there is nobody to ask, so the answer is skip.
    fn resolve_policy(&self, interactive: bool) -> Result<ConflictPolicy> {
        if self.policy != ConflictPolicy::Prompt {
            return Ok(self.policy);
        }
        if !interactive {
            return Ok(ConflictPolicy::Skip);
        }
        let options = vec![
            ConflictPolicy::Skip,
            ConflictPolicy::Overwrite,
            ConflictPolicy::Backup,
        ];
        let message = format!(
            "{} exists ({}). What should happen?",
            self.target.display(),
            self.describe_occupant()
        );
        match inquire::Select::new(&message, options)
            .without_filtering()
            .prompt_skippable()
        {
            Ok(choice) => Ok(choice.unwrap_or(ConflictPolicy::Skip)),
            Err(inquire::InquireError::NotTTY) => Ok(ConflictPolicy::Skip),
            Err(e) => Err(e).context("conflict prompt"),
        }
    }

    /// Link `target` to `source`, resolving conflicts per the policy.
    /// `interactive` says whether a prompt can be shown.
    fn apply_with(&self, interactive: bool) -> Result<ResourceChange> {
        if self.links_to_source() {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        fs::ensure_parent_dir(&self.target)?;

        if fs::is_occupied(&self.target) {
            let is_link = self.target.symlink_metadata().is_ok_and(|m| m.is_symlink());
            match self.resolve_policy(interactive)? {
                ConflictPolicy::Skip => {
                    return Ok(ResourceChange::Skipped {
                        reason: format!("{} left in place", self.target.display()),
                    });
                }
                ConflictPolicy::Backup if !is_link => {
                    fs::move_to_backup(&self.target)?;
                }
                _ => fs::remove_any(&self.target)?,
            }
        }

        create_symlink(&self.source, &self.target)?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for SymlinkResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.target.display(), self.source.display())
    }

    fn current_state(&self) -> Result<ResourceState> {
        if !self.source.exists() {
            return Ok(ResourceState::Invalid {
                reason: format!("source does not exist: {}", self.source.display()),
            });
        }
        if self.links_to_source() {
            return Ok(ResourceState::Correct);
        }
        if !fs::is_occupied(&self.target) {
            return Ok(ResourceState::Missing);
        }
        if self.policy == ConflictPolicy::Skip {
            return Ok(ResourceState::Invalid {
                reason: format!("{} (on_conflict = skip)", self.describe_occupant()),
            });
        }
        Ok(ResourceState::Incorrect {
            current: self.describe_occupant(),
        })
    }

    fn apply(&self) -> Result<ResourceChange> {
        self.apply_with(std::io::stdin().is_terminal())
    }

    /// Remove the link, but only if it still points to the source.
    fn remove(&self) -> Result<ResourceChange> {
        if !fs::is_occupied(&self.target) {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        if !self.links_to_source() {
            return Ok(ResourceChange::Skipped {
                reason: format!("{}: {}", self.target.display(), self.describe_occupant()),
            });
        }
        std::fs::remove_file(&self.target)
            .with_context(|| format!("remove link: {}", self.target.display()))?;
        Ok(ResourceChange::Applied)
    }
}

/// Create a symlink at `link` pointing to `target`.
#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    std::os::unix::fs::symlink(target, link).with_context(|| {
        format!(
            "creating symlink {} -> {}",
            link.display(),
            target.display()
        )
    })
}

#[cfg(not(unix))]
fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    Err(crate::error::ResourceError::Symlink(format!(
        "symlinks are not supported on this platform: {} -> {}",
        link.display(),
        target.display()
    ))
    .into())
}
