//! Default login shell resource.
use anyhow::{Context as _, Result};

use super::{Resource, ResourceChange, ResourceState};
use crate::exec::Executor;

/// The login shell, changed with `chsh -s`.
#[derive(Debug)]
pub struct DefaultShellResource<'a> {
    target_shell: String,
    /// Value of `$SHELL` when the run started.
    current_shell: Option<String>,
    executor: &'a dyn Executor,
}

impl<'a> DefaultShellResource<'a> {
    /// Create a default shell resource.
    #[must_use]
    pub const fn new(
        target_shell: String,
        current_shell: Option<String>,
        executor: &'a dyn Executor,
    ) -> Self {
        Self {
            target_shell,
            current_shell,
            executor,
        }
    }
}

impl Resource for DefaultShellResource<'_> {
    fn description(&self) -> String {
        format!("default shell → {}", self.target_shell)
    }

    fn current_state(&self) -> Result<ResourceState> {
        let suffix = format!("/{}", self.target_shell);
        match self.current_shell.as_deref() {
            None | Some("") => Ok(ResourceState::Missing),
            Some(current) if current.ends_with(&suffix) || current == self.target_shell => {
                Ok(ResourceState::Correct)
            }
            Some(current) => Ok(ResourceState::Incorrect {
                current: current.to_string(),
            }),
        }
    }

    fn apply(&self) -> Result<ResourceChange> {
        let result = self
            .executor
            .run("which", &[&self.target_shell])
            .with_context(|| format!("locating {}", self.target_shell))?;
        let shell_path = result.stdout.trim();
        self.executor.run("chsh", &["-s", shell_path])?;
        Ok(ResourceChange::Applied)
    }
}
