//! macOS `defaults` resource.
use anyhow::Result;

use super::{Resource, ResourceChange, ResourceState};
use crate::config::macos::MacosDefault;
use crate::exec::Executor;

/// One preference written with `defaults write`.
#[derive(Debug)]
pub struct MacosDefaultResource<'a> {
    entry: MacosDefault,
    executor: &'a dyn Executor,
}

impl<'a> MacosDefaultResource<'a> {
    /// Create a macOS defaults resource.
    #[must_use]
    pub const fn new(entry: MacosDefault, executor: &'a dyn Executor) -> Self {
        Self { entry, executor }
    }
}

impl Resource for MacosDefaultResource<'_> {
    fn description(&self) -> String {
        format!(
            "{} {} = {}",
            self.entry.domain, self.entry.key, self.entry.value
        )
    }

    fn current_state(&self) -> Result<ResourceState> {
        let result = self
            .executor
            .run_unchecked("defaults", &["read", &self.entry.domain, &self.entry.key])?;
        if !result.success {
            return Ok(ResourceState::Missing);
        }
        let current = result.stdout.trim().to_string();
        if current == self.entry.expected_readback() {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Incorrect { current })
        }
    }

    fn apply(&self) -> Result<ResourceChange> {
        self.executor.run(
            "defaults",
            &[
                "write",
                &self.entry.domain,
                &self.entry.key,
                self.entry.kind.flag(),
                &self.entry.value,
            ],
        )?;
        Ok(ResourceChange::Applied)
    }
}
