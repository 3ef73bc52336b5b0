//! Idempotent resource primitives (check + apply pattern).
pub mod asdf;
pub mod fs;
pub mod git_config;
pub mod homebrew;
pub mod macos_default;
pub mod package;
pub mod repo_clone;
pub mod shell;
pub mod symlink;

use anyhow::Result;

/// State of a resource on the machine.
///
/// # Examples
///
/// ```
/// use dotfiles_bootstrap::resources::ResourceState;
///
/// let wrong = ResourceState::Incorrect { current: "/other/path".into() };
/// assert_ne!(wrong, ResourceState::Correct);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Resource is not present.
    Missing,
    /// Resource exists and matches the desired state.
    Correct,
    /// Resource exists but does not match the desired state.
    Incorrect {
        /// Description of what is there now.
        current: String,
    },
    /// Resource cannot be applied (source missing, conflict left alone, ...).
    Invalid {
        /// Why it cannot be applied.
        reason: String,
    },
}

/// Result of applying or removing a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// Resource was created, updated or removed.
    Applied,
    /// Nothing to do.
    AlreadyCorrect,
    /// Deliberately left alone.
    Skipped {
        /// Why it was left alone.
        reason: String,
    },
}

/// A single thing on the machine that can be checked and brought into the
/// desired state.
///
/// Callers inspect [`current_state`](Self::current_state) first and only
/// [`apply`](Self::apply) when it is missing or incorrect.
pub trait Resource {
    /// Human-readable description.
    fn description(&self) -> String;

    /// Inspect the machine.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined.
    fn current_state(&self) -> Result<ResourceState>;

    /// Bring the resource into the desired state.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O or command failure.
    fn apply(&self) -> Result<ResourceChange>;

    /// Undo a previous [`apply`](Self::apply).
    ///
    /// # Errors
    ///
    /// Fails by default; resources that support removal override this.
    fn remove(&self) -> Result<ResourceChange> {
        anyhow::bail!(
            "operation 'remove' is not supported for resource '{}'",
            self.description()
        )
    }
}


#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    struct FixedResource {
        state: ResourceState,
    }

    impl Resource for FixedResource {
        fn description(&self) -> String {
            "fixed resource".to_string()
        }

        fn current_state(&self) -> Result<ResourceState> {
            Ok(self.state.clone())
        }

        fn apply(&self) -> Result<ResourceChange> {
            Ok(ResourceChange::Applied)
        }
    }

    fn fixed(state: ResourceState) -> FixedResource {
        FixedResource { state }
    }

    #[test]
    fn default_remove_is_unsupported() {
        let err = fixed(ResourceState::Correct).remove().unwrap_err();
        assert!(err.to_string().contains("not supported"));
        assert!(err.to_string().contains("fixed resource"));
    }
}
