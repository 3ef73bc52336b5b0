//! Homebrew itself.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use super::{Resource, ResourceChange, ResourceState};
use crate::exec::Executor;

/// Official install script.
pub const INSTALL_SCRIPT_URL: &str =
    "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh";

/// Where the installer puts `brew` (Apple silicon, Intel, Linux).
const KNOWN_LOCATIONS: &[&str] = &[
    "/opt/homebrew/bin/brew",
    "/usr/local/bin/brew",
    "/home/linuxbrew/.linuxbrew/bin/brew",
];

/// Find the `brew` executable: `PATH` first, then the standard prefixes.
///
/// A fresh install is not on `PATH` until the shell profile is reloaded, so
/// later steps in the same run rely on the fallback.
#[must_use]
pub fn locate_brew(executor: &dyn Executor) -> Option<PathBuf> {
    locate_brew_in(executor, KNOWN_LOCATIONS)
}

fn locate_brew_in(executor: &dyn Executor, locations: &[&str]) -> Option<PathBuf> {
    if executor.which("brew") {
        return Some(PathBuf::from("brew"));
    }
    locations.iter().map(Path::new).find(|p| p.exists()).map(Path::to_path_buf)
}

/// Homebrew, installed by the official script when absent.
///
/// The script runs attached to the terminal because it asks for `sudo`.
/// With `noninteractive` set it runs with `NONINTERACTIVE=1` and needs
/// passwordless `sudo`.
#[derive(Debug)]
pub struct HomebrewResource<'a> {
    executor: &'a dyn Executor,
    noninteractive: bool,
}

impl<'a> HomebrewResource<'a> {
    /// Create a Homebrew resource.
    #[must_use]
    pub const fn new(executor: &'a dyn Executor, noninteractive: bool) -> Self {
        Self {
            executor,
            noninteractive,
        }
    }
}

impl Resource for HomebrewResource<'_> {
    fn description(&self) -> String {
        "Homebrew".to_string()
    }

    fn current_state(&self) -> Result<ResourceState> {
        Ok(locate_brew(self.executor).map_or(ResourceState::Missing, |_| ResourceState::Correct))
    }

    fn apply(&self) -> Result<ResourceChange> {
        let script = self
            .executor
            .run("curl", &["-fsSL", INSTALL_SCRIPT_URL])
            .context("downloading the Homebrew install script")?;
        let env: &[(&str, &str)] = if self.noninteractive {
            &[("NONINTERACTIVE", "1")]
        } else {
            &[]
        };
        self.executor
            .run_attached("/bin/bash", &["-c", &script.stdout], env)
            .context("running the Homebrew install script")?;
        Ok(ResourceChange::Applied)
    }
}
