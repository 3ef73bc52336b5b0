//! Shared execution context handed to every step.
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::exec::Executor;
use crate::logging::Log;
use crate::platform::Platform;

/// Everything a step may consult: configuration, platform, logger, and the
/// process environment captured once at startup.
pub struct Context {
    /// Loaded configuration.
    pub config: Arc<Config>,
    /// Detected platform.
    pub platform: Platform,
    /// Logger for output and step recording.
    pub log: Arc<dyn Log>,
    /// Preview changes without applying them.
    pub dry_run: bool,
    /// Destination root for links (`$HOME`).
    pub home: PathBuf,
    /// Command executor.
    pub executor: Arc<dyn Executor>,
    /// `$SHELL` at startup.
    pub current_shell: Option<String>,
    /// Whether running under CI (`CI` set to a truthy value).
    pub ci: bool,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("root", &self.config.root)
            .field("platform", &self.platform)
            .field("log", &"<dyn Log>")
            .field("dry_run", &self.dry_run)
            .field("home", &self.home)
            .field("executor", &"<dyn Executor>")
            .field("current_shell", &self.current_shell)
            .field("ci", &self.ci)
            .finish()
    }
}

/// Whether an environment flag value means "on".
#[must_use]
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != "0" && !value.eq_ignore_ascii_case("false")
}

impl Context {
    /// Create a context from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `HOME` is not set.
    pub fn new(
        config: Arc<Config>,
        platform: Platform,
        log: Arc<dyn Log>,
        dry_run: bool,
        executor: Arc<dyn Executor>,
    ) -> Result<Self> {
        let home = std::env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .ok_or_else(|| anyhow::anyhow!("HOME environment variable is not set"))?;

        Ok(Self {
            config,
            platform,
            log,
            dry_run,
            home: PathBuf::from(home),
            executor,
            current_shell: std::env::var("SHELL").ok(),
            ci: std::env::var("CI").is_ok_and(|v| is_truthy(&v)),
        })
    }

    /// Root directory of the dotfiles repository.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.config.root
    }
}
