// Shared helpers for integration tests.
//
// A `Fixture` owns two temporary directories: a dotfiles repository and a
// fake `$HOME`. Tests populate the repository with tagged source files and
// run steps against a context whose home is the fake one.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dotfiles_bootstrap::config::Config;
use dotfiles_bootstrap::config::symlinks::ConflictPolicy;
use dotfiles_bootstrap::exec::SystemExecutor;
use dotfiles_bootstrap::logging::{Log, Logger};
use dotfiles_bootstrap::platform::Platform;
use dotfiles_bootstrap::tasks::Context;

/// An isolated repository and home directory.
pub struct Fixture {
    /// Temporary dotfiles repository.
    pub repo: tempfile::TempDir,
    /// Temporary `$HOME`.
    pub home: tempfile::TempDir,
}

impl Fixture {
    /// Create an empty repository and home.
    pub fn new() -> Self {
        Self {
            repo: tempfile::tempdir().expect("create repo dir"),
            home: tempfile::tempdir().expect("create home dir"),
        }
    }

    /// Write a source file at `rel` (relative to the repository root).
    pub fn with_source(self, rel: &str, content: &str) -> Self {
        let path = self.repo.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create source parent");
        }
        std::fs::write(&path, content).expect("write source file");
        self
    }

    /// Write `dotfiles.toml` at the repository root.
    pub fn with_config(self, content: &str) -> Self {
        std::fs::write(self.repo.path().join("dotfiles.toml"), content)
            .expect("write dotfiles.toml");
        self
    }

    /// Path of `rel` under the fake home.
    pub fn home_path(&self, rel: &str) -> PathBuf {
        self.home.path().join(rel)
    }

    /// Path of `rel` under the repository.
    pub fn repo_path(&self, rel: &str) -> PathBuf {
        self.repo.path().join(rel)
    }

    /// Build a step context over this fixture with `policy`.
    pub fn context(&self, policy: ConflictPolicy, dry_run: bool) -> (Context, Arc<Logger>) {
        let mut config = Config::load(self.repo.path()).expect("load config");
        config.symlinks.on_conflict = policy;
        let log = Arc::new(Logger::new("test"));
        let ctx = Context {
            config: Arc::new(config),
            platform: Platform::detect(),
            log: Arc::clone(&log) as Arc<dyn Log>,
            dry_run,
            home: self.home.path().to_path_buf(),
            executor: Arc::new(SystemExecutor),
            current_shell: None,
            ci: true,
        };
        (ctx, log)
    }
}

/// Whether anything (including a dangling link) exists at `path`.
pub fn occupied(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}
