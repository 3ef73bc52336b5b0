//! Subcommand orchestration: shared setup, then a fail-fast step run.
pub mod install;
pub mod uninstall;
pub mod version;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::{CONFIG_FILE, Config};
use crate::error::TaskError;
use crate::exec::SystemExecutor;
use crate::logging::{Log, Logger, TaskStatus};
use crate::platform::Platform;
use crate::tasks::{self, Context, Task, graph};

/// Resolve the dotfiles repository root.
///
/// Order: `--root`, `DOTFILES_ROOT`, a repository containing the running
/// binary, then the current directory.
///
/// # Errors
///
/// Returns an error if the chosen directory does not exist.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    let explicit = global.root.clone().or_else(|| {
        std::env::var_os("DOTFILES_ROOT")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    });

    let root = match explicit {
        Some(root) => root,
        None => binary_repo_root().map_or_else(std::env::current_dir, Ok)?,
    };

    dunce::canonicalize(&root)
        .with_context(|| format!("dotfiles root {} is not accessible", root.display()))
}

/// Find a directory holding `dotfiles.toml` above the running binary
/// (`target/release/` or `bin/` inside the repository).
fn binary_repo_root() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let parent = exe.parent()?;
    find_repo_root(parent)
}

fn find_repo_root(bin_dir: &Path) -> Option<PathBuf> {
    [bin_dir.join("../.."), bin_dir.join("..")]
        .into_iter()
        .find(|candidate| candidate.join(CONFIG_FILE).is_file())
}

/// Shared state for running a list of steps.
#[derive(Debug)]
pub struct CommandRunner {
    ctx: Context,
    log: Arc<Logger>,
}

impl CommandRunner {
    /// Resolve the root, load and validate configuration, and build the
    /// step [`Context`].
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be resolved, `dotfiles.toml` is
    /// invalid, or `HOME` is not set.
    pub fn new(global: &GlobalOpts, log: &Arc<Logger>) -> Result<Self> {
        let root = resolve_root(global)?;
        log.debug(&format!("root: {}", root.display()));

        log.stage("Loading configuration");
        let mut config = Config::load(&root)?;
        if let Some(policy) = global.on_conflict {
            config.symlinks.on_conflict = policy;
        }
        log.info(&format!(
            "{} formulae, {} casks, {} asdf tools, on conflict: {}",
            config.brew.formulae.len(),
            config.brew.casks.len(),
            config.asdf.tools.len(),
            config.symlinks.on_conflict
        ));

        let warnings = config.validate();
        if !warnings.is_empty() {
            log.warn(&format!("found {} configuration warning(s):", warnings.len()));
            for warning in &warnings {
                log.warn(&format!(
                    "  {} [{}]: {}",
                    warning.source, warning.item, warning.message
                ));
            }
        }

        let platform = Platform::detect();
        log.debug(&format!("platform: {}", platform.os));

        let ctx = Context::new(
            Arc::new(config),
            platform,
            Arc::clone(log) as Arc<dyn Log>,
            global.dry_run,
            Arc::new(SystemExecutor),
        )?;
        Ok(Self {
            ctx,
            log: Arc::clone(log),
        })
    }

    /// Run `selected` (a subset of `registered`, in order) and print the
    /// summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the step order is invalid or a step fails.
    pub fn run(&self, registered: &[Box<dyn Task>], selected: &[&dyn Task]) -> Result<()> {
        let all: Vec<&dyn Task> = registered.iter().map(Box::as_ref).collect();
        graph::validate_order(&all)?;
        run_tasks(selected, &self.ctx, &self.log)
    }
}

/// Execute `selected` in order, stopping at the first failure.
///
/// Steps after a failure are recorded as skipped so the summary still lists
/// them.
///
/// # Errors
///
/// Returns [`TaskError::ExecutionFailed`] naming the first failed step.
pub fn run_tasks(selected: &[&dyn Task], ctx: &Context, log: &Logger) -> Result<()> {
    let mut failure = None;
    for task in selected {
        match &failure {
            Some((failed, _)) => log.record_task(
                task.name(),
                TaskStatus::Skipped,
                Some(&format!("not run: '{failed}' failed")),
            ),
            None => {
                if let Err(e) = tasks::execute(*task, ctx) {
                    failure = Some((task.name().to_string(), format!("{e:#}")));
                }
            }
        }
    }

    log.print_summary();

    match failure {
        Some((task, reason)) => Err(TaskError::ExecutionFailed { task, reason }.into()),
        None => Ok(()),
    }
}
