//! Named, dependency-ordered setup steps built on resources.
pub mod asdf;
pub mod context;
pub mod git_config;
pub mod graph;
pub mod homebrew;
pub mod macos_defaults;
pub mod packages;
mod processing;
pub mod shell;
pub mod symlinks;
pub mod tmux;

/// Implement [`Task::dependencies`] from a list of step types.
///
/// The `const DEPS` intermediate gives the slice a `'static` lifetime.
///
/// ```ignore
/// task_deps![super::homebrew::InstallHomebrew]
/// ```
macro_rules! task_deps {
    [$($dep:ty),+ $(,)?] => {
        fn dependencies(&self) -> &[std::any::TypeId] {
            const DEPS: &[std::any::TypeId] = &[$(std::any::TypeId::of::<$dep>()),+];
            DEPS
        }
    };
}

pub(crate) use task_deps;

pub use context::Context;
pub use processing::{
    TaskResult, TaskStats, process_resource_states, process_resources, process_resources_remove,
};

use std::any::TypeId;

use anyhow::Result;

use crate::logging::TaskStatus;

/// A named setup step.
///
/// The `'static` bound gives each step a stable [`TypeId`], which
/// [`graph::validate_order`] uses to match dependency declarations.
pub trait Task: 'static {
    /// Human-readable step name; also what `--skip`/`--only` match against.
    fn name(&self) -> &str;

    /// Identifier used in dependency declarations.
    fn task_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Steps that must run before this one.
    fn dependencies(&self) -> &[TypeId] {
        &[]
    }

    /// Whether this step applies to the current platform.
    fn should_run(&self, ctx: &Context) -> bool;

    /// Execute the step.
    ///
    /// # Errors
    ///
    /// Returns an error if a command or file operation fails; the run is
    /// then aborted.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// Steps run by `install`, in execution order.
#[must_use]
pub fn all_install_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(macos_defaults::ApplyMacosDefaults),
        Box::new(homebrew::InstallHomebrew),
        Box::new(packages::InstallBrewPackages),
        Box::new(asdf::InstallAsdfTools),
        Box::new(git_config::ConfigureGit),
        Box::new(shell::ConfigureShell),
        Box::new(tmux::InstallTmuxPluginManager),
        Box::new(symlinks::InstallSymlinks),
    ]
}

/// Steps run by `uninstall`, in execution order.
#[must_use]
pub fn all_uninstall_tasks() -> Vec<Box<dyn Task>> {
    vec![Box::new(symlinks::UninstallSymlinks)]
}

/// Execute one step and record its outcome.
///
/// # Errors
///
/// Returns the step's error after recording it as failed.
pub fn execute(task: &dyn Task, ctx: &Context) -> Result<()> {
    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping task: {} (not applicable)", task.name()));
        ctx.log
            .record_task(task.name(), TaskStatus::NotApplicable, None);
        return Ok(());
    }

    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(TaskResult::Ok) => {
            ctx.log.record_task(task.name(), TaskStatus::Ok, None);
            Ok(())
        }
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
            Ok(())
        }
        Ok(TaskResult::DryRun) => {
            ctx.log.record_task(task.name(), TaskStatus::DryRun, None);
            Ok(())
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e:#}", task.name()));
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&format!("{e:#}")));
            Err(e)
        }
    }
}


#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use test_helpers::{empty_config, make_context};

    struct MockTask {
        should_run: bool,
        result: Result<TaskResult, String>,
    }

    impl Task for MockTask {
        fn name(&self) -> &'static str {
            "mock"
        }
        fn should_run(&self, _ctx: &Context) -> bool {
            self.should_run
        }
        fn run(&self, _ctx: &Context) -> Result<TaskResult> {
            self.result.clone().map_err(|s| anyhow::anyhow!("{s}"))
        }
    }

    fn run_mock(should_run: bool, result: Result<TaskResult, String>) -> (bool, TaskStatus) {
        let (ctx, log) = make_context(empty_config(PathBuf::from("/tmp")));
        let ok = execute(&MockTask { should_run, result }, &ctx).is_ok();
        (ok, log.task_entries()[0].status)
    }

    #[test]
    fn not_applicable_task_is_recorded() {
        assert_eq!(
            run_mock(false, Ok(TaskResult::Ok)),
            (true, TaskStatus::NotApplicable)
        );
    }

    #[test]
    fn each_result_maps_to_a_status() {
        assert_eq!(run_mock(true, Ok(TaskResult::Ok)), (true, TaskStatus::Ok));
        assert_eq!(
            run_mock(true, Ok(TaskResult::Skipped("x".to_string()))),
            (true, TaskStatus::Skipped)
        );
        assert_eq!(
            run_mock(true, Ok(TaskResult::DryRun)),
            (true, TaskStatus::DryRun)
        );
    }

    #[test]
    fn failure_is_recorded_and_returned() {
        assert_eq!(
            run_mock(true, Err("kaboom".to_string())),
            (false, TaskStatus::Failed)
        );
    }

    #[test]
    fn install_step_names() {
        let names: Vec<String> = all_install_tasks()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(names.first().map(String::as_str), Some("Apply macOS defaults"));
        assert_eq!(names.last().map(String::as_str), Some("Install symlinks"));
        assert_eq!(names.len(), 8);
    }
}
