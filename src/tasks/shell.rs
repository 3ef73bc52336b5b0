//! Step: configure the default login shell.
use anyhow::Result;

use super::{Context, Task, TaskResult, process_resources, task_deps};
use crate::resources::shell::DefaultShellResource;

/// Switch the login shell with `chsh` when `$SHELL` differs.
#[derive(Debug)]
pub struct ConfigureShell;

impl Task for ConfigureShell {
    fn name(&self) -> &'static str {
        "Configure default shell"
    }

    task_deps![super::packages::InstallBrewPackages];

    fn should_run(&self, ctx: &Context) -> bool {
        !matches!(ctx.platform.os, crate::platform::Os::Other)
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        if ctx.ci {
            return Ok(TaskResult::Skipped("running in CI".to_string()));
        }
        let shell = &ctx.config.shell.default;
        if !ctx.executor.which(shell) {
            return Ok(TaskResult::Skipped(format!("{shell} not found")));
        }

        let resource =
            DefaultShellResource::new(shell.clone(), ctx.current_shell.clone(), &*ctx.executor);
        process_resources(ctx, [resource], "configure")
    }
}
