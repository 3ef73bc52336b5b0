//! Step: install the tmux plugin manager.
use anyhow::Result;

use super::{Context, Task, TaskResult, process_resources, task_deps};
use crate::resources::repo_clone::RepoCloneResource;

/// Clone the plugin manager into `~/.tmux/plugins/tpm`.
#[derive(Debug)]
pub struct InstallTmuxPluginManager;

impl Task for InstallTmuxPluginManager {
    fn name(&self) -> &'static str {
        "Install tmux plugin manager"
    }

    task_deps![super::packages::InstallBrewPackages];

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        for tool in ["tmux", "git"] {
            if !ctx.executor.which(tool) {
                return Ok(TaskResult::Skipped(format!("{tool} not found")));
            }
        }
        let resource = RepoCloneResource::new(
            ctx.config.tmux.plugin_manager.clone(),
            ctx.home.join(".tmux").join("plugins").join("tpm"),
            &*ctx.executor,
        );
        process_resources(ctx, [resource], "clone")
    }
}
