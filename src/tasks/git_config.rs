//! Step: configure global git settings.
use anyhow::Result;

use super::{Context, Task, TaskResult, process_resources};
use crate::resources::git_config::GitConfigResource;

/// Apply `[git] settings` with `git config --global`.
#[derive(Debug)]
pub struct ConfigureGit;

impl Task for ConfigureGit {
    fn name(&self) -> &'static str {
        "Configure git"
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let settings = &ctx.config.git.settings;
        if settings.is_empty() {
            return Ok(TaskResult::Skipped("no settings configured".to_string()));
        }
        if !ctx.executor.which("git") {
            return Ok(TaskResult::Skipped("git not found".to_string()));
        }

        let resources = settings.iter().map(|s| {
            GitConfigResource::new(s.key.clone(), s.value.clone(), &*ctx.executor)
        });
        process_resources(ctx, resources, "set")
    }
}
