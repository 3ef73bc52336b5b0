//! Step: install asdf plugins and tool versions.
use anyhow::Result;

use super::{Context, Task, TaskResult, process_resources, task_deps};
use crate::resources::asdf::{AsdfToolResource, installed_plugins};

/// Add missing plugins and install missing versions.
#[derive(Debug)]
pub struct InstallAsdfTools;

impl Task for InstallAsdfTools {
    fn name(&self) -> &'static str {
        "Install asdf tools"
    }

    task_deps![super::packages::InstallBrewPackages];

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let tools = &ctx.config.asdf.tools;
        if tools.is_empty() {
            return Ok(TaskResult::Skipped("no tools configured".to_string()));
        }
        if !ctx.executor.which("asdf") {
            return Ok(TaskResult::Skipped("asdf not found".to_string()));
        }

        let plugins = installed_plugins(&*ctx.executor)?;
        let resources = tools.iter().map(|tool| {
            AsdfToolResource::new(
                tool.name.clone(),
                tool.version.clone(),
                plugins.contains(&tool.name),
                &*ctx.executor,
            )
        });
        process_resources(ctx, resources, "install")
    }
}
