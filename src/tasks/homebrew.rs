//! Step: install Homebrew.
use anyhow::Result;

use super::{Context, Task, TaskResult, process_resources};
use crate::resources::homebrew::{HomebrewResource, locate_brew};

/// Run the official installer when `brew` is absent.
#[derive(Debug)]
pub struct InstallHomebrew;

impl Task for InstallHomebrew {
    fn name(&self) -> &'static str {
        "Install Homebrew"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.platform.supports_homebrew()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        if locate_brew(&*ctx.executor).is_none() && !ctx.executor.which("curl") {
            return Ok(TaskResult::Skipped("curl not found".to_string()));
        }
        process_resources(ctx, [HomebrewResource::new(&*ctx.executor, ctx.ci)], "install")
    }
}
