//! Step: apply macOS `defaults` preferences.
use anyhow::Result;

use super::{Context, Task, TaskResult, process_resources};
use crate::resources::macos_default::MacosDefaultResource;

/// Write each configured preference whose value differs.
#[derive(Debug)]
pub struct ApplyMacosDefaults;

impl Task for ApplyMacosDefaults {
    fn name(&self) -> &'static str {
        "Apply macOS defaults"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.platform.is_macos()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let defaults = &ctx.config.macos.defaults;
        if defaults.is_empty() {
            return Ok(TaskResult::Skipped("no defaults configured".to_string()));
        }
        if !ctx.executor.which("defaults") {
            return Ok(TaskResult::Skipped("defaults not found".to_string()));
        }

        let resources = defaults
            .iter()
            .map(|entry| MacosDefaultResource::new(entry.clone(), &*ctx.executor));
        process_resources(ctx, resources, "write")
    }
}
