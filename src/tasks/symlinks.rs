//! Steps: link tagged source files into `$HOME`, and remove those links.
use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;

use super::{Context, Task, TaskResult, process_resources, process_resources_remove, task_deps};
use crate::config::symlinks::discover;
use crate::resources::symlink::SymlinkResource;

/// Build one resource per discovered source file.
///
/// Rejected names are reported and left out. When two sources map to the
/// same destination, the first in walk order is kept and the others are
/// reported, so repeated runs settle on one link.
fn symlink_resources(ctx: &Context) -> Result<Vec<SymlinkResource>> {
    let settings = &ctx.config.symlinks;
    let found = discover(ctx.root(), settings)?;
    for rejected in &found.rejected {
        ctx.log.warn(&format!("ignoring {rejected}"));
    }
    ctx.log.debug(&format!("{} source files found", found.sources.len()));

    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
    let mut resources = Vec::with_capacity(found.sources.len());
    for src in found.sources {
        let target = src.destination(&ctx.home, settings);
        if let Some(first) = claimed.get(&target) {
            ctx.log.warn(&format!(
                "ignoring {}: {} already maps to {}",
                src.relative.display(),
                first.display(),
                target.display()
            ));
            continue;
        }
        claimed.insert(target.clone(), src.relative);
        resources.push(SymlinkResource::new(src.absolute, target, settings.on_conflict));
    }
    Ok(resources)
}

/// Link every source file to its destination.
#[derive(Debug)]
pub struct InstallSymlinks;

impl Task for InstallSymlinks {
    fn name(&self) -> &'static str {
        "Install symlinks"
    }

    task_deps![super::git_config::ConfigureGit];

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let resources = symlink_resources(ctx)?;
        if resources.is_empty() {
            return Ok(TaskResult::Skipped("no source files found".to_string()));
        }
        process_resources(ctx, resources, "link")
    }
}

/// Remove links that still point at their source file.
#[derive(Debug)]
pub struct UninstallSymlinks;

impl Task for UninstallSymlinks {
    fn name(&self) -> &'static str {
        "Remove symlinks"
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let resources = symlink_resources(ctx)?;
        if resources.is_empty() {
            return Ok(TaskResult::Skipped("no source files found".to_string()));
        }
        process_resources_remove(ctx, resources, "unlink")
    }
}
