//! Install command: every setup step, then the symlinks.
use anyhow::Result;
use std::sync::Arc;

use crate::cli::{GlobalOpts, InstallOpts};
use crate::logging::Logger;
use crate::tasks::{self, Task};

/// Run the install command.
///
/// # Errors
///
/// Returns an error if setup fails or any selected step fails.
pub fn run(global: &GlobalOpts, opts: &InstallOpts, log: &Arc<Logger>) -> Result<()> {
    log.info(&format!("dotfiles {}", super::version::version()));

    let runner = super::CommandRunner::new(global, log)?;
    let registered = tasks::all_install_tasks();
    let selected = select(&registered, opts);
    runner.run(&registered, &selected)
}

/// Filter steps by `--only` (takes precedence) or `--skip`, matching
/// case-insensitive substrings of the step name.
fn select<'a>(tasks: &'a [Box<dyn Task>], opts: &InstallOpts) -> Vec<&'a dyn Task> {
    let matches = |name: &str, keywords: &[String]| {
        let name = name.to_lowercase();
        keywords.iter().any(|k| name.contains(&k.to_lowercase()))
    };
    tasks
        .iter()
        .map(Box::as_ref)
        .filter(|t| {
            if !opts.only.is_empty() {
                return matches(t.name(), &opts.only);
            }
            !matches(t.name(), &opts.skip)
        })
        .collect()
}
