//! Uninstall command implementation.
use anyhow::Result;
use std::sync::Arc;

use crate::cli::GlobalOpts;
use crate::logging::Logger;
use crate::tasks::{self, Task};

/// Run the uninstall command.
///
/// # Errors
///
/// Returns an error if setup fails or a link cannot be removed.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    let runner = super::CommandRunner::new(global, log)?;
    let registered = tasks::all_uninstall_tasks();
    let selected: Vec<&dyn Task> = registered.iter().map(Box::as_ref).collect();
    runner.run(&registered, &selected)
}
