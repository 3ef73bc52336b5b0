//! Generic resource processing loop: check state, apply or remove, collect
//! stats.
use anyhow::Result;

use super::context::Context;
use crate::resources::{Resource, ResourceChange, ResourceState};

/// Result of a single step.
///
/// # Examples
///
/// ```
/// use dotfiles_bootstrap::tasks::TaskResult;
///
/// let skipped = TaskResult::Skipped("brew not found".into());
/// assert!(matches!(skipped, TaskResult::Skipped(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// Step completed.
    Ok,
    /// Step had nothing it could do.
    Skipped(String),
    /// Step ran in dry-run mode.
    DryRun,
}

/// Counters for steps that process many resources.
///
/// # Examples
///
/// ```
/// use dotfiles_bootstrap::tasks::TaskStats;
///
/// let stats = TaskStats { changed: 1, already_ok: 2, skipped: 3 };
/// assert_eq!(stats.summary(false), "1 changed, 2 already ok, 3 skipped");
/// assert_eq!(stats.summary(true), "1 would change, 2 already ok, 3 skipped");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    /// Resources changed (or that would change).
    pub changed: u32,
    /// Resources already in the desired state.
    pub already_ok: u32,
    /// Resources left alone.
    pub skipped: u32,
}

impl TaskStats {
    /// Create an empty counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Format the summary line, e.g. `"3 changed, 10 already ok"`.
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let verb = if dry_run { "would change" } else { "changed" };
        if self.skipped > 0 {
            format!(
                "{} {verb}, {} already ok, {} skipped",
                self.changed, self.already_ok, self.skipped
            )
        } else {
            format!("{} {verb}, {} already ok", self.changed, self.already_ok)
        }
    }

    /// Log the summary and return the matching [`TaskResult`].
    #[must_use]
    pub fn finish(self, ctx: &Context) -> TaskResult {
        ctx.log.info(&self.summary(ctx.dry_run));
        if ctx.dry_run {
            TaskResult::DryRun
        } else {
            TaskResult::Ok
        }
    }
}

impl std::ops::AddAssign for TaskStats {
    fn add_assign(&mut self, other: Self) {
        self.changed += other.changed;
        self.already_ok += other.already_ok;
        self.skipped += other.skipped;
    }
}

/// Check each resource and apply the ones that need it.
///
/// `verb` is used in log lines ("link", "install", ...).
///
/// # Errors
///
/// Returns the first state-check or apply error; later resources are not
/// touched.
pub fn process_resources<R: Resource>(
    ctx: &Context,
    resources: impl IntoIterator<Item = R>,
    verb: &str,
) -> Result<TaskResult> {
    let mut stats = TaskStats::new();
    for resource in resources {
        let current = resource.current_state()?;
        stats += process_single(ctx, &resource, current, verb)?;
    }
    Ok(stats.finish(ctx))
}

/// Like [`process_resources`], for resources whose states were fetched in
/// one batch query.
///
/// # Errors
///
/// Returns the first apply error.
pub fn process_resource_states<R: Resource>(
    ctx: &Context,
    resource_states: impl IntoIterator<Item = (R, ResourceState)>,
    verb: &str,
) -> Result<TaskResult> {
    let mut stats = TaskStats::new();
    for (resource, current) in resource_states {
        stats += process_single(ctx, &resource, current, verb)?;
    }
    Ok(stats.finish(ctx))
}

/// Remove every resource that is currently in its applied state.
///
/// # Errors
///
/// Returns the first state-check or removal error.
pub fn process_resources_remove<R: Resource>(
    ctx: &Context,
    resources: impl IntoIterator<Item = R>,
    verb: &str,
) -> Result<TaskResult> {
    let mut stats = TaskStats::new();
    for resource in resources {
        let current = resource.current_state()?;
        stats += remove_single(ctx, &resource, &current, verb)?;
    }
    Ok(stats.finish(ctx))
}

fn process_single<R: Resource>(
    ctx: &Context,
    resource: &R,
    state: ResourceState,
    verb: &str,
) -> Result<TaskStats> {
    let desc = resource.description();
    let mut delta = TaskStats::new();
    match state {
        ResourceState::Correct => {
            ctx.log.debug(&format!("ok: {desc}"));
            delta.already_ok += 1;
        }
        ResourceState::Invalid { reason } => {
            ctx.log.info(&format!("skipping {desc}: {reason}"));
            delta.skipped += 1;
        }
        ResourceState::Incorrect { current } if ctx.dry_run => {
            ctx.log
                .dry_run(&format!("would {verb} {desc} (currently {current})"));
            delta.changed += 1;
        }
        ResourceState::Missing if ctx.dry_run => {
            ctx.log.dry_run(&format!("would {verb}: {desc}"));
            delta.changed += 1;
        }
        ResourceState::Missing | ResourceState::Incorrect { .. } => {
            delta += apply_resource(ctx, resource, verb)?;
        }
    }
    Ok(delta)
}

fn apply_resource<R: Resource>(ctx: &Context, resource: &R, verb: &str) -> Result<TaskStats> {
    let desc = resource.description();
    let mut delta = TaskStats::new();
    match resource.apply()? {
        ResourceChange::Applied => {
            ctx.log.debug(&format!("{verb}: {desc}"));
            delta.changed += 1;
        }
        ResourceChange::AlreadyCorrect => delta.already_ok += 1,
        ResourceChange::Skipped { reason } => {
            ctx.log.warn(&format!("did not {verb} {desc}: {reason}"));
            delta.skipped += 1;
        }
    }
    Ok(delta)
}

fn remove_single<R: Resource>(
    ctx: &Context,
    resource: &R,
    current: &ResourceState,
    verb: &str,
) -> Result<TaskStats> {
    let desc = resource.description();
    let mut delta = TaskStats::new();
    if *current != ResourceState::Correct {
        ctx.log.debug(&format!("not ours, leaving: {desc}"));
        delta.already_ok += 1;
        return Ok(delta);
    }
    if ctx.dry_run {
        ctx.log.dry_run(&format!("would {verb}: {desc}"));
        delta.changed += 1;
        return Ok(delta);
    }
    match resource.remove()? {
        ResourceChange::Applied => {
            ctx.log.debug(&format!("{verb}: {desc}"));
            delta.changed += 1;
        }
        ResourceChange::AlreadyCorrect => delta.already_ok += 1,
        ResourceChange::Skipped { reason } => {
            ctx.log.debug(&format!("left {desc}: {reason}"));
            delta.skipped += 1;
        }
    }
    Ok(delta)
}
