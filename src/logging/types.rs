//! Core logging types: task entries, status, and the [`Log`] trait.

/// Step result for summary reporting.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Human-readable step name.
    pub name: String,
    /// Final status of the step.
    pub status: TaskStatus,
    /// Optional detail (skip reason or error description).
    pub message: Option<String>,
}

/// Status of a finished (or never started) step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Step completed successfully.
    Ok,
    /// Step does not apply to this platform.
    NotApplicable,
    /// Step was skipped (tool missing, nothing configured, earlier failure).
    Skipped,
    /// Step ran in dry-run mode; nothing was changed.
    DryRun,
    /// Step failed and aborted the run.
    Failed,
}

impl TaskStatus {
    /// Summary icon and ANSI colour for this status.
    #[must_use]
    pub const fn marker(self) -> (&'static str, &'static str) {
        match self {
            Self::Ok => ("✓", "\x1b[32m"),
            Self::NotApplicable => ("·", "\x1b[2m"),
            Self::Skipped => ("○", "\x1b[33m"),
            Self::DryRun => ("~", "\x1b[37m"),
            Self::Failed => ("✗", "\x1b[31m"),
        }
    }
}

/// What steps and resources log through; [`Logger`](super::Logger) is the
/// only production implementation.
pub trait Log: Send + Sync {
    /// Log a stage header (one per step).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (console only when verbose).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log an action that would have been taken outside dry-run mode.
    fn dry_run(&self, msg: &str);
    /// Record a step result for the summary.
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>);
}
