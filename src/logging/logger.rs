//! Structured logger with dry-run awareness and summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::{DRY_RUN_TARGET, STAGE_TARGET};
use super::types::{Log, TaskEntry, TaskStatus};
use super::utils::log_file_path;

/// Forward the `fn(&self, &str)` methods of [`Log`] to inherent methods of
/// the same name.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Per-status counts over the recorded steps.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Tally {
    ok: u32,
    not_applicable: u32,
    skipped: u32,
    dry_run: u32,
    failed: u32,
}

impl Tally {
    fn of(entries: &[TaskEntry]) -> Self {
        let mut tally = Self::default();
        for entry in entries {
            match entry.status {
                TaskStatus::Ok => tally.ok += 1,
                TaskStatus::NotApplicable => tally.not_applicable += 1,
                TaskStatus::Skipped => tally.skipped += 1,
                TaskStatus::DryRun => tally.dry_run += 1,
                TaskStatus::Failed => tally.failed += 1,
            }
        }
        tally
    }

    const fn total(&self) -> u32 {
        self.ok + self.not_applicable + self.skipped + self.dry_run + self.failed
    }
}

/// Console and file logger that also collects step results.
///
/// Every message also lands in `$XDG_CACHE_HOME/dotfiles/<command>.log`
/// through the subscriber's file layer.
#[derive(Debug)]
pub struct Logger {
    tasks: Mutex<Vec<TaskEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a logger for `command`.
    ///
    /// Only remembers the log path for the summary; the file itself is
    /// created by [`init_subscriber`](super::init_subscriber).
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            tasks: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Return the log file path, if available.
    #[cfg(test)]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return a copy of every recorded step result.
    #[must_use]
    pub fn task_entries(&self) -> Vec<TaskEntry> {
        self.tasks.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header.
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message.
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Record a step result for the summary.
    pub fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.tasks.lock() {
            guard.push(TaskEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Count the failed steps.
    #[cfg(test)]
    pub fn failure_count(&self) -> usize {
        self.tasks.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|t| t.status == TaskStatus::Failed)
                .count()
        })
    }

    /// Print one line per recorded step, the status counts and the log path.
    #[allow(clippy::print_stdout)]
    pub fn print_summary(&self) {
        let tasks = self.task_entries();
        if tasks.is_empty() {
            return;
        }

        println!();
        self.stage("Summary");

        for task in &tasks {
            let (icon, color) = task.status.marker();
            let suffix = task
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));
            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", task.name));
        }

        println!();
        let t = Tally::of(&tasks);
        self.info(&format!(
            "{} tasks: \x1b[32m{} ok\x1b[0m, \x1b[2m{} n/a\x1b[0m, \x1b[33m{} skipped\x1b[0m, \x1b[37m{} dry-run\x1b[0m, \x1b[31m{} failed\x1b[0m",
            t.total(),
            t.ok,
            t.not_applicable,
            t.skipped,
            t.dry_run,
            t.failed,
        ));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, dry_run);

    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        self.record_task(name, status, message);
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::isolated_logger;
    use std::fs;

    #[test]
    fn logger_starts_empty() {
        let (log, _tmp, _guard) = isolated_logger();
        assert!(log.task_entries().is_empty());
        assert_eq!(log.failure_count(), 0);
    }

    #[test]
    fn record_task_with_message() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record_task("Install asdf tools", TaskStatus::Skipped, Some("asdf not found"));
        let tasks = log.task_entries();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "Install asdf tools");
        assert_eq!(tasks[0].message.as_deref(), Some("asdf not found"));
    }

    #[test]
    fn failure_count_counts_only_failures() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record_task("a", TaskStatus::Ok, None);
        log.record_task("b", TaskStatus::Failed, Some("boom"));
        log.record_task("c", TaskStatus::Skipped, Some("earlier step failed"));
        assert_eq!(log.failure_count(), 1);
    }

    #[test]
    fn tally_counts_each_status() {
        let entry = |status| TaskEntry {
            name: String::new(),
            status,
            message: None,
        };
        let t = Tally::of(&[
            entry(TaskStatus::Ok),
            entry(TaskStatus::Ok),
            entry(TaskStatus::NotApplicable),
            entry(TaskStatus::DryRun),
            entry(TaskStatus::Failed),
        ]);
        assert_eq!(t.ok, 2);
        assert_eq!(t.not_applicable, 1);
        assert_eq!(t.skipped, 0);
        assert_eq!(t.total(), 5);
    }

    #[test]
    fn log_trait_delegates_to_logger() {
        let (log, _tmp, _guard) = isolated_logger();
        let log_ref: &dyn Log = &log;
        log_ref.record_task("via-trait", TaskStatus::Ok, None);
        assert_eq!(log.task_entries().len(), 1);
    }

    #[test]
    fn messages_reach_the_log_file() {
        let (log, _tmp, _guard) = isolated_logger();
        let marker = format!("marker-{}", std::process::id());
        log.stage(&format!("stage-{marker}"));
        log.debug(&format!("debug-{marker}"));
        log.warn(&format!("warn-{marker}"));
        log.dry_run(&format!("dry-{marker}"));
        let contents = fs::read_to_string(log.log_path().expect("log path")).unwrap();
        assert!(contents.contains(&format!("==> stage-{marker}")));
        assert!(contents.contains(&format!("[debug] debug-{marker}")));
        assert!(contents.contains(&format!("[warn] warn-{marker}")));
        assert!(contents.contains(&format!("[dry run] dry-{marker}")));
    }

    #[test]
    fn summary_is_written_to_the_log_file() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record_task("Install symlinks", TaskStatus::Ok, None);
        log.record_task("Install Homebrew", TaskStatus::Failed, Some("curl failed"));
        log.print_summary();
        let contents = fs::read_to_string(log.log_path().expect("log path")).unwrap();
        assert!(contents.contains("==> Summary"));
        assert!(contents.contains("✗ Install Homebrew (curl failed)"));
        assert!(contents.contains("2 tasks: 1 ok, 0 n/a, 0 skipped, 0 dry-run, 1 failed"));
    }
}
