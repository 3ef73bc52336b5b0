//! Tracing subscriber setup: console formatter, file layer, initialisation.
use std::fs;
use std::io::Write as _;
use std::sync::Mutex;

use tracing::Level;

use super::utils::{format_utc_datetime, format_utc_time, log_file_path, strip_ansi};

/// Target used for per-step stage headers.
pub(super) const STAGE_TARGET: &str = "dotfiles::stage";
/// Target used for dry-run previews.
pub(super) const DRY_RUN_TARGET: &str = "dotfiles::dry_run";

/// Pulls the `message` field out of a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

fn event_message(event: &tracing::Event<'_>) -> String {
    let mut extractor = MessageExtractor::default();
    event.record(&mut extractor);
    extractor.message
}

/// Render one log-file line (no colour).
fn file_line(level: Level, target: &str, ts: &str, msg: &str) -> String {
    match (level, target) {
        (Level::INFO, STAGE_TARGET) => format!("[{ts}] ==> {msg}"),
        (Level::INFO, DRY_RUN_TARGET) => format!("[{ts}]     [dry run] {msg}"),
        (Level::ERROR, _) => format!("[{ts}]     [error] {msg}"),
        (Level::WARN, _) => format!("[{ts}]     [warn] {msg}"),
        (Level::DEBUG | Level::TRACE, _) => format!("[{ts}]     [debug] {msg}"),
        _ => format!("[{ts}]     {msg}"),
    }
}

/// Render one console line (with colour).
fn console_line(level: Level, target: &str, msg: &str) -> String {
    match level {
        Level::ERROR => format!("\x1b[31mERROR\x1b[0m {msg}"),
        Level::WARN => format!("\x1b[33mWARN\x1b[0m  {msg}"),
        Level::INFO if target == STAGE_TARGET => format!("\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
        Level::INFO if target == DRY_RUN_TARGET => format!("  \x1b[33m[DRY RUN]\x1b[0m {msg}"),
        Level::INFO => format!("  {msg}"),
        _ => format!("  \x1b[2m{msg}\x1b[0m"),
    }
}

/// A [`tracing_subscriber::Layer`] appending every event to the run log.
///
/// Always records `DEBUG` and above regardless of console verbosity.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Truncate the log file for `command`, write a run header and open it
    /// for appending.
    ///
    /// Returns `None` if the cache directory or file is unavailable; the run
    /// then continues with console output only.
    pub(super) fn new(command: &str) -> Option<Self> {
        let path = log_file_path(command)?;
        let version =
            option_env!("DOTFILES_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
        let header = format!(
            "==========================================\n\
             dotfiles {command} {version} {}\n\
             ==========================================\n",
            format_utc_datetime(),
        );
        fs::write(&path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(&path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        let msg = strip_ansi(&event_message(event));
        let line = file_line(*metadata.level(), metadata.target(), &format_utc_time(), &msg);
        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{line}").ok();
        }
    }
}

/// Console formatter producing `==>` stage headers and indented detail.
struct ConsoleFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let line = console_line(*metadata.level(), metadata.target(), &event_message(event));
        writeln!(writer, "{line}")
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Console output goes to stdout (warnings and errors to stderr) at `INFO`,
/// or `DEBUG` when `verbose`. Every event at `DEBUG` and above is also
/// written to `$XDG_CACHE_HOME/dotfiles/<command>.log`. Call once, before
/// any logging.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let make_writer = std::io::stderr
        .with_max_level(Level::WARN)
        .and(std::io::stdout.with_min_level(Level::INFO));

    let console_layer = fmt::layer()
        .event_format(ConsoleFormatter)
        .with_writer(make_writer)
        .with_filter(console_level);

    let file_layer = FileLayer::new(command).map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_line_tags_levels() {
        assert_eq!(file_line(Level::INFO, STAGE_TARGET, "t", "Link"), "[t] ==> Link");
        assert_eq!(
            file_line(Level::INFO, DRY_RUN_TARGET, "t", "would link"),
            "[t]     [dry run] would link"
        );
        assert_eq!(file_line(Level::WARN, "x", "t", "w"), "[t]     [warn] w");
        assert_eq!(file_line(Level::ERROR, "x", "t", "e"), "[t]     [error] e");
        assert_eq!(file_line(Level::DEBUG, "x", "t", "d"), "[t]     [debug] d");
        assert_eq!(file_line(Level::INFO, "x", "t", "i"), "[t]     i");
    }

    #[test]
    fn console_line_marks_stages_and_dry_runs() {
        assert!(console_line(Level::INFO, STAGE_TARGET, "Install symlinks").contains("==>"));
        assert!(console_line(Level::INFO, DRY_RUN_TARGET, "x").contains("[DRY RUN]"));
        assert_eq!(console_line(Level::INFO, "other", "plain"), "  plain");
        assert!(console_line(Level::ERROR, "other", "boom").starts_with("\x1b[31mERROR"));
    }
}
