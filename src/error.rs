//! Domain-specific error types for the bootstrap engine.
//!
//! Internal modules return typed errors ([`ConfigError`] for `dotfiles.toml`,
//! [`TaskError`] for step execution and ordering, [`ResourceError`] for
//! source files, links, and backups) while command handlers at the CLI
//! boundary convert them to [`anyhow::Error`] via the standard `?` operator.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise from loading `dotfiles.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file is not valid TOML or does not match the expected schema.
    #[error("Invalid TOML in {file}: {message}")]
    InvalidSyntax {
        /// File that failed to parse.
        file: String,
        /// Parser message.
        message: String,
    },

    /// A value is syntactically valid but not acceptable.
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue {
        /// Dotted key of the offending setting.
        key: String,
        /// Why the value was rejected.
        message: String,
    },

    /// An I/O error occurred while reading a config file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise during step execution.
#[derive(Error, Debug)]
pub enum TaskError {
    /// A step failed and the run was aborted.
    #[error("Task '{task}' failed: {reason}")]
    ExecutionFailed {
        /// Name of the step that failed.
        task: String,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// A step is registered before one of its dependencies.
    #[error("Task '{task}' is registered before its dependency '{dependency}'")]
    DependencyOrder {
        /// The dependent step.
        task: String,
        /// The dependency that runs too late.
        dependency: String,
    },

    /// A step depends on a step that is not registered at all.
    #[error("Task '{0}' depends on a task that is not registered")]
    MissingDependency(String),
}

/// Errors that arise from resource operations.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// A path handed to the mapper is not a valid source file.
    #[error("Invalid source file {}: {reason}", path.display())]
    InvalidSource {
        /// The rejected path.
        path: PathBuf,
        /// Why it was rejected.
        reason: String,
    },

    /// A symlink operation failed.
    #[error("Symlink error: {0}")]
    Symlink(String),

    /// Moving an existing destination out of the way failed.
    #[error("Backup of {} failed", path.display())]
    Backup {
        /// Destination that could not be backed up.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
