//! macOS bootstrap and dotfiles linker.
//!
//! Installs Homebrew and the configured packages, asdf tools, git settings,
//! login shell, and tmux plugin manager, then links every `*.symlink` source
//! in the repository into `$HOME`. Everything is driven by `dotfiles.toml`
//! at the repository root.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: load and validate `dotfiles.toml`, discover sources
//! - **[`resources`]**: idempotent `check + apply` primitives (links, packages, …)
//! - **[`tasks`]**: named, dependency-ordered steps wired to resources
//! - **[`commands`]**: subcommand orchestration (`install`, `uninstall`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod platform;
pub mod resources;
pub mod tasks;
