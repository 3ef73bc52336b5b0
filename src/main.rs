//! `dotfiles` binary: bootstrap a macOS machine and link dotfiles.
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use dotfiles_bootstrap::cli::{Cli, Command};
use dotfiles_bootstrap::commands;
use dotfiles_bootstrap::logging::{Logger, init_subscriber};
use dotfiles_bootstrap::tasks::context::is_truthy;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let (command, global, verbose) = Cli::parse().command_or_default();
    let verbose = verbose || std::env::var("TRACE").is_ok_and(|v| is_truthy(&v));

    let name = match command {
        Command::Install(_) => "install",
        Command::Uninstall => "uninstall",
        Command::Version => {
            commands::version::run();
            return Ok(());
        }
    };

    init_subscriber(verbose, name);
    let log = Arc::new(Logger::new(name));

    match command {
        Command::Install(opts) => commands::install::run(&global, &opts, &log),
        Command::Uninstall => commands::uninstall::run(&global, &log),
        Command::Version => Ok(()),
    }
}
