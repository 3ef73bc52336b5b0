//! Command-line interface definitions.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::symlinks::ConflictPolicy;

/// Bootstrap a macOS machine and link dotfiles into `$HOME`.
#[derive(Parser, Debug)]
#[command(
    name = "dotfiles",
    about = "macOS bootstrap and dotfiles linker",
    version
)]
pub struct Cli {
    /// Subcommand to run; defaults to `install`.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Override dotfiles root directory
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// What to do when a link destination is already occupied
    #[arg(long, value_enum, global = true)]
    pub on_conflict: Option<ConflictPolicy>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run every setup step, then link dotfiles (default)
    Install(InstallOpts),
    /// Remove links created by install
    Uninstall,
    /// Print version information
    Version,
}

impl Cli {
    /// The subcommand to run, treating a bare invocation as `install`.
    #[must_use]
    pub fn command_or_default(self) -> (Command, GlobalOpts, bool) {
        let command = self
            .command
            .unwrap_or_else(|| Command::Install(InstallOpts::default()));
        (command, self.global, self.verbose)
    }
}

/// Options for the `install` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct InstallOpts {
    /// Skip steps whose name contains one of these keywords
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Run only steps whose name contains one of these keywords
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_install() {
        let (command, _, _) = Cli::parse_from(["dotfiles"]).command_or_default();
        assert!(matches!(command, Command::Install(opts) if opts.skip.is_empty()));
    }

    #[test]
    fn parse_dry_run_short() {
        let cli = Cli::parse_from(["dotfiles", "-d"]);
        assert!(cli.global.dry_run);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_global_flag_after_subcommand() {
        let cli = Cli::parse_from(["dotfiles", "install", "--dry-run"]);
        assert!(cli.global.dry_run);
    }

    #[test]
    fn parse_skip_list() {
        let cli = Cli::parse_from(["dotfiles", "install", "--skip", "homebrew,asdf"]);
        let Some(Command::Install(opts)) = cli.command else {
            panic!("expected install");
        };
        assert_eq!(opts.skip, vec!["homebrew", "asdf"]);
    }

    #[test]
    fn parse_only_list() {
        let cli = Cli::parse_from(["dotfiles", "install", "--only", "symlinks"]);
        let Some(Command::Install(opts)) = cli.command else {
            panic!("expected install");
        };
        assert_eq!(opts.only, vec!["symlinks"]);
    }

    #[test]
    fn parse_on_conflict() {
        let cli = Cli::parse_from(["dotfiles", "--on-conflict", "backup"]);
        assert_eq!(cli.global.on_conflict, Some(ConflictPolicy::Backup));
    }

    #[test]
    fn unknown_conflict_policy_is_rejected() {
        assert!(Cli::try_parse_from(["dotfiles", "--on-conflict", "merge"]).is_err());
    }

    #[test]
    fn parse_uninstall_and_version() {
        assert!(matches!(
            Cli::parse_from(["dotfiles", "uninstall"]).command,
            Some(Command::Uninstall)
        ));
        assert!(matches!(
            Cli::parse_from(["dotfiles", "version"]).command,
            Some(Command::Version)
        ));
    }

    #[test]
    fn parse_root_and_verbose() {
        let cli = Cli::parse_from(["dotfiles", "-v", "--root", "/tmp/dotfiles", "uninstall"]);
        assert!(cli.verbose);
        assert_eq!(cli.global.root, Some(PathBuf::from("/tmp/dotfiles")));
    }
}
