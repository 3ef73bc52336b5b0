//! Configuration loaded from `dotfiles.toml` at the repository root.
//!
//! Every setting the steps consult lives in [`Config`], which is threaded
//! through each step via the task context rather than read from the
//! environment.
pub mod git_config;
pub mod macos;
pub mod packages;
pub mod symlinks;
pub mod toml_loader;
pub mod validation;

use anyhow::{Context as _, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Name of the configuration file at the repository root.
pub const CONFIG_FILE: &str = "dotfiles.toml";

/// The `[shell]` section of `dotfiles.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellSettings {
    /// Login shell to switch to.
    pub default: String,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            default: "zsh".to_string(),
        }
    }
}

/// The `[tmux]` section of `dotfiles.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TmuxSettings {
    /// Git URL of the tmux plugin manager.
    pub plugin_manager: String,
}

impl Default for TmuxSettings {
    fn default() -> Self {
        Self {
            plugin_manager: "https://github.com/tmux-plugins/tpm".to_string(),
        }
    }
}

/// On-disk shape of `dotfiles.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    symlinks: symlinks::SymlinkSettings,
    macos: macos::MacosSettings,
    brew: packages::BrewSettings,
    asdf: packages::AsdfSettings,
    git: git_config::GitSettings,
    shell: ShellSettings,
    tmux: TmuxSettings,
}

/// All loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Root of the dotfiles repository (source root).
    pub root: PathBuf,
    /// Symlink mapper settings.
    pub symlinks: symlinks::SymlinkSettings,
    /// macOS `defaults` entries.
    pub macos: macos::MacosSettings,
    /// Homebrew formulae and casks.
    pub brew: packages::BrewSettings,
    /// asdf tools.
    pub asdf: packages::AsdfSettings,
    /// Global git settings.
    pub git: git_config::GitSettings,
    /// Default shell.
    pub shell: ShellSettings,
    /// tmux plugin manager.
    pub tmux: TmuxSettings,
}

impl Config {
    /// Load `dotfiles.toml` from `root`; a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a value
    /// that cannot be worked around (such as an empty suffix) is present.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        let file: ConfigFile = toml_loader::load_config(&path)
            .with_context(|| format!("loading {CONFIG_FILE}"))?;

        if file.symlinks.suffix.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "symlinks.suffix".to_string(),
                message: "must not be empty".to_string(),
            }
            .into());
        }
        if file.shell.default.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "shell.default".to_string(),
                message: "must name a shell".to_string(),
            }
            .into());
        }

        Ok(Self {
            root: root.to_path_buf(),
            symlinks: file.symlinks,
            macos: file.macos,
            brew: file.brew,
            asdf: file.asdf,
            git: file.git,
            shell: file.shell,
            tmux: file.tmux,
        })
    }

    /// Check for suspicious but non-fatal values.
    #[must_use]
    pub fn validate(&self) -> Vec<validation::ValidationWarning> {
        validation::validate_all(self)
    }
}

/// Shared helpers for config unit tests.
#[cfg(test)]
pub mod test_helpers {
    use std::path::PathBuf;

    /// Write `content` to `dotfiles.toml` in a fresh temp dir.
    #[allow(clippy::expect_used)]
    pub fn write_temp_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path().to_path_buf();
        std::fs::write(root.join(super::CONFIG_FILE), content).expect("write config");
        (dir, root)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::symlinks::ConflictPolicy;
    use super::test_helpers::write_temp_config;
    use super::*;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.root, dir.path());
        assert_eq!(config.symlinks.suffix, ".symlink");
        assert_eq!(config.symlinks.on_conflict, ConflictPolicy::Overwrite);
        assert_eq!(config.shell.default, "zsh");
        assert!(config.brew.is_empty());
    }

    #[test]
    fn full_file_is_loaded() {
        let (_dir, root) = write_temp_config(
            r#"[symlinks]
suffix = ".link"
on_conflict = "backup"

[brew]
formulae = ["git"]

[asdf]
tools = [{ name = "nodejs", version = "20.11.0" }]

[git]
settings = [{ key = "user.name", value = "Jane" }]

[shell]
default = "fish"
"#,
        );
        let config = Config::load(&root).unwrap();
        assert_eq!(config.symlinks.suffix, ".link");
        assert_eq!(config.symlinks.config_dir, "config");
        assert_eq!(config.symlinks.on_conflict, ConflictPolicy::Backup);
        assert_eq!(config.brew.formulae, vec!["git"]);
        assert_eq!(config.asdf.tools[0].name, "nodejs");
        assert_eq!(config.git.settings[0].value, "Jane");
        assert_eq!(config.shell.default, "fish");
    }

    #[test]
    fn empty_suffix_is_fatal() {
        let (_dir, root) = write_temp_config("[symlinks]\nsuffix = \"\"\n");
        let err = Config::load(&root).unwrap_err();
        assert!(format!("{err:#}").contains("symlinks.suffix"));
    }

    #[test]
    fn unknown_section_is_fatal() {
        let (_dir, root) = write_temp_config("[editor]\ntheme = \"dark\"\n");
        assert!(Config::load(&root).is_err());
    }

    #[test]
    fn unknown_conflict_policy_is_fatal() {
        let (_dir, root) = write_temp_config("[symlinks]\non_conflict = \"merge\"\n");
        let err = Config::load(&root).unwrap_err();
        assert!(format!("{err:#}").contains(CONFIG_FILE));
    }
}
