//! Source file discovery and the destination mapping rule.
//!
//! A source file is any repository entry whose name ends with the sentinel
//! suffix (`.symlink` by default). Its destination under `$HOME` is derived
//! purely from its repository-relative path:
//!
//! - `config/tmux/tmux.conf.symlink` maps to `~/.config/tmux/tmux.conf`
//!   (the config subtree is mirrored, nesting preserved);
//! - `zsh/zshrc.symlink` maps to `~/.zshrc` (everything else is flattened).
use anyhow::{Context as _, Result};
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::error::ResourceError;

/// What to do when a destination is already occupied by something other
/// than the expected link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Remove whatever is there and relink.
    #[default]
    Overwrite,
    /// Leave the destination alone.
    Skip,
    /// Move the existing object aside to `<dest>.backup`, then link.
    Backup,
    /// Ask on the terminal for each conflict.
    Prompt,
}

impl std::fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Overwrite => "overwrite",
            Self::Skip => "skip",
            Self::Backup => "backup",
            Self::Prompt => "prompt",
        };
        f.write_str(s)
    }
}

/// The `[symlinks]` section of `dotfiles.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SymlinkSettings {
    /// Sentinel marker that tags a file for linking.
    pub suffix: String,
    /// Top-level directory mirrored under `~/.<config_dir>`.
    pub config_dir: String,
    /// Conflict policy for occupied destinations.
    pub on_conflict: ConflictPolicy,
    /// Directory names never walked during discovery.
    pub exclude: Vec<String>,
}

impl Default for SymlinkSettings {
    fn default() -> Self {
        Self {
            suffix: ".symlink".to_string(),
            config_dir: "config".to_string(),
            on_conflict: ConflictPolicy::Overwrite,
            exclude: vec![".git".to_string()],
        }
    }
}

impl SymlinkSettings {
    /// Whether a top-level path component names the config subtree.
    ///
    /// Both `config` and `.config` match a `config_dir` of either spelling.
    fn is_config_root(&self, component: &str) -> bool {
        let wanted = self.config_dir.trim_start_matches('.');
        !wanted.is_empty() && component.trim_start_matches('.') == wanted
    }

    /// Directory under `$HOME` that mirrors the config subtree (`.config`).
    fn config_home_dir(&self) -> String {
        format!(".{}", self.config_dir.trim_start_matches('.'))
    }
}

/// A tracked file (or directory) tagged for linking into `$HOME`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the repository root.
    pub relative: PathBuf,
    /// Absolute path; the link target.
    pub absolute: PathBuf,
    /// File name with the sentinel suffix stripped.
    pub base_name: String,
}

impl SourceFile {
    /// Build a source file from a path inside `root`.
    ///
    /// `path` may be absolute or relative to `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidSource`] if the path lies outside the
    /// root, its name is not UTF-8, or it does not carry the suffix.
    pub fn from_path(
        root: &Path,
        path: &Path,
        settings: &SymlinkSettings,
    ) -> Result<Self, ResourceError> {
        let invalid = |reason: &str| ResourceError::InvalidSource {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };

        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        };
        let relative = absolute
            .strip_prefix(root)
            .map_err(|_| invalid("outside the repository root"))?
            .to_path_buf();

        let name = relative
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| invalid("file name is not valid UTF-8"))?;
        let base_name = name
            .strip_suffix(settings.suffix.as_str())
            .ok_or_else(|| invalid(&format!("name does not end with '{}'", settings.suffix)))?;
        if base_name.trim_start_matches('.').is_empty() {
            return Err(invalid("name is empty once the suffix is removed"));
        }

        Ok(Self {
            base_name: base_name.to_string(),
            relative,
            absolute,
        })
    }

    /// Whether this source lives under the config subtree.
    #[must_use]
    pub fn is_config_rooted(&self, settings: &SymlinkSettings) -> bool {
        let mut components = self.relative.components();
        let first = match components.next() {
            Some(Component::Normal(first)) => first.to_str().unwrap_or_default(),
            _ => return false,
        };
        components.next().is_some() && settings.is_config_root(first)
    }

    /// Compute the destination path under `home`.
    ///
    /// Config-rooted sources keep their nesting under `home/.config`; all
    /// other sources are flattened to `home/.<base_name>`. A base name that
    /// already starts with a dot is not given a second one.
    #[must_use]
    pub fn destination(&self, home: &Path, settings: &SymlinkSettings) -> PathBuf {
        if self.is_config_rooted(settings) {
            let nested: PathBuf = self.relative.components().skip(1).collect();
            let mut dest = home.join(settings.config_home_dir()).join(nested);
            dest.set_file_name(&self.base_name);
            dest
        } else {
            home.join(format!(".{}", self.base_name.trim_start_matches('.')))
        }
    }
}

/// Result of walking the repository for source files.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Valid source files, in file-name order.
    pub sources: Vec<SourceFile>,
    /// Entries carrying the suffix that are not valid sources
    /// (for example `..symlink`); reported, never linked.
    pub rejected: Vec<ResourceError>,
}

/// Walk `root` and collect every entry whose name ends with the suffix.
///
/// Directories named in `settings.exclude` are not entered. A directory
/// that itself carries the suffix is one source and is not descended into.
/// Names that [`SourceFile::from_path`] rejects land in
/// [`Discovery::rejected`] without stopping the walk.
///
/// # Errors
///
/// Returns an error if a directory cannot be read.
pub fn discover(root: &Path, settings: &SymlinkSettings) -> Result<Discovery> {
    let mut found = Discovery::default();
    let mut walker = WalkDir::new(root).sort_by_file_name().into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        if entry.depth() == 0 {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        let is_dir = entry.file_type().is_dir();
        if is_dir && settings.exclude.iter().any(|e| *e == name) {
            walker.skip_current_dir();
            continue;
        }
        if !name.ends_with(settings.suffix.as_str()) {
            continue;
        }

        match SourceFile::from_path(root, entry.path(), settings) {
            Ok(source) => found.sources.push(source),
            Err(e) => found.rejected.push(e),
        }
        if is_dir {
            walker.skip_current_dir();
        }
    }

    Ok(found)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn source(rel: &str) -> SourceFile {
        SourceFile::from_path(Path::new("/repo"), Path::new(rel), &SymlinkSettings::default())
            .unwrap()
    }

    fn dest(rel: &str) -> PathBuf {
        source(rel).destination(Path::new("/home/user"), &SymlinkSettings::default())
    }

    #[test]
    fn top_level_file_is_flattened() {
        assert_eq!(dest("zsh/zshrc.symlink"), PathBuf::from("/home/user/.zshrc"));
    }

    #[test]
    fn deeply_nested_file_is_flattened() {
        assert_eq!(
            dest("git/extra/deep/gitconfig.symlink"),
            PathBuf::from("/home/user/.gitconfig")
        );
    }

    #[test]
    fn file_at_repo_root_is_flattened() {
        assert_eq!(dest("vimrc.symlink"), PathBuf::from("/home/user/.vimrc"));
    }

    #[test]
    fn config_subtree_preserves_nesting() {
        assert_eq!(
            dest("config/tmux/tmux.conf.symlink"),
            PathBuf::from("/home/user/.config/tmux/tmux.conf")
        );
    }

    #[test]
    fn dotted_config_subtree_preserves_nesting() {
        assert_eq!(
            dest(".config/tmux/tmux.conf.symlink"),
            PathBuf::from("/home/user/.config/tmux/tmux.conf")
        );
    }

    #[test]
    fn config_subtree_deep_nesting() {
        assert_eq!(
            dest("config/nvim/lua/plugins/init.lua.symlink"),
            PathBuf::from("/home/user/.config/nvim/lua/plugins/init.lua")
        );
    }

    #[test]
    fn config_named_file_outside_subtree_is_flattened() {
        // Only the first component counts.
        assert_eq!(
            dest("fish/config/fish.symlink"),
            PathBuf::from("/home/user/.fish")
        );
    }

    #[test]
    fn leading_dot_is_not_doubled() {
        assert_eq!(dest("zsh/.zshenv.symlink"), PathBuf::from("/home/user/.zshenv"));
    }

    #[test]
    fn absolute_path_under_root_is_accepted() {
        let s = SourceFile::from_path(
            Path::new("/repo"),
            Path::new("/repo/zsh/zshrc.symlink"),
            &SymlinkSettings::default(),
        )
        .unwrap();
        assert_eq!(s.relative, PathBuf::from("zsh/zshrc.symlink"));
        assert_eq!(s.absolute, PathBuf::from("/repo/zsh/zshrc.symlink"));
        assert_eq!(s.base_name, "zshrc");
    }

    #[test]
    fn path_outside_root_is_rejected() {
        let err = SourceFile::from_path(
            Path::new("/repo"),
            Path::new("/elsewhere/zshrc.symlink"),
            &SymlinkSettings::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("outside the repository root"));
    }

    #[test]
    fn missing_suffix_is_rejected() {
        let err = SourceFile::from_path(
            Path::new("/repo"),
            Path::new("zsh/zshrc"),
            &SymlinkSettings::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains(".symlink"));
    }

    #[test]
    fn bare_suffix_is_rejected() {
        let err = SourceFile::from_path(
            Path::new("/repo"),
            Path::new("zsh/.symlink"),
            &SymlinkSettings::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn custom_suffix_and_config_dir() {
        let settings = SymlinkSettings {
            suffix: ".link".to_string(),
            config_dir: "xdg".to_string(),
            ..SymlinkSettings::default()
        };
        let s =
            SourceFile::from_path(Path::new("/repo"), Path::new("xdg/kitty/kitty.conf.link"), &settings)
                .unwrap();
        assert_eq!(
            s.destination(Path::new("/home/user"), &settings),
            PathBuf::from("/home/user/.xdg/kitty/kitty.conf")
        );
    }

    #[test]
    fn discover_finds_tagged_files_and_skips_excluded() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("zsh")).unwrap();
        std::fs::create_dir_all(root.join("config/tmux")).unwrap();
        std::fs::create_dir_all(root.join(".git/hooks")).unwrap();
        std::fs::write(root.join("zsh/zshrc.symlink"), "").unwrap();
        std::fs::write(root.join("zsh/aliases.zsh"), "").unwrap();
        std::fs::write(root.join("config/tmux/tmux.conf.symlink"), "").unwrap();
        std::fs::write(root.join(".git/hooks/pre-commit.symlink"), "").unwrap();

        let found = discover(root, &SymlinkSettings::default()).unwrap();
        let rels: Vec<PathBuf> = found.sources.into_iter().map(|s| s.relative).collect();
        assert_eq!(
            rels,
            vec![
                PathBuf::from("config/tmux/tmux.conf.symlink"),
                PathBuf::from("zsh/zshrc.symlink"),
            ]
        );
    }

    #[test]
    fn discover_treats_tagged_directory_as_one_source() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("vim/vim.symlink/colors")).unwrap();
        std::fs::write(root.join("vim/vim.symlink/colors/nested.symlink"), "").unwrap();

        let found = discover(root, &SymlinkSettings::default()).unwrap();
        assert_eq!(found.sources.len(), 1);
        assert_eq!(found.sources[0].relative, PathBuf::from("vim/vim.symlink"));
    }

    #[test]
    fn discover_rejects_empty_names_and_keeps_going() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("misc")).unwrap();
        std::fs::create_dir_all(root.join("zsh")).unwrap();
        std::fs::write(root.join("misc/..symlink"), "").unwrap();
        std::fs::write(root.join("misc/.symlink"), "").unwrap();
        std::fs::write(root.join("zsh/zshrc.symlink"), "").unwrap();

        let found = discover(root, &SymlinkSettings::default()).unwrap();
        assert_eq!(found.sources.len(), 1);
        assert_eq!(found.sources[0].base_name, "zshrc");
        assert_eq!(found.rejected.len(), 2);
        assert!(
            found
                .rejected
                .iter()
                .all(|e| matches!(e, ResourceError::InvalidSource { .. }))
        );
    }

    #[test]
    fn conflict_policy_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: ConflictPolicy,
        }
        let w: Wrapper = toml::from_str("policy = \"backup\"").unwrap();
        assert_eq!(w.policy, ConflictPolicy::Backup);
        assert!(toml::from_str::<Wrapper>("policy = \"merge\"").is_err());
    }
}
