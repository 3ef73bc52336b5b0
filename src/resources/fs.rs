//! File-system helpers shared by resources.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use crate::error::ResourceError;

/// Ensure the parent directory of `path` exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// Whether anything (including a dangling symlink) occupies `path`.
#[must_use]
pub fn is_occupied(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Remove whatever occupies `path`: a file, a symlink (never followed), or a
/// whole directory tree. Does nothing if `path` is free.
///
/// # Errors
///
/// Returns an error if the entry exists but cannot be removed.
pub fn remove_any(path: &Path) -> Result<()> {
    let Ok(meta) = path.symlink_metadata() else {
        return Ok(());
    };
    if meta.is_dir() {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("remove directory: {}", path.display()))?;
    } else {
        std::fs::remove_file(path).with_context(|| format!("remove: {}", path.display()))?;
    }
    Ok(())
}

/// First free backup name for `path`: `<path>.backup`, then `<path>.backup.1`,
/// `<path>.backup.2`, and so on.
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    let mut base = path.as_os_str().to_os_string();
    base.push(".backup");
    let first = PathBuf::from(&base);
    if !is_occupied(&first) {
        return first;
    }
    (1u32..)
        .map(|n| {
            let mut candidate = base.clone();
            candidate.push(format!(".{n}"));
            PathBuf::from(candidate)
        })
        .find(|candidate| !is_occupied(candidate))
        .unwrap_or(first)
}

/// Move whatever occupies `path` to its [`backup_path`] and return where it
/// went.
///
/// # Errors
///
/// Returns [`ResourceError::Backup`] if the rename fails.
pub fn move_to_backup(path: &Path) -> Result<PathBuf, ResourceError> {
    let backup = backup_path(path);
    std::fs::rename(path, &backup).map_err(|source| ResourceError::Backup {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(backup)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn ensure_parent_dir_creates_missing_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("file.txt");
        ensure_parent_dir(&nested).unwrap();
        assert!(dir.path().join("a").join("b").is_dir());
    }

    #[test]
    fn remove_any_handles_files_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file");
        let tree = dir.path().join("tree");
        std::fs::write(&file, "x").unwrap();
        std::fs::create_dir_all(tree.join("nested")).unwrap();
        std::fs::write(tree.join("nested/inner"), "y").unwrap();

        remove_any(&file).unwrap();
        remove_any(&tree).unwrap();
        remove_any(&dir.path().join("absent")).unwrap();

        assert!(!is_occupied(&file));
        assert!(!is_occupied(&tree));
    }

    #[cfg(unix)]
    #[test]
    fn remove_any_does_not_follow_directory_links() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real");
        let link = dir.path().join("link");
        std::fs::create_dir(&real).unwrap();
        std::fs::write(real.join("keep"), "x").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        remove_any(&link).unwrap();

        assert!(!is_occupied(&link));
        assert!(real.join("keep").exists());
    }

    #[cfg(unix)]
    #[test]
    fn dangling_link_counts_as_occupied() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink("/nonexistent/target", &link).unwrap();
        assert!(is_occupied(&link));
        assert!(!link.exists());
    }

    #[test]
    fn backup_path_picks_next_free_name() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join(".zshrc");
        assert_eq!(backup_path(&target), dir.path().join(".zshrc.backup"));

        std::fs::write(dir.path().join(".zshrc.backup"), "").unwrap();
        assert_eq!(backup_path(&target), dir.path().join(".zshrc.backup.1"));

        std::fs::write(dir.path().join(".zshrc.backup.1"), "").unwrap();
        assert_eq!(backup_path(&target), dir.path().join(".zshrc.backup.2"));
    }

    #[test]
    fn move_to_backup_preserves_content() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join(".vimrc");
        std::fs::write(&target, "set number").unwrap();

        let moved = move_to_backup(&target).unwrap();

        assert!(!is_occupied(&target));
        assert_eq!(std::fs::read_to_string(moved).unwrap(), "set number");
    }
}
