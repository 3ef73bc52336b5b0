//! Non-fatal configuration checks.
use std::collections::HashSet;

use super::Config;

/// A validation warning detected after configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Section of `dotfiles.toml` (e.g. `"brew"`).
    pub source: String,
    /// The specific item that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Create a new warning.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

/// Run every check against `config`.
#[must_use]
pub fn validate_all(config: &Config) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    check_symlinks(config, &mut warnings);
    check_brew(config, &mut warnings);
    check_asdf(config, &mut warnings);
    check_git(config, &mut warnings);
    check_macos(config, &mut warnings);
    warnings
}

fn check_symlinks(config: &Config, warnings: &mut Vec<ValidationWarning>) {
    let suffix = &config.symlinks.suffix;
    if !suffix.starts_with('.') {
        warnings.push(ValidationWarning::new(
            "symlinks",
            suffix,
            "suffix does not start with '.'; ordinary file names may match",
        ));
    }
    if config.symlinks.config_dir.trim_start_matches('.').is_empty() {
        warnings.push(ValidationWarning::new(
            "symlinks",
            "config_dir",
            "empty config_dir; every source will be flattened",
        ));
    }
}

fn check_brew(config: &Config, warnings: &mut Vec<ValidationWarning>) {
    let mut seen = HashSet::new();
    for name in config.brew.formulae.iter().chain(&config.brew.casks) {
        if !seen.insert(name.as_str()) {
            warnings.push(ValidationWarning::new("brew", name, "listed more than once"));
        }
    }
}

fn check_asdf(config: &Config, warnings: &mut Vec<ValidationWarning>) {
    for tool in &config.asdf.tools {
        if tool.version.trim().is_empty() {
            warnings.push(ValidationWarning::new(
                "asdf",
                &tool.name,
                "no version given; only the plugin will be added",
            ));
        }
    }
}

fn check_git(config: &Config, warnings: &mut Vec<ValidationWarning>) {
    for setting in &config.git.settings {
        if setting.key.trim().is_empty() || !setting.key.contains('.') {
            warnings.push(ValidationWarning::new(
                "git",
                &setting.key,
                "key must have the form section.name",
            ));
        }
    }
}

fn check_macos(config: &Config, warnings: &mut Vec<ValidationWarning>) {
    for entry in &config.macos.defaults {
        if entry.domain.trim().is_empty() || entry.key.trim().is_empty() {
            warnings.push(ValidationWarning::new(
                "macos",
                format!("{} {}", entry.domain, entry.key),
                "domain and key are required",
            ));
        }
    }
}
