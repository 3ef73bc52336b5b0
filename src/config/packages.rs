//! Homebrew and asdf package lists.
use serde::Deserialize;

/// The `[brew]` section of `dotfiles.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrewSettings {
    /// Formulae installed with `brew install`.
    pub formulae: Vec<String>,
    /// Casks installed with `brew install --cask`.
    pub casks: Vec<String>,
}

impl BrewSettings {
    /// Whether nothing is configured.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.formulae.is_empty() && self.casks.is_empty()
    }
}

/// A runtime managed by asdf.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AsdfTool {
    /// Plugin name, e.g. `nodejs`.
    pub name: String,
    /// Version to install; when empty only the plugin is added.
    #[serde(default)]
    pub version: String,
}

/// The `[asdf]` section of `dotfiles.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AsdfSettings {
    /// Tools to install.
    pub tools: Vec<AsdfTool>,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn brew_settings_parse() {
        let s: BrewSettings =
            toml::from_str("formulae = [\"git\", \"tmux\"]\ncasks = [\"wezterm\"]\n").unwrap();
        assert_eq!(s.formulae, vec!["git", "tmux"]);
        assert_eq!(s.casks, vec!["wezterm"]);
        assert!(!s.is_empty());
        assert!(BrewSettings::default().is_empty());
    }

    #[test]
    fn asdf_version_is_optional() {
        let s: AsdfSettings =
            toml::from_str("tools = [{ name = \"nodejs\" }, { name = \"ruby\", version = \"3.3.0\" }]")
                .unwrap();
        assert_eq!(s.tools[0].version, "");
        assert_eq!(s.tools[1].version, "3.3.0");
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(toml::from_str::<BrewSettings>("taps = [\"x\"]").is_err());
    }
}
