//! Global git settings.
use serde::Deserialize;

/// A git config key-value pair to apply globally.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitSetting {
    /// Config key (e.g. `"user.name"`).
    pub key: String,
    /// Desired value.
    pub value: String,
}

/// The `[git]` section of `dotfiles.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitSettings {
    /// Settings written with `git config --global`.
    pub settings: Vec<GitSetting>,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn load_identity_settings() {
        let s: GitSettings = toml::from_str(
            r#"settings = [
  { key = "user.name", value = "Jane Doe" },
  { key = "user.email", value = "jane@example.com" },
]
"#,
        )
        .unwrap();
        assert_eq!(s.settings.len(), 2);
        assert_eq!(s.settings[0].key, "user.name");
        assert_eq!(s.settings[1].value, "jane@example.com");
    }
}
