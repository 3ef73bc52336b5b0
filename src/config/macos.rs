//! macOS `defaults` entries.
use serde::Deserialize;

/// Value type passed to `defaults write` (`-bool`, `-int`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultKind {
    /// `-string`
    #[default]
    String,
    /// `-bool`
    Bool,
    /// `-int`
    Int,
    /// `-float`
    Float,
}

impl DefaultKind {
    /// The `defaults write` type flag.
    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            Self::String => "-string",
            Self::Bool => "-bool",
            Self::Int => "-int",
            Self::Float => "-float",
        }
    }
}

/// One `defaults write <domain> <key> -<kind> <value>` setting.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MacosDefault {
    /// Preference domain, e.g. `com.apple.dock`.
    pub domain: String,
    /// Preference key, e.g. `autohide`.
    pub key: String,
    /// Value type; `string` when omitted.
    #[serde(default)]
    pub kind: DefaultKind,
    /// Desired value as written on the command line.
    pub value: String,
}

impl MacosDefault {
    /// The value as `defaults read` prints it back.
    ///
    /// Booleans are reported as `1`/`0`; everything else verbatim.
    #[must_use]
    pub fn expected_readback(&self) -> String {
        match (self.kind, self.value.to_ascii_lowercase().as_str()) {
            (DefaultKind::Bool, "true" | "yes" | "1") => "1".to_string(),
            (DefaultKind::Bool, "false" | "no" | "0") => "0".to_string(),
            _ => self.value.clone(),
        }
    }
}

/// The `[macos]` section of `dotfiles.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MacosSettings {
    /// Settings applied with `defaults write`.
    pub defaults: Vec<MacosDefault>,
}
