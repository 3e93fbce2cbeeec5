//! Viewer configuration loaded from `~/.config/weavescope/config.ron`.
//!
//! Every field is optional. Example:
//!
//! ```ron
//! (
//!     log_filter: Some("weavescope_nav=debug"),
//!     highlight_self: true,
//!     show_values: false,
//!     bindings: [
//!         (key: "n", action: Nav(JumpBy(1)), description: "Forward 1"),
//!         (key: "ctrl+g", action: BeginGoto),
//!     ],
//! )
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::input::{Binding, KeyMap};
use crate::render::RenderOptions;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// `EnvFilter` directives; `RUST_LOG` still wins when set.
    pub log_filter: Option<String>,
    pub highlight_self: bool,
    pub show_values: bool,
    /// Appended after the default bindings, so these win.
    pub bindings: Vec<Binding>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            log_filter: None,
            highlight_self: true,
            show_values: true,
            bindings: Vec::new(),
        }
    }
}

/// Error type for config loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Get the config file path (~/.config/weavescope/config.ron).
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("weavescope").join("config.ron"))
}

impl ViewerConfig {
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    /// Load `explicit` if given, else the default file if it exists, else defaults.
    ///
    /// Runs before logging is up, so problems are returned rather than logged.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match config_file_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            highlight_self: self.highlight_self,
            show_values: self.show_values,
        }
    }

    /// Default bindings plus the configured extras.
    pub fn keymap(&self) -> KeyMap {
        let mut map = KeyMap::default();
        map.extend(self.bindings.iter().cloned());
        map
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crossterm::event::KeyCode;
    use weavescope_nav::Command;

    use super::*;
    use crate::input::{KeyAction, KeySpec, Scroll};

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(ViewerConfig::from_ron_str("()").unwrap(), ViewerConfig::default());
    }

    #[test]
    fn test_full_config() {
        let config = ViewerConfig::from_ron_str(
            r#"(
                log_filter: Some("debug"),
                show_values: false,
                bindings: [
                    (key: "n", action: Nav(JumpBy(1)), description: "Forward 1"),
                    (key: "Right", action: Nav(JumpBy(5))),
                    (key: "ctrl+g", action: BeginGoto),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(config.log_filter.as_deref(), Some("debug"));
        assert!(config.highlight_self);
        assert!(!config.render_options().show_values);

        let map = config.keymap();
        assert_eq!(
            map.resolve(&KeySpec::char('n')).unwrap().action,
            KeyAction::Nav(Command::JumpBy(1))
        );
        assert_eq!(
            map.resolve(&KeySpec::plain(KeyCode::Right)).unwrap().action,
            KeyAction::Nav(Command::JumpBy(5))
        );
        assert_eq!(map.resolve(&KeySpec::ctrl('g')).unwrap().action, KeyAction::BeginGoto);
    }

    #[test]
    fn test_scroll_binding_from_ron() {
        let config = ViewerConfig::from_ron_str(r#"(bindings: [(key: "Space", action: Scroll(Page(1)))])"#).unwrap();
        assert_eq!(
            config.keymap().resolve(&KeySpec::char(' ')).unwrap().action,
            KeyAction::Scroll(Scroll::Page(1))
        );
    }

    #[test]
    fn test_bad_key_is_a_parse_error() {
        let err = ViewerConfig::from_ron_str(r#"(bindings: [(key: "Hyper+x", action: Quit)])"#).unwrap_err();
        assert!(matches!(err, ConfigError::Ron(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "(highlight_self: false)").unwrap();
        let config = ViewerConfig::resolve(Some(file.path())).unwrap();
        assert!(!config.highlight_self);
    }

    #[test]
    fn test_explicit_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = ViewerConfig::resolve(Some(&dir.path().join("nope.ron"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
