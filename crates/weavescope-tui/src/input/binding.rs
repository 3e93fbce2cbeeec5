//! Binding types: map keys to actions.

use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use weavescope_nav::Command;

/// A key plus the modifiers that must be held.
///
/// Text form (used in config files): optional `ctrl+`, `alt+`, `shift+`
/// prefixes, then a key name (`Left`, `PageUp`, `Esc`, `F5`, ...) or a single
/// character. `"+"` and `"ctrl++"` are both valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Normalize a terminal key event for lookup.
    ///
    /// Shift is already folded into the character for printable keys (`{` is
    /// reported as Shift+`{` by some terminals), so it is dropped there.
    pub fn from_event(event: &KeyEvent) -> Self {
        let mut modifiers = event.modifiers & (KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT);
        if matches!(event.code, KeyCode::Char(_)) {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        Self::new(event.code, modifiers)
    }
}

const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("Left", KeyCode::Left),
    ("Right", KeyCode::Right),
    ("Up", KeyCode::Up),
    ("Down", KeyCode::Down),
    ("Home", KeyCode::Home),
    ("End", KeyCode::End),
    ("PageUp", KeyCode::PageUp),
    ("PageDown", KeyCode::PageDown),
    ("Enter", KeyCode::Enter),
    ("Esc", KeyCode::Esc),
    ("Backspace", KeyCode::Backspace),
    ("Tab", KeyCode::Tab),
    ("Delete", KeyCode::Delete),
    ("Space", KeyCode::Char(' ')),
];

const MODIFIER_PREFIXES: &[(&str, KeyModifiers)] = &[
    ("ctrl+", KeyModifiers::CONTROL),
    ("alt+", KeyModifiers::ALT),
    ("shift+", KeyModifiers::SHIFT),
];

/// Error parsing a [`KeySpec`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key {0:?}")]
pub struct KeySpecError(pub String);

impl FromStr for KeySpec {
    type Err = KeySpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rest = s;
        let mut modifiers = KeyModifiers::NONE;

        'prefixes: loop {
            // A lone "+" is the plus key, not an empty modifier suffix.
            if rest.len() <= 1 {
                break;
            }
            for (prefix, modifier) in MODIFIER_PREFIXES {
                let matched = rest.len() > prefix.len()
                    && rest.get(..prefix.len()).is_some_and(|head| head.eq_ignore_ascii_case(prefix));
                if matched {
                    modifiers |= *modifier;
                    rest = &rest[prefix.len()..];
                    continue 'prefixes;
                }
            }
            break;
        }

        if let Some((_, code)) = NAMED_KEYS.iter().find(|(name, _)| name.eq_ignore_ascii_case(rest)) {
            return Ok(Self::new(*code, modifiers));
        }

        if let Some(n) = rest
            .strip_prefix(['F', 'f'])
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=24).contains(n))
        {
            return Ok(Self::new(KeyCode::F(n), modifiers));
        }

        let mut chars = rest.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Self::new(KeyCode::Char(c), modifiers)),
            _ => Err(KeySpecError(s.to_string())),
        }
    }
}

impl fmt::Display for KeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (prefix, modifier) in MODIFIER_PREFIXES {
            if self.modifiers.contains(*modifier) {
                f.write_str(prefix)?;
            }
        }
        if let Some((name, _)) = NAMED_KEYS.iter().find(|(_, code)| *code == self.code) {
            return f.write_str(name);
        }
        match self.code {
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::F(n) => write!(f, "F{n}"),
            other => write!(f, "{other:?}"),
        }
    }
}

impl TryFrom<String> for KeySpec {
    type Error = KeySpecError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<KeySpec> for String {
    fn from(key: KeySpec) -> String {
        key.to_string()
    }
}

/// Moving the view over a snapshot taller than the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scroll {
    /// By this many lines (negative is up).
    Line(i32),
    /// By this many screenfuls.
    Page(i32),
}

/// What a key does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    /// Send a navigation command.
    Nav(Command),
    /// Scroll the current snapshot; the cursor does not move.
    Scroll(Scroll),
    /// Open the numeric "go to" entry field.
    BeginGoto,
    /// End the session.
    Quit,
}

/// A single binding: key → action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    pub key: KeySpec,
    pub action: KeyAction,
    /// Human-readable description (shown in the hint line).
    #[serde(default)]
    pub description: String,
}

impl Binding {
    pub fn new(key: KeySpec, action: KeyAction, desc: impl Into<String>) -> Self {
        Self {
            key,
            action,
            description: desc.into(),
        }
    }

    pub fn nav(key: KeySpec, command: Command, desc: impl Into<String>) -> Self {
        Self::new(key, KeyAction::Nav(command), desc)
    }
}
