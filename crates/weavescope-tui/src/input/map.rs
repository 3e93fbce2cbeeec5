//! KeyMap: the binding table consulted for every key press.

use super::binding::{Binding, KeySpec};

/// The complete key binding configuration.
///
/// Lookup scans from the end, so bindings appended later (from config)
/// override earlier ones for the same key.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyMap {
    pub bindings: Vec<Binding>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            bindings: super::defaults::default_bindings(),
        }
    }
}

impl KeyMap {
    /// A map with no bindings at all.
    pub fn empty() -> Self {
        Self { bindings: Vec::new() }
    }

    pub fn resolve(&self, key: &KeySpec) -> Option<&Binding> {
        self.bindings.iter().rev().find(|b| b.key == *key)
    }

    pub fn extend(&mut self, bindings: impl IntoIterator<Item = Binding>) {
        self.bindings.extend(bindings);
    }

    /// One-line summary of the effective bindings, e.g. `Left/Right ±1 · g go to · q quit`.
    ///
    /// Keys sharing a description are grouped; shadowed bindings are skipped.
    pub fn hints(&self) -> String {
        let mut groups: Vec<(&str, Vec<String>)> = Vec::new();
        for (i, binding) in self.bindings.iter().enumerate() {
            let shadowed = self.bindings[i + 1..].iter().any(|later| later.key == binding.key);
            if shadowed || binding.description.is_empty() {
                continue;
            }
            let key = binding.key.to_string();
            match groups.iter_mut().find(|(desc, _)| *desc == binding.description) {
                Some((_, keys)) => keys.push(key),
                None => groups.push((binding.description.as_str(), vec![key])),
            }
        }
        groups
            .into_iter()
            .map(|(desc, keys)| format!("{} {}", keys.join("/"), desc.to_lowercase()))
            .collect::<Vec<_>>()
            .join(" · ")
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;
    use weavescope_nav::Command;

    use super::*;
    use crate::input::KeyAction;

    #[test]
    fn test_defaults_cover_all_steps() {
        let map = KeyMap::default();
        for step in Command::STEPS {
            assert!(
                map.bindings.iter().any(|b| b.action == KeyAction::Nav(step)),
                "no default binding for {step}"
            );
        }
    }

    #[test]
    fn test_later_binding_overrides() {
        let mut map = KeyMap::default();
        map.extend([Binding::nav(KeySpec::plain(KeyCode::Right), Command::JumpBy(5), "Forward 5")]);

        let binding = map.resolve(&KeySpec::plain(KeyCode::Right)).unwrap();
        assert_eq!(binding.action, KeyAction::Nav(Command::JumpBy(5)));
    }

    #[test]
    fn test_unbound_key_resolves_to_none() {
        assert!(KeyMap::default().resolve(&KeySpec::char('z')).is_none());
        assert!(KeyMap::empty().resolve(&KeySpec::char('q')).is_none());
    }

    #[test]
    fn test_hints_group_keys_and_skip_shadowed() {
        let mut map = KeyMap::empty();
        map.extend([
            Binding::nav(KeySpec::plain(KeyCode::Left), Command::JumpBy(-1), "Back 1"),
            Binding::nav(KeySpec::char(','), Command::JumpBy(-1), "Back 1"),
            Binding::new(KeySpec::char('q'), KeyAction::Quit, "Quit"),
            Binding::new(KeySpec::char('q'), KeyAction::BeginGoto, "Go to"),
        ]);
        assert_eq!(map.hints(), "Left/, back 1 · q go to");
    }
}
