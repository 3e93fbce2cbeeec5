//! Key dispatch: turns key events into navigation outcomes.
//!
//! Pure: no terminal I/O, so the whole key vocabulary is testable with
//! synthetic events.

use crossterm::event::{KeyEvent, KeyEventKind};
use weavescope_nav::Command;

use super::binding::{KeyAction, KeySpec, Scroll};
use super::goto::{GotoField, GotoOutcome};
use super::map::KeyMap;

/// Result of dispatching one key event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Forward this command to the navigator.
    Command(Command),
    /// Scroll the view; nothing reaches the navigator.
    Scroll(Scroll),
    /// End the session.
    Quit,
    /// Handled locally (goto field edits); nothing to forward.
    Consumed,
    /// Not bound.
    Ignored,
}

/// Routes key events through the key map, or into the goto field while it is open.
#[derive(Debug)]
pub struct KeyDispatcher {
    keymap: KeyMap,
    goto: Option<GotoField>,
}

impl KeyDispatcher {
    pub fn new(keymap: KeyMap) -> Self {
        Self { keymap, goto: None }
    }

    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    /// Text of the open goto field, if any.
    pub fn goto_prompt(&self) -> Option<&str> {
        self.goto.as_ref().map(GotoField::text)
    }

    pub fn dispatch(&mut self, event: &KeyEvent) -> KeyOutcome {
        if event.kind == KeyEventKind::Release {
            return KeyOutcome::Ignored;
        }

        if let Some(field) = self.goto.as_mut() {
            return match field.handle(event) {
                GotoOutcome::Editing => KeyOutcome::Consumed,
                GotoOutcome::Submit(command) => {
                    self.goto = None;
                    KeyOutcome::Command(command)
                }
                GotoOutcome::Cancel => {
                    self.goto = None;
                    KeyOutcome::Consumed
                }
                GotoOutcome::Invalid(text) => {
                    tracing::warn!(input = %text, "ignoring unparseable goto target");
                    self.goto = None;
                    KeyOutcome::Consumed
                }
            };
        }

        let key = KeySpec::from_event(event);
        match self.keymap.resolve(&key).map(|b| b.action) {
            Some(KeyAction::Nav(command)) => KeyOutcome::Command(command),
            Some(KeyAction::Scroll(scroll)) => KeyOutcome::Scroll(scroll),
            Some(KeyAction::BeginGoto) => {
                self.goto = Some(GotoField::default());
                KeyOutcome::Consumed
            }
            Some(KeyAction::Quit) => KeyOutcome::Quit,
            None => {
                tracing::trace!(%key, "unbound key");
                KeyOutcome::Ignored
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn dispatcher() -> KeyDispatcher {
        KeyDispatcher::new(KeyMap::default())
    }

    #[test]
    fn test_default_steps() {
        let mut d = dispatcher();
        let cases = [
            (KeyCode::Left, Command::JumpBy(-1)),
            (KeyCode::Right, Command::JumpBy(1)),
            (KeyCode::Char('['), Command::JumpBy(-10)),
            (KeyCode::Char(']'), Command::JumpBy(10)),
            (KeyCode::Char('{'), Command::JumpBy(-100)),
            (KeyCode::Char('}'), Command::JumpBy(100)),
            (KeyCode::Home, Command::JumpTo(0)),
            (KeyCode::End, Command::JumpTo(i64::MAX)),
        ];
        for (code, expected) in cases {
            assert_eq!(d.dispatch(&press(code)), KeyOutcome::Command(expected), "{code:?}");
        }
    }

    #[test]
    fn test_scroll_keys_do_not_navigate() {
        let mut d = dispatcher();
        let cases = [
            (KeyCode::Up, Scroll::Line(-1)),
            (KeyCode::Down, Scroll::Line(1)),
            (KeyCode::PageUp, Scroll::Page(-1)),
            (KeyCode::PageDown, Scroll::Page(1)),
        ];
        for (code, expected) in cases {
            assert_eq!(d.dispatch(&press(code)), KeyOutcome::Scroll(expected), "{code:?}");
        }
    }

    #[test]
    fn test_quit_keys() {
        let mut d = dispatcher();
        assert_eq!(d.dispatch(&press(KeyCode::Char('q'))), KeyOutcome::Quit);
        assert_eq!(d.dispatch(&press(KeyCode::Esc)), KeyOutcome::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(d.dispatch(&ctrl_c), KeyOutcome::Quit);
    }

    #[test]
    fn test_release_and_unbound_ignored() {
        let mut d = dispatcher();
        let release = KeyEvent::new_with_kind(KeyCode::Right, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(d.dispatch(&release), KeyOutcome::Ignored);
        assert_eq!(d.dispatch(&press(KeyCode::Char('z'))), KeyOutcome::Ignored);
    }

    #[test]
    fn test_goto_field_captures_keys_until_enter() {
        let mut d = dispatcher();
        assert_eq!(d.dispatch(&press(KeyCode::Char('g'))), KeyOutcome::Consumed);
        assert_eq!(d.goto_prompt(), Some(""));

        // 'q' would quit outside the field
        assert_eq!(d.dispatch(&press(KeyCode::Char('q'))), KeyOutcome::Consumed);
        d.dispatch(&press(KeyCode::Char('1')));
        d.dispatch(&press(KeyCode::Char('2')));
        assert_eq!(d.goto_prompt(), Some("12"));

        assert_eq!(d.dispatch(&press(KeyCode::Enter)), KeyOutcome::Command(Command::JumpTo(12)));
        assert_eq!(d.goto_prompt(), None);
    }

    #[test]
    fn test_goto_escape_cancels_without_quitting() {
        let mut d = dispatcher();
        d.dispatch(&press(KeyCode::Char(':')));
        d.dispatch(&press(KeyCode::Char('5')));
        assert_eq!(d.dispatch(&press(KeyCode::Esc)), KeyOutcome::Consumed);
        assert_eq!(d.goto_prompt(), None);
        assert_eq!(d.dispatch(&press(KeyCode::Esc)), KeyOutcome::Quit);
    }

    #[test]
    fn test_goto_invalid_closes_field() {
        let mut d = dispatcher();
        d.dispatch(&press(KeyCode::Char('g')));
        assert_eq!(d.dispatch(&press(KeyCode::Enter)), KeyOutcome::Consumed);
        assert_eq!(d.goto_prompt(), None);
    }
}
