//! The numeric "go to" entry field.

use crossterm::event::{KeyCode, KeyEvent};
use weavescope_nav::Command;

/// What happened to the field after a key press.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GotoOutcome {
    /// Still editing.
    Editing,
    /// Enter with a parseable number. Unvalidated; the navigator clamps it.
    Submit(Command),
    /// Esc pressed.
    Cancel,
    /// Enter with nothing usable in the buffer (empty, a bare `-`, overflow).
    Invalid(String),
}

/// Accumulates digits (and an optional leading `-`) until Enter or Esc.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GotoField {
    buffer: String,
}

impl GotoField {
    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn handle(&mut self, key: &KeyEvent) -> GotoOutcome {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => self.buffer.push(c),
            KeyCode::Char('-') if self.buffer.is_empty() => self.buffer.push('-'),
            KeyCode::Backspace => {
                self.buffer.pop();
            }
            KeyCode::Esc => return GotoOutcome::Cancel,
            KeyCode::Enter => {
                return match self.buffer.parse::<i64>() {
                    Ok(target) => GotoOutcome::Submit(Command::JumpTo(target)),
                    Err(_) => GotoOutcome::Invalid(self.buffer.clone()),
                };
            }
            _ => {}
        }
        GotoOutcome::Editing
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn feed(field: &mut GotoField, codes: &[KeyCode]) -> GotoOutcome {
        let mut last = GotoOutcome::Editing;
        for code in codes {
            last = field.handle(&KeyEvent::new(*code, KeyModifiers::NONE));
        }
        last
    }

    #[test]
    fn test_digits_then_enter_submits_jump_to() {
        let mut field = GotoField::default();
        let out = feed(
            &mut field,
            &[KeyCode::Char('4'), KeyCode::Char('2'), KeyCode::Enter],
        );
        assert_eq!(out, GotoOutcome::Submit(Command::JumpTo(42)));
    }

    #[test]
    fn test_negative_target_is_passed_through() {
        let mut field = GotoField::default();
        let out = feed(
            &mut field,
            &[KeyCode::Char('-'), KeyCode::Char('3'), KeyCode::Enter],
        );
        assert_eq!(out, GotoOutcome::Submit(Command::JumpTo(-3)));
    }

    #[test]
    fn test_minus_only_allowed_first_and_letters_ignored() {
        let mut field = GotoField::default();
        feed(
            &mut field,
            &[KeyCode::Char('1'), KeyCode::Char('-'), KeyCode::Char('x'), KeyCode::Char('7')],
        );
        assert_eq!(field.text(), "17");
    }

    #[test]
    fn test_backspace_and_escape() {
        let mut field = GotoField::default();
        feed(&mut field, &[KeyCode::Char('9'), KeyCode::Char('8'), KeyCode::Backspace]);
        assert_eq!(field.text(), "9");
        assert_eq!(feed(&mut field, &[KeyCode::Esc]), GotoOutcome::Cancel);
    }

    #[test]
    fn test_enter_on_empty_or_bare_minus_is_invalid() {
        let mut field = GotoField::default();
        assert_eq!(feed(&mut field, &[KeyCode::Enter]), GotoOutcome::Invalid(String::new()));

        let mut field = GotoField::default();
        assert_eq!(
            feed(&mut field, &[KeyCode::Char('-'), KeyCode::Enter]),
            GotoOutcome::Invalid("-".into())
        );
    }
}
